//! Hardware configuration types
//!
//! These types describe how each window actuator is wired: which GPIOs
//! drive its direction and motor lines, which read its limit switches, and
//! how long a move may take.

use heapless::{FnvIndexSet, String, Vec};
use sash_hal::{Level, Pull};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum length of an actuator label
pub const MAX_LABEL_LEN: usize = 24;

/// Maximum number of windows per node
pub const MAX_WINDOWS: usize = 4;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Move timeout must be positive
    ZeroTimeout,
    /// Label is empty
    EmptyLabel,
    /// Label exceeds `MAX_LABEL_LEN`
    LabelTooLong,
    /// GPIO assigned more than once
    PinConflict(u8),
    /// Two windows share a label
    DuplicateLabel,
    /// More than `MAX_WINDOWS` windows
    TooManyWindows,
    /// Required setting absent
    MissingField(&'static str),
}

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create an active-low limit switch input with pull-up
    ///
    /// This is the usual wiring: the switch shorts the line to ground.
    pub const fn active_low_switch(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }

    /// Electrical level for the asserted state
    pub fn active_level(&self) -> Level {
        if self.inverted {
            Level::Low
        } else {
            Level::High
        }
    }

    /// Electrical level for the de-asserted state
    pub fn inactive_level(&self) -> Level {
        !self.active_level()
    }

    /// Level to drive for a logical state
    pub fn level_for(&self, asserted: bool) -> Level {
        if asserted {
            self.active_level()
        } else {
            self.inactive_level()
        }
    }

    /// Input pull resistor for this pin
    pub fn pull(&self) -> Pull {
        if self.pull_up {
            Pull::Up
        } else {
            Pull::None
        }
    }
}

/// Window actuator configuration
///
/// Polarity conventions:
/// - `motor_pin` is asserted while the motor runs.
/// - `direction_pin` is asserted while closing. With a non-inverted pin,
///   open is LOW and close is HIGH; the line rests at the open level when
///   the motor is off.
/// - `opened_pin` / `closed_pin` are asserted when the limit is reached.
///   Switches are normally active-low with pull-up.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActuatorConfig {
    /// Window label (e.g., "roof_east"), used in diagnostics
    pub label: String<MAX_LABEL_LEN>,
    /// Direction control output
    pub direction_pin: PinConfig,
    /// Motor enable output
    pub motor_pin: PinConfig,
    /// Opened limit switch input
    pub opened_pin: PinConfig,
    /// Closed limit switch input
    pub closed_pin: PinConfig,
    /// Maximum duration of one open or close move (ms)
    pub move_timeout_ms: u32,
}

impl ActuatorConfig {
    /// Create a config with the standard wiring
    ///
    /// Active-high direction and motor outputs, active-low limit switches
    /// with pull-ups.
    pub fn new(
        label: &str,
        direction_pin: u8,
        motor_pin: u8,
        opened_pin: u8,
        closed_pin: u8,
        move_timeout_ms: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            label: make_label(label)?,
            direction_pin: PinConfig::new(direction_pin),
            motor_pin: PinConfig::new(motor_pin),
            opened_pin: PinConfig::active_low_switch(opened_pin),
            closed_pin: PinConfig::active_low_switch(closed_pin),
            move_timeout_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// All four pins, outputs first
    pub fn pins(&self) -> [PinConfig; 4] {
        [
            self.direction_pin,
            self.motor_pin,
            self.opened_pin,
            self.closed_pin,
        ]
    }

    /// Check the config for values the actuator cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.label.is_empty() {
            return Err(ConfigError::EmptyLabel);
        }
        if self.move_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let mut alloc = PinAllocator::new();
        for pin in self.pins() {
            alloc.allocate(pin.pin)?;
        }
        Ok(())
    }
}

/// Build a bounded label from a string slice
pub fn make_label(label: &str) -> Result<String<MAX_LABEL_LEN>, ConfigError> {
    if label.is_empty() {
        return Err(ConfigError::EmptyLabel);
    }
    let mut out = String::new();
    out.push_str(label).map_err(|_| ConfigError::LabelTooLong)?;
    Ok(out)
}

/// All window actuators on one node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GreenhouseConfig {
    /// Configured windows, in declaration order
    pub windows: Vec<ActuatorConfig, MAX_WINDOWS>,
}

impl GreenhouseConfig {
    /// Create an empty config
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a window
    pub fn push(&mut self, window: ActuatorConfig) -> Result<(), ConfigError> {
        self.windows
            .push(window)
            .map_err(|_| ConfigError::TooManyWindows)
    }

    /// Find a window by label
    pub fn find(&self, label: &str) -> Option<&ActuatorConfig> {
        self.windows.iter().find(|w| w.label.as_str() == label)
    }

    /// Validate every window, and that labels and GPIOs are unique across
    /// windows
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut alloc = PinAllocator::new();

        for (i, window) in self.windows.iter().enumerate() {
            window.validate()?;

            if self.windows[..i].iter().any(|w| w.label == window.label) {
                return Err(ConfigError::DuplicateLabel);
            }

            for pin in window.pins() {
                alloc.allocate(pin.pin)?;
            }
        }
        Ok(())
    }
}

/// Tracks which GPIO pins are claimed to detect double assignment
struct PinAllocator {
    allocated: FnvIndexSet<u8, 32>,
}

impl PinAllocator {
    fn new() -> Self {
        Self {
            allocated: FnvIndexSet::new(),
        }
    }

    fn allocate(&mut self, pin: u8) -> Result<(), ConfigError> {
        if self.allocated.contains(&pin) {
            return Err(ConfigError::PinConflict(pin));
        }
        self.allocated
            .insert(pin)
            .map_err(|_| ConfigError::TooManyWindows)?;
        Ok(())
    }
}
