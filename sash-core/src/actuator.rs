//! Window actuator state machine
//!
//! Drives one motorized window between its open and closed limits:
//! - `open()` / `close()` start a move and arm a deadline
//! - `stop()` halts immediately and clears a timeout fault
//! - `autostop()` ends a move when the matching limit switch triggers, or
//!   faults it into `TimedOut` once the deadline passes
//!
//! # Usage
//!
//! Nothing runs in the background. The owner must call `autostop()`
//! periodically; timeout accuracy and limit-switch response are bounded by
//! that polling interval.
//!
//! ```ignore
//! let mut window = Actuator::new(config, pins, clock, DefmtSink)?;
//! window.setup();
//! window.open();
//!
//! // Every poll tick:
//! window.autostop();
//! if window.has_timed_out() {
//!     // needs a new command
//! }
//! ```

use sash_hal::{Clock, InputPin, Level, OutputPin};

use crate::config::{ActuatorConfig, ConfigError, PinConfig};
use crate::diag::{DiagnosticEvent, DiagnosticSink};
use crate::state::{ActuatorState, Command, Transition};

/// GPIO handles owned by one actuator
pub struct ActuatorPins<O, I> {
    /// Direction control output
    pub direction: O,
    /// Motor enable output
    pub motor: O,
    /// Opened limit switch input
    pub opened: I,
    /// Closed limit switch input
    pub closed: I,
}

/// Window actuator controller
///
/// Invariants held after every operation:
/// - a move deadline exists exactly while opening or closing
/// - the motor output is asserted exactly while opening or closing
/// - `TimedOut` is only entered from a move whose deadline passed
pub struct Actuator<O, I, K, S> {
    config: ActuatorConfig,
    pins: ActuatorPins<O, I>,
    clock: K,
    sink: S,
    state: ActuatorState,
    /// Clock time (ms) at which the current move times out
    move_deadline: Option<u64>,
}

impl<O, I, K, S> Actuator<O, I, K, S>
where
    O: OutputPin,
    I: InputPin,
    K: Clock,
    S: DiagnosticSink,
{
    /// Create a new actuator in the `Idle` state
    ///
    /// Call [`setup`](Self::setup) once before issuing commands.
    pub fn new(
        config: ActuatorConfig,
        pins: ActuatorPins<O, I>,
        clock: K,
        sink: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            pins,
            clock,
            sink,
            state: ActuatorState::Idle,
            move_deadline: None,
        })
    }

    /// Configure the pins
    ///
    /// Outputs are latched at their inactive level before they start
    /// driving. Sensors get the pull from their pin config.
    pub fn setup(&mut self) {
        self.pins
            .direction
            .configure_output(self.config.direction_pin.inactive_level());
        self.pins
            .motor
            .configure_output(self.config.motor_pin.inactive_level());

        self.pins.opened.configure_input(self.config.opened_pin.pull());
        self.pins.closed.configure_input(self.config.closed_pin.pull());
    }

    /// Open the window
    ///
    /// Does nothing when the window is open or already opening.
    pub fn open(&mut self) {
        if self.state != ActuatorState::Opening && !self.is_open() {
            self.start_move(Transition::Opening);
        }
    }

    /// Close the window
    ///
    /// Does nothing when the window is closed or already closing.
    pub fn close(&mut self) {
        if self.state != ActuatorState::Closing && !self.is_closed() {
            self.start_move(Transition::Closing);
        }
    }

    /// Stop the window
    ///
    /// Also clears a timeout fault. Does nothing when idle.
    pub fn stop(&mut self) {
        if self.state != ActuatorState::Idle {
            self.halt(Transition::Stopped);
        }
    }

    /// Stop the window when it has reached its limit or its move timed out
    ///
    /// Limit switches are checked before the deadline, so a move that
    /// completes on the deadline tick counts as completed. Does nothing when
    /// the window is not moving.
    pub fn autostop(&mut self) {
        let transition = match self.state {
            ActuatorState::Opening if self.is_open() => Transition::Opened,
            ActuatorState::Closing if self.is_closed() => Transition::Closed,
            ActuatorState::Opening | ActuatorState::Closing if self.deadline_passed() => {
                Transition::TimedOut
            }
            _ => return,
        };
        self.halt(transition);
    }

    /// Execute a command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Open => self.open(),
            Command::Close => self.close(),
            Command::Stop => self.stop(),
        }
    }

    /// Check if the opened limit switch is triggered
    pub fn is_open(&self) -> bool {
        triggered(&self.pins.opened, &self.config.opened_pin)
    }

    /// Check if the closed limit switch is triggered
    pub fn is_closed(&self) -> bool {
        triggered(&self.pins.closed, &self.config.closed_pin)
    }

    /// Check if the window is currently moving
    pub fn is_moving(&self) -> bool {
        self.state.is_moving()
    }

    /// Check if the last move timed out
    pub fn has_timed_out(&self) -> bool {
        self.state.is_fault()
    }

    /// Get the current state
    pub fn state(&self) -> ActuatorState {
        self.state
    }

    /// Get the deadline of the current move, if moving
    pub fn move_deadline(&self) -> Option<u64> {
        self.move_deadline
    }

    /// Get the window label
    pub fn label(&self) -> &str {
        self.config.label.as_str()
    }

    /// Get the configuration
    pub fn config(&self) -> &ActuatorConfig {
        &self.config
    }

    fn start_move(&mut self, transition: Transition) {
        let closing = transition == Transition::Closing;

        self.pins
            .direction
            .set_level(self.config.direction_pin.level_for(closing));
        self.pins
            .motor
            .set_level(self.config.motor_pin.active_level());

        let timeout = u64::from(self.config.move_timeout_ms);
        self.move_deadline = Some(self.clock.now_ms().saturating_add(timeout));
        self.enter(transition);
    }

    fn halt(&mut self, transition: Transition) {
        self.pins
            .motor
            .set_level(self.config.motor_pin.inactive_level());
        self.pins
            .direction
            .set_level(self.config.direction_pin.inactive_level());

        self.move_deadline = None;
        self.enter(transition);
    }

    fn enter(&mut self, transition: Transition) {
        self.state = transition.target();
        self.sink.emit(&DiagnosticEvent {
            label: self.config.label.as_str(),
            transition,
        });
    }

    fn deadline_passed(&self) -> bool {
        self.move_deadline
            .is_some_and(|deadline| self.clock.now_ms() >= deadline)
    }
}

/// Check a limit switch against its configured active level
fn triggered<I: InputPin>(pin: &I, config: &PinConfig) -> bool {
    Level::from(pin.is_high()) == config.active_level()
}
