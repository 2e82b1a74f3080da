//! GPIO pins for the RP2040
//!
//! Wraps `embassy_rp::gpio::Flex`, which can be switched between input and
//! output at runtime. That matches the actuator's own setup step, which
//! configures each pin after the actuator has taken ownership of it.

use embassy_rp::gpio::{self as rp, Flex};
use sash_hal::{InputPin, Level, OutputPin, Pull};

/// Number of user GPIOs on the RP2040 (GPIO0-GPIO29)
pub const GPIO_COUNT: u8 = 30;

/// Runtime-configurable RP2040 pin
pub struct RpPin<'d> {
    flex: Flex<'d>,
}

impl<'d> RpPin<'d> {
    /// Wrap a flex pin; it stays in its reset mode until configured
    pub fn new(flex: Flex<'d>) -> Self {
        Self { flex }
    }
}

fn to_rp_level(level: Level) -> rp::Level {
    match level {
        Level::Low => rp::Level::Low,
        Level::High => rp::Level::High,
    }
}

fn to_rp_pull(pull: Pull) -> rp::Pull {
    match pull {
        Pull::None => rp::Pull::None,
        Pull::Up => rp::Pull::Up,
        Pull::Down => rp::Pull::Down,
    }
}

impl OutputPin for RpPin<'_> {
    fn configure_output(&mut self, initial: Level) {
        // Latch the level first so the pad never drives the other state
        self.flex.set_level(to_rp_level(initial));
        self.flex.set_as_output();
    }

    fn set_high(&mut self) {
        self.flex.set_high();
    }

    fn set_low(&mut self) {
        self.flex.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.flex.is_set_high()
    }
}

impl InputPin for RpPin<'_> {
    fn configure_input(&mut self, pull: Pull) {
        self.flex.set_pull(to_rp_pull(pull));
        self.flex.set_as_input();
    }

    fn is_high(&self) -> bool {
        self.flex.is_high()
    }
}
