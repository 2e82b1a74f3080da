//! Board wiring
//!
//! The node routes GPIO2-GPIO17 to four window headers of four pins each.
//! Pins are handed out at most once, in whatever arrangement
//! greenhouse.toml asks for.

use embassy_rp::gpio::Flex;
use embassy_rp::Peripherals;
use sash_core::{ActuatorConfig, ActuatorPins};
use sash_hal_rp2040::{RpPin, GPIO_COUNT};

/// First GPIO on the window headers
pub const FIRST_HEADER_GPIO: u8 = 2;

/// Number of GPIOs on the window headers
pub const HEADER_GPIO_COUNT: usize = 16;

const _: () = assert!((FIRST_HEADER_GPIO as usize + HEADER_GPIO_COUNT) <= GPIO_COUNT as usize);

/// Board wiring errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum BoardError {
    /// Pin is not on a window header, or was already taken
    Unavailable(u8),
}

/// Header pins not yet claimed by a window
pub struct BoardPins {
    pins: [Option<Flex<'static>>; HEADER_GPIO_COUNT],
}

impl BoardPins {
    /// Take the header pins out of the peripherals
    pub fn new(p: Peripherals) -> Self {
        Self {
            pins: [
                Some(Flex::new(p.PIN_2)),
                Some(Flex::new(p.PIN_3)),
                Some(Flex::new(p.PIN_4)),
                Some(Flex::new(p.PIN_5)),
                Some(Flex::new(p.PIN_6)),
                Some(Flex::new(p.PIN_7)),
                Some(Flex::new(p.PIN_8)),
                Some(Flex::new(p.PIN_9)),
                Some(Flex::new(p.PIN_10)),
                Some(Flex::new(p.PIN_11)),
                Some(Flex::new(p.PIN_12)),
                Some(Flex::new(p.PIN_13)),
                Some(Flex::new(p.PIN_14)),
                Some(Flex::new(p.PIN_15)),
                Some(Flex::new(p.PIN_16)),
                Some(Flex::new(p.PIN_17)),
            ],
        }
    }

    fn slot(&mut self, pin: u8) -> Option<&mut Option<Flex<'static>>> {
        let index = pin.checked_sub(FIRST_HEADER_GPIO)? as usize;
        self.pins.get_mut(index)
    }

    fn is_available(&mut self, pin: u8) -> bool {
        self.slot(pin).is_some_and(|slot| slot.is_some())
    }

    fn take(&mut self, pin: u8) -> Result<RpPin<'static>, BoardError> {
        self.slot(pin)
            .and_then(Option::take)
            .map(RpPin::new)
            .ok_or(BoardError::Unavailable(pin))
    }

    /// Claim the four pins of one window
    ///
    /// Nothing is claimed unless all four pins are available.
    pub fn take_actuator_pins(
        &mut self,
        config: &ActuatorConfig,
    ) -> Result<ActuatorPins<RpPin<'static>, RpPin<'static>>, BoardError> {
        for pin in config.pins() {
            if !self.is_available(pin.pin) {
                return Err(BoardError::Unavailable(pin.pin));
            }
        }

        Ok(ActuatorPins {
            direction: self.take(config.direction_pin.pin)?,
            motor: self.take(config.motor_pin.pin)?,
            opened: self.take(config.opened_pin.pin)?,
            closed: self.take(config.closed_pin.pin)?,
        })
    }
}
