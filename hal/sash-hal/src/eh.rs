//! `embedded-hal` 1.0 adapters
//!
//! Wraps pins from any HAL that implements the `embedded-hal` digital
//! traits so they can drive an actuator. Those pins are configured when the
//! HAL hands them out, so the `configure_*` calls only set the initial
//! level.
//!
//! The sash traits are infallible. A failed write is dropped; a failed read
//! reports the adapter's fallback level, which defaults to HIGH: the idle
//! level of a pulled-up, active-low limit switch. A flaky sensor therefore
//! reads as "not triggered" and the move ends through its timeout.

use core::cell::RefCell;

use embedded_hal::digital;

use crate::gpio::{InputPin, Level, OutputPin, Pull};

/// Output adapter over an `embedded_hal::digital::OutputPin`
///
/// The last written level is tracked locally, so the wrapped pin does not
/// need to implement `StatefulOutputPin`.
pub struct EhOutput<P> {
    pin: P,
    level: Level,
}

impl<P: digital::OutputPin> EhOutput<P> {
    /// Wrap a pin, assuming it currently drives low
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            level: Level::Low,
        }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: digital::OutputPin> OutputPin for EhOutput<P> {
    fn configure_output(&mut self, initial: Level) {
        self.set_level(initial);
    }

    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.level = Level::High;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.level = Level::Low;
    }

    fn is_set_high(&self) -> bool {
        self.level.is_high()
    }
}

/// Input adapter over an `embedded_hal::digital::InputPin`
///
/// `embedded-hal` reads take `&mut self`; the pin sits in a `RefCell` so
/// reads work through the shared reference the sash traits use.
pub struct EhInput<P> {
    pin: RefCell<P>,
    fallback: Level,
}

impl<P: digital::InputPin> EhInput<P> {
    /// Wrap a pin that reads HIGH when a read fails
    pub fn new(pin: P) -> Self {
        Self::with_fallback(pin, Level::High)
    }

    /// Wrap a pin with an explicit level to report when a read fails
    pub fn with_fallback(pin: P, fallback: Level) -> Self {
        Self {
            pin: RefCell::new(pin),
            fallback,
        }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin.into_inner()
    }
}

impl<P: digital::InputPin> InputPin for EhInput<P> {
    fn configure_input(&mut self, _pull: Pull) {
        // Pull is fixed by the HAL when the pin was created
    }

    fn is_high(&self) -> bool {
        self.pin
            .borrow_mut()
            .is_high()
            .unwrap_or(self.fallback.is_high())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct MockOut {
        high: bool,
        writes: u32,
    }

    impl ErrorType for MockOut {
        type Error = Infallible;
    }

    impl digital::OutputPin for MockOut {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    struct MockIn {
        high: bool,
    }

    impl ErrorType for MockIn {
        type Error = Infallible;
    }

    impl digital::InputPin for MockIn {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    #[derive(Debug)]
    struct BusFault;

    impl digital::Error for BusFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    struct BrokenIn;

    impl ErrorType for BrokenIn {
        type Error = BusFault;
    }

    impl digital::InputPin for BrokenIn {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(BusFault)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(BusFault)
        }
    }

    #[test]
    fn test_output_tracks_written_level() {
        let mut out = EhOutput::new(MockOut {
            high: true,
            writes: 0,
        });

        out.configure_output(Level::Low);
        assert!(out.is_set_low());

        out.set_high();
        assert!(out.is_set_high());

        let inner = out.into_inner();
        assert!(inner.high);
        assert_eq!(inner.writes, 2);
    }

    #[test]
    fn test_input_reads_through_shared_reference() {
        let input = EhInput::new(MockIn { high: false });
        assert!(input.is_low());

        let mut raw = input.into_inner();
        raw.high = true;
        let input = EhInput::new(raw);
        assert!(input.is_high());
    }

    #[test]
    fn test_failed_read_reports_fallback() {
        let input = EhInput::new(BrokenIn);
        assert!(input.is_high());

        let input = EhInput::with_fallback(BrokenIn, Level::Low);
        assert!(input.is_low());
    }
}
