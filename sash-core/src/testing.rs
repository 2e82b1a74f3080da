//! Fake hardware for actuator tests
//!
//! Lines are shared through `Cell`s so a test can flip limit switches and
//! advance time while the actuator owns its pin handles.

use core::cell::{Cell, RefCell};

use heapless::Vec;
use sash_hal::{Clock, InputPin, Level, OutputPin, Pull};

use crate::actuator::{Actuator, ActuatorPins};
use crate::config::ActuatorConfig;
use crate::diag::{DiagnosticEvent, DiagnosticSink};
use crate::state::Transition;

/// Pin mode as last configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Unconfigured,
    Output,
    Input(Pull),
}

/// One simulated GPIO line
pub struct Line {
    level: Cell<Level>,
    mode: Cell<Mode>,
}

impl Line {
    pub fn new(level: Level) -> Self {
        Self {
            level: Cell::new(level),
            mode: Cell::new(Mode::Unconfigured),
        }
    }

    pub fn level(&self) -> Level {
        self.level.get()
    }

    pub fn set(&self, level: Level) {
        self.level.set(level);
    }

    pub fn mode(&self) -> Mode {
        self.mode.get()
    }
}

/// Pin handle onto a shared line
pub struct LinePin<'a>(pub &'a Line);

impl OutputPin for LinePin<'_> {
    fn configure_output(&mut self, initial: Level) {
        self.0.set(initial);
        self.0.mode.set(Mode::Output);
    }

    fn set_high(&mut self) {
        self.0.set(Level::High);
    }

    fn set_low(&mut self) {
        self.0.set(Level::Low);
    }

    fn is_set_high(&self) -> bool {
        self.0.level().is_high()
    }
}

impl InputPin for LinePin<'_> {
    fn configure_input(&mut self, pull: Pull) {
        self.0.mode.set(Mode::Input(pull));
    }

    fn is_high(&self) -> bool {
        self.0.level().is_high()
    }
}

/// Clock reading a shared millisecond counter
pub struct TestClock<'a>(pub &'a Cell<u64>);

impl Clock for TestClock<'_> {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

pub type EventLog = Vec<Transition, 64>;

/// Sink recording every transition
pub struct Recorder<'a>(pub &'a RefCell<EventLog>);

impl DiagnosticSink for Recorder<'_> {
    fn emit(&mut self, event: &DiagnosticEvent<'_>) {
        assert_eq!(event.label, "roof");
        let _ = self.0.borrow_mut().push(event.transition);
    }
}

pub type TestActuator<'a> = Actuator<LinePin<'a>, LinePin<'a>, TestClock<'a>, Recorder<'a>>;

/// A window's worth of fake hardware
///
/// Limit switches start released (HIGH, active-low) and outputs LOW.
pub struct Rig {
    pub direction: Line,
    pub motor: Line,
    pub opened: Line,
    pub closed: Line,
    pub now: Cell<u64>,
    pub events: RefCell<EventLog>,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            direction: Line::new(Level::Low),
            motor: Line::new(Level::Low),
            opened: Line::new(Level::High),
            closed: Line::new(Level::High),
            now: Cell::new(0),
            events: RefCell::new(Vec::new()),
        }
    }

    /// Standard-wired actuator labelled "roof"
    pub fn actuator(&self, move_timeout_ms: u32) -> TestActuator<'_> {
        let config = ActuatorConfig::new("roof", 2, 3, 4, 5, move_timeout_ms).unwrap();
        self.actuator_with(config)
    }

    pub fn actuator_with(&self, config: ActuatorConfig) -> TestActuator<'_> {
        let pins = ActuatorPins {
            direction: LinePin(&self.direction),
            motor: LinePin(&self.motor),
            opened: LinePin(&self.opened),
            closed: LinePin(&self.closed),
        };
        let mut actuator =
            Actuator::new(config, pins, TestClock(&self.now), Recorder(&self.events)).unwrap();
        actuator.setup();
        actuator
    }

    pub fn set_time(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    /// Press or release the opened limit switch
    pub fn set_opened(&self, triggered: bool) {
        self.opened
            .set(if triggered { Level::Low } else { Level::High });
    }

    /// Press or release the closed limit switch
    pub fn set_closed(&self, triggered: bool) {
        self.closed
            .set(if triggered { Level::Low } else { Level::High });
    }

    pub fn motor_on(&self) -> bool {
        self.motor.level().is_high()
    }

    pub fn events(&self) -> EventLog {
        self.events.borrow().clone()
    }
}
