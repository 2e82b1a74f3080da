//! Commands accepted by an actuator and the transitions it reports

use super::machine::ActuatorState;

/// High-level commands from whatever decides when windows move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Drive towards the opened limit
    Open,
    /// Drive towards the closed limit
    Close,
    /// Halt immediately
    Stop,
}

/// State changes reported to the diagnostic sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// `open()` started a move
    Opening,
    /// `close()` started a move
    Closing,
    /// `stop()` halted a move or cleared a timeout
    Stopped,
    /// The opened limit switch ended an opening move
    Opened,
    /// The closed limit switch ended a closing move
    Closed,
    /// The move deadline passed before the limit switch triggered
    TimedOut,
}

impl Transition {
    /// State the actuator is in after this transition
    pub fn target(&self) -> ActuatorState {
        match self {
            Transition::Opening => ActuatorState::Opening,
            Transition::Closing => ActuatorState::Closing,
            Transition::Stopped | Transition::Opened | Transition::Closed => ActuatorState::Idle,
            Transition::TimedOut => ActuatorState::TimedOut,
        }
    }
}
