//! Actuator state definition

/// Actuator states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorState {
    /// Not moving; motor off
    #[default]
    Idle,
    /// Driving towards the opened limit
    Opening,
    /// Driving towards the closed limit
    Closing,
    /// Last move exceeded its timeout; motor off until a new command
    TimedOut,
}

impl ActuatorState {
    /// Check if the motor is driving in this state
    ///
    /// A move deadline exists exactly when this is true.
    pub fn is_moving(&self) -> bool {
        matches!(self, ActuatorState::Opening | ActuatorState::Closing)
    }

    /// Check if this is the timeout fault state
    pub fn is_fault(&self) -> bool {
        matches!(self, ActuatorState::TimedOut)
    }
}
