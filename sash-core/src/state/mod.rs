//! Actuator states, commands, and transition events
//!
//! The state machine is explicit, finite, and deterministic. The states
//! live here; the transitions themselves are driven by
//! [`Actuator`](crate::Actuator) because they depend on sensor reads and
//! the clock.

pub mod events;
pub mod machine;

pub use events::{Command, Transition};
pub use machine::ActuatorState;
