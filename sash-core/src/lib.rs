//! Board-agnostic core logic for the greenhouse window actuator
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - The actuator state machine (open/close/stop with limit-switch and
//!   timeout autostop)
//! - Commands and transition events
//! - Diagnostic sinks
//! - Configuration types, validation, and the TOML config parser

#![no_std]
#![deny(unsafe_code)]

pub mod actuator;
pub mod config;
pub mod diag;
pub mod state;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod testing;

pub use actuator::{Actuator, ActuatorPins};
pub use config::{ActuatorConfig, ConfigError, GreenhouseConfig, PinConfig};
pub use diag::{DiagnosticEvent, DiagnosticSink};
pub use state::{ActuatorState, Command, Transition};
