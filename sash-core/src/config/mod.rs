//! Configuration types
//!
//! Board-agnostic configuration structures for window actuators, plus a
//! small TOML parser for the greenhouse config file.

pub mod hardware;
pub mod toml;

pub use hardware::*;
pub use toml::{parse_config, ParseError};
