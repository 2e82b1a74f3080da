//! Sash Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities a window actuator needs:
//! digital pins and a monotonic clock. Chip-specific crates implement
//! them, which keeps the actuator state machine free of any particular
//! GPIO driver and lets tests substitute fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (sash-firmware, etc.)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sash-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ sash-hal-     │       │ any embedded- │
//! │    rp2040     │       │ hal 1.0 pin   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O with mode setup
//! - [`time::Clock`] - Monotonic millisecond clock
//!
//! The [`eh`] module adapts `embedded-hal` 1.0 pins to these traits.

#![no_std]
#![deny(unsafe_code)]

pub mod eh;
pub mod gpio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, Level, OutputPin, Pull};
pub use time::Clock;
