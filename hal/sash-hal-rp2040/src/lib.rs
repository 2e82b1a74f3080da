//! RP2040 Hardware Abstraction Layer
//!
//! Implements the sash-hal traits on top of embassy-rp for RP2040-based
//! greenhouse nodes.
//!
//! # Features
//!
//! - GPIO pins with runtime mode switching ([`gpio::RpPin`])
//! - Monotonic clock backed by the embassy time driver ([`time::EmbassyClock`])

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

// Re-export commonly used types
pub use gpio::{RpPin, GPIO_COUNT};
pub use time::EmbassyClock;
