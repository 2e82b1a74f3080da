//! Inter-task communication channels
//!
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use sash_core::config::MAX_WINDOWS;
use sash_core::Command;

/// Pending command for each window slot (latest command wins)
pub static WINDOW_COMMANDS: [Signal<CriticalSectionRawMutex, Command>; MAX_WINDOWS] =
    [const { Signal::new() }; MAX_WINDOWS];
