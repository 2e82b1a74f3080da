//! Window actuator task
//!
//! Owns one actuator: applies incoming commands and polls `autostop()` on a
//! fixed cadence, which bounds both limit-switch response and timeout
//! accuracy.

use defmt::*;
use embassy_time::{Duration, Ticker};

use sash_core::config::MAX_WINDOWS;
use sash_core::diag::DefmtSink;
use sash_core::Actuator;
use sash_hal_rp2040::{EmbassyClock, RpPin};

use crate::channels::WINDOW_COMMANDS;

/// Poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 50;

/// Actuator type used on the board
pub type Window = Actuator<RpPin<'static>, RpPin<'static>, EmbassyClock, DefmtSink>;

/// Window task for the window in `slot`
#[embassy_executor::task(pool_size = MAX_WINDOWS)]
pub async fn window_task(slot: usize, mut window: Window) {
    info!("Window task started: {} (slot {})", window.label(), slot);

    window.setup();

    let commands = &WINDOW_COMMANDS[slot];
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        if let Some(cmd) = commands.try_take() {
            debug!("Window {} command: {:?}", window.label(), cmd);
            window.apply(cmd);
        }

        // Limit switches win over the deadline inside autostop
        window.autostop();

        ticker.next().await;
    }
}
