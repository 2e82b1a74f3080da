//! Sash - Greenhouse Window Actuator Firmware
//!
//! Main firmware binary for RP2040-based greenhouse nodes. Each configured
//! window gets its own task that drives the actuator motor and stops it at
//! the limit switches or after its move timeout.
//!
//! # Startup failures
//!
//! greenhouse.toml is checked by build.rs with the same rules the parser
//! applies, so a config error at boot means the two have drifted apart. In
//! that case no window is started: the node-wide pin and label checks only
//! hold for the file as a whole. Once the config is accepted, a window whose
//! pins cannot be claimed is skipped and the remaining windows still run.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use sash_core::config::parse_config;
use sash_core::diag::DefmtSink;
use sash_core::{Actuator, Command};
use sash_hal_rp2040::EmbassyClock;

use crate::board::BoardPins;
use crate::channels::WINDOW_COMMANDS;

mod board;
mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit greenhouse.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../greenhouse.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sash firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid greenhouse.toml, no window started: {:?}", e);
            return;
        }
    };
    info!("Configuration loaded: {} windows", config.windows.len());

    let mut pins = BoardPins::new(p);

    for (slot, window) in config.windows.into_iter().enumerate() {
        let hw = match pins.take_actuator_pins(&window) {
            Ok(hw) => hw,
            Err(e) => {
                error!("Window {}: {:?}", window.label.as_str(), e);
                continue;
            }
        };

        let actuator = match Actuator::new(window, hw, EmbassyClock, DefmtSink) {
            Ok(actuator) => actuator,
            Err(e) => {
                error!("Window in slot {}: {:?}", slot, e);
                continue;
            }
        };

        spawner.spawn(tasks::window_task(slot, actuator)).unwrap();

        // Park every window in a known position after power-up
        WINDOW_COMMANDS[slot].signal(Command::Close);
    }

    info!("All window tasks spawned");
}
