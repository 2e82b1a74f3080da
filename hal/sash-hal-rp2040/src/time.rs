//! Monotonic clock from the embassy time driver

use embassy_time::Instant;
use sash_hal::Clock;

/// Milliseconds since boot, as counted by embassy-time
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
