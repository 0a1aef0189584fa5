//! Blocking clock on the embassy time driver

use embassy_time::{block_for, Duration, Instant};
use penarm_core::scheduler::{deadline_reached, Clock};

/// Millisecond clock backed by the RP2040 timer
///
/// Waits busy-block; the control loop is the only work on the core.
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation wraps with the rest of the u32 timeline
        Instant::now().as_millis() as u32
    }

    fn sleep_until_ms(&mut self, deadline_ms: u32) {
        let now = self.now_ms();
        if !deadline_reached(now, deadline_ms) {
            block_for(Duration::from_millis(deadline_ms.wrapping_sub(now) as u64));
        }
    }
}
