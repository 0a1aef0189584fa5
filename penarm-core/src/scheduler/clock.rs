//! Millisecond time source

/// Monotonic millisecond clock with a blocking wait
///
/// Timestamps are `u32` and wrap after roughly 49 days; compare them with
/// [`deadline_reached`] rather than `>=`.
pub trait Clock {
    /// Current time in milliseconds
    fn now_ms(&self) -> u32;

    /// Block until `deadline_ms`; returns immediately if it has passed
    fn sleep_until_ms(&mut self, deadline_ms: u32);
}

/// True once `now_ms` is at or after `deadline_ms`, across wraparound
pub const fn deadline_reached(now_ms: u32, deadline_ms: u32) -> bool {
    (now_ms.wrapping_sub(deadline_ms) as i32) >= 0
}

/// Clock advanced by hand, for running the control loop without delays
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now_ms: u32,
    sleeps: u32,
}

impl VirtualClock {
    pub const fn new(start_ms: u32) -> Self {
        Self {
            now_ms: start_ms,
            sleeps: 0,
        }
    }

    /// Move time forward, e.g. to simulate a slow tick
    pub fn advance(&mut self, ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(ms);
    }

    /// Number of waits that actually slept
    pub fn sleeps(&self) -> u32 {
        self.sleeps
    }
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> u32 {
        self.now_ms
    }

    fn sleep_until_ms(&mut self, deadline_ms: u32) {
        if !deadline_reached(self.now_ms, deadline_ms) {
            self.now_ms = deadline_ms;
            self.sleeps += 1;
        }
    }
}
