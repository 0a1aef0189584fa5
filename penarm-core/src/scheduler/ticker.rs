//! Fixed-period tick deadlines

use super::clock::deadline_reached;

/// Produces the deadline for each control tick
///
/// Deadlines advance by exactly one period so the loop runs at a fixed
/// rate. A tick that finishes after its successor's deadline re-anchors the
/// schedule to `now + period`, so missed ticks are dropped instead of run
/// back to back.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    period_ms: u32,
    deadline_ms: Option<u32>,
    overruns: u32,
}

impl TickScheduler {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            deadline_ms: None,
            overruns: 0,
        }
    }

    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Deadline of the next tick, given the time the current tick finished
    pub fn next_deadline(&mut self, now_ms: u32) -> u32 {
        let candidate = match self.deadline_ms {
            Some(previous) => previous.wrapping_add(self.period_ms),
            None => now_ms.wrapping_add(self.period_ms),
        };

        let deadline = if deadline_reached(now_ms, candidate) {
            self.overruns = self.overruns.saturating_add(1);
            now_ms.wrapping_add(self.period_ms)
        } else {
            candidate
        };

        self.deadline_ms = Some(deadline);
        deadline
    }

    /// Ticks that finished too late to keep the fixed rate
    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    /// Forget the current schedule; the next deadline anchors to `now`
    pub fn reset(&mut self) {
        self.deadline_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rate() {
        let mut ticker = TickScheduler::new(100);
        assert_eq!(ticker.next_deadline(0), 100);
        // Tick work took 30 ms; the rate stays fixed
        assert_eq!(ticker.next_deadline(130), 200);
        assert_eq!(ticker.next_deadline(205), 300);
        assert_eq!(ticker.overruns(), 0);
    }

    #[test]
    fn test_overrun_reanchors_without_burst() {
        let mut ticker = TickScheduler::new(100);
        assert_eq!(ticker.next_deadline(0), 100);
        // Tick starting at 100 ran until 350
        assert_eq!(ticker.next_deadline(350), 450);
        assert_eq!(ticker.overruns(), 1);
        assert_eq!(ticker.next_deadline(460), 550);
    }

    #[test]
    fn test_wraparound() {
        let mut ticker = TickScheduler::new(100);
        let first = ticker.next_deadline(u32::MAX - 50);
        assert_eq!(first, 49);
        assert_eq!(ticker.next_deadline(60), 149);
        assert_eq!(ticker.overruns(), 0);
    }

    #[test]
    fn test_reset() {
        let mut ticker = TickScheduler::new(100);
        ticker.next_deadline(0);
        ticker.reset();
        assert_eq!(ticker.next_deadline(1000), 1100);
    }
}
