//! Reach fault monitor
//!
//! Tracks unreachable-target faults reported by the control loop so a run
//! of failing ticks is logged once at its start and once at its end.

use crate::kinematics::ReachError;

/// Streak transition caused by one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultTransition {
    /// No change: still healthy, or still inside a streak
    Steady,
    /// First fault after a healthy tick
    StreakStarted(ReachError),
    /// First healthy tick after a streak of `skipped` faulted ticks
    StreakEnded { skipped: u32 },
}

/// Fault counters for the control loop
#[derive(Debug, Clone, Default)]
pub struct FaultMonitor {
    /// Faults seen since start
    total_faults: u32,
    /// Consecutive faulted ticks, zero while healthy
    streak: u32,
    /// Most recent fault kind
    last_fault: Option<ReachError>,
}

impl FaultMonitor {
    /// Create a new fault monitor
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a faulted tick
    pub fn record_fault(&mut self, error: ReachError) -> FaultTransition {
        self.total_faults = self.total_faults.saturating_add(1);
        self.last_fault = Some(error);
        self.streak = self.streak.saturating_add(1);

        if self.streak == 1 {
            FaultTransition::StreakStarted(error)
        } else {
            FaultTransition::Steady
        }
    }

    /// Record a tick that reached its target
    pub fn record_ok(&mut self) -> FaultTransition {
        let skipped = core::mem::take(&mut self.streak);
        if skipped > 0 {
            FaultTransition::StreakEnded { skipped }
        } else {
            FaultTransition::Steady
        }
    }

    /// True while the most recent tick faulted
    pub fn in_fault(&self) -> bool {
        self.streak > 0
    }

    pub fn total_faults(&self) -> u32 {
        self.total_faults
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_fault(&self) -> Option<ReachError> {
        self.last_fault
    }
}
