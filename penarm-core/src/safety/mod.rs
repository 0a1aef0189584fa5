//! Safety monitoring
//!
//! Counts reach faults and detects the start and end of fault streaks.

pub mod monitor;

pub use monitor::{FaultMonitor, FaultTransition};
