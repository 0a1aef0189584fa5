//! Arm control
//!
//! [`Controller`] holds the arm state; [`ControlLoop`] runs it against the
//! hardware traits at a fixed period.

pub mod control_loop;
pub mod controller;

pub use control_loop::{ControlLoop, TickOutcome, TickReport, MAX_EVENTS_PER_TICK};
pub use controller::{Controller, Planned, Solution};
