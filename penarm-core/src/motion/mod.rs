//! Motion primitives
//!
//! Straight-line sampling between targets. Points are produced in
//! Cartesian space; each one is solved independently by the control loop.

pub mod line;

pub use line::{LineSampler, LineSource, DEFAULT_LINE_STEPS};
