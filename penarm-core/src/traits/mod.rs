//! Hardware abstraction traits
//!
//! These traits define the interface between the control loop and
//! hardware-specific implementations.

pub mod input;
pub mod output;

#[cfg(test)]
pub(crate) mod fakes;

pub use input::{ButtonSource, CoordinateSource};
pub use output::{ActuatorSink, IndicatorId, IndicatorSink};
