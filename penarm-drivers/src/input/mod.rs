//! Operator input drivers

pub mod buttons;
pub mod knobs;

pub use buttons::GpioButtons;
pub use knobs::{AdcReader, AxisMapping, KnobAxis, KnobSource, ADC_FULL_SCALE};
