//! Drawing boundary calibration

pub mod clamp;

pub use clamp::{BoundaryClamp, CalibrationRegion, CornerSlot, Rect};
