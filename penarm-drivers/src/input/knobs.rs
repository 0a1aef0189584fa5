//! Potentiometer coordinate source
//!
//! Two knobs on ADC channels set the pen target directly. Each reading is
//! mapped linearly from the 16-bit ADC range onto millimetres.

use penarm_core::kinematics::CartesianPoint;
use penarm_core::traits::CoordinateSource;

/// Full scale of a normalized ADC reading
pub const ADC_FULL_SCALE: u16 = u16::MAX;

/// Knob axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KnobAxis {
    X,
    Y,
}

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read one knob, scaled to the full 16-bit range (0-65535)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self, axis: KnobAxis) -> Result<u16, ()>;
}

/// Linear map from a 16-bit reading to a coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisMapping {
    /// Coordinate at reading 0 (mm)
    pub at_zero_mm: f64,
    /// Coordinate at full scale (mm)
    pub at_full_mm: f64,
}

impl AxisMapping {
    pub const fn new(at_zero_mm: f64, at_full_mm: f64) -> Self {
        Self {
            at_zero_mm,
            at_full_mm,
        }
    }

    /// X knob sweeping `+reach` to `-reach`
    pub const fn x_for_reach(reach_mm: f64) -> Self {
        Self::new(reach_mm, -reach_mm)
    }

    /// Y knob sweeping `+reach` down to the base line
    pub const fn y_for_reach(reach_mm: f64) -> Self {
        Self::new(reach_mm, 0.0)
    }

    /// Coordinate for a raw reading
    pub fn map(&self, raw: u16) -> f64 {
        let t = raw as f64 / ADC_FULL_SCALE as f64;
        self.at_zero_mm + (self.at_full_mm - self.at_zero_mm) * t
    }
}

/// Coordinate source backed by two knobs
///
/// A failed read keeps the last good value for that axis. Before the first
/// good read an axis reports 0 mm.
pub struct KnobSource<R> {
    adc: R,
    x: AxisMapping,
    y: AxisMapping,
    last: CartesianPoint,
}

impl<R: AdcReader> KnobSource<R> {
    /// Knobs spanning the full reach of an arm
    pub fn new(adc: R, reach_mm: f64) -> Self {
        Self::with_mappings(
            adc,
            AxisMapping::x_for_reach(reach_mm),
            AxisMapping::y_for_reach(reach_mm),
        )
    }

    pub fn with_mappings(adc: R, x: AxisMapping, y: AxisMapping) -> Self {
        Self {
            adc,
            x,
            y,
            last: CartesianPoint::origin(),
        }
    }

    /// Last position reported
    pub fn last(&self) -> CartesianPoint {
        self.last
    }

    pub fn release(self) -> R {
        self.adc
    }
}

impl<R: AdcReader> CoordinateSource for KnobSource<R> {
    fn read(&mut self) -> CartesianPoint {
        if let Ok(raw) = self.adc.read(KnobAxis::X) {
            self.last.x = self.x.map(raw);
        }
        if let Ok(raw) = self.adc.read(KnobAxis::Y) {
            self.last.y = self.y.map(raw);
        }
        self.last
    }
}
