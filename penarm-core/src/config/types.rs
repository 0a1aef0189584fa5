//! Configuration type definitions
//!
//! [`ArmConfig`] is the whole machine configuration. Defaults describe the
//! reference build: two 155 mm links on SG90-class servos at 50 Hz.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::actuator::{JointTrim, ServoTiming};
use crate::kinematics::ArmGeometry;

/// Default link length for both links (mm)
pub const DEFAULT_LINK_MM: f64 = 155.0;

/// Default control tick period (ms)
pub const DEFAULT_TICK_PERIOD_MS: u32 = 100;

/// Default button debounce window (ms)
pub const DEFAULT_DEBOUNCE_MS: u32 = 300;

/// Link lengths as configured
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeometryConfig {
    /// Shoulder to elbow (mm)
    pub l1_mm: f64,
    /// Elbow to pen (mm)
    pub l2_mm: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            l1_mm: DEFAULT_LINK_MM,
            l2_mm: DEFAULT_LINK_MM,
        }
    }
}

/// Mounting trims and channel options for the arm servos
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JointsConfig {
    pub shoulder: JointTrim,
    pub elbow: JointTrim,
    /// Drive the wrist channel with the shoulder command
    pub mirror_wrist: bool,
}

impl Default for JointsConfig {
    fn default() -> Self {
        Self {
            shoulder: JointTrim::default(),
            elbow: JointTrim::default(),
            mirror_wrist: true,
        }
    }
}

/// Optional pen lift servo
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PenServoConfig {
    /// Drive the pen channel from the pen state
    pub enabled: bool,
    /// Servo angle with the pen on the paper (degrees)
    pub down_deg: f64,
    /// Servo angle with the pen lifted (degrees)
    pub up_deg: f64,
}

impl Default for PenServoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            down_deg: 0.0,
            up_deg: 90.0,
        }
    }
}

/// Control loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlConfig {
    /// Period between control ticks (ms)
    pub tick_period_ms: u32,
    /// Repeated button edges inside this window are ignored (ms)
    pub debounce_ms: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Complete arm configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArmConfig {
    pub geometry: GeometryConfig,
    pub servo: ServoTiming,
    pub joints: JointsConfig,
    pub pen: PenServoConfig,
    pub control: ControlConfig,
}

impl ArmConfig {
    /// Validate every section
    ///
    /// Returns the validated geometry, or the first error found.
    pub fn validate(&self) -> Result<ArmGeometry, ConfigError> {
        let geometry = ArmGeometry::new(self.geometry.l1_mm, self.geometry.l2_mm)?;

        self.servo.validate()?;
        self.joints.shoulder.validate()?;
        self.joints.elbow.validate()?;

        if !(self.pen.down_deg.is_finite() && self.pen.up_deg.is_finite()) {
            return Err(ConfigError::InvalidAngleRange);
        }

        if self.control.tick_period_ms == 0 {
            return Err(ConfigError::InvalidTickPeriod);
        }

        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ArmConfig::default();
        let geometry = config.validate().unwrap();
        assert_eq!(geometry.l1(), 155.0);
        assert_eq!(geometry.l2(), 155.0);
        assert_eq!(config.control.tick_period_ms, 100);
        assert!(config.joints.mirror_wrist);
        assert!(!config.pen.enabled);
    }

    #[test]
    fn test_non_positive_link_is_fatal() {
        let mut config = ArmConfig::default();
        config.geometry.l2_mm = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidLinkLength));
    }

    #[test]
    fn test_zero_tick_period_is_fatal() {
        let mut config = ArmConfig::default();
        config.control.tick_period_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTickPeriod));
    }

    #[test]
    fn test_bad_trim_is_fatal() {
        let mut config = ArmConfig::default();
        config.joints.elbow.offset_deg = f64::NAN;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTrim));
    }

    #[test]
    fn test_bad_pen_angle_is_fatal() {
        let mut config = ArmConfig::default();
        config.pen.up_deg = f64::INFINITY;
        assert_eq!(config.validate(), Err(ConfigError::InvalidAngleRange));
    }

    #[test]
    fn test_servo_errors_propagate() {
        let mut config = ArmConfig::default();
        config.servo.duty_min = 9000;
        assert_eq!(config.validate(), Err(ConfigError::InvalidDutyRange));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_parse_toml() {
        let text = r#"
            [geometry]
            l1_mm = 15.0
            l2_mm = 10.0

            [servo]
            duty_max = 7000

            [joints.elbow]
            offset_deg = 180.0

            [pen]
            enabled = true

            [control]
            tick_period_ms = 50
        "#;

        let config: ArmConfig = toml::from_str(text).unwrap();
        assert_eq!(config.geometry.l1_mm, 15.0);
        assert_eq!(config.servo.duty_max, 7000);
        assert_eq!(config.servo.duty_min, 2300);
        assert_eq!(config.joints.elbow.offset_deg, 180.0);
        assert!(config.joints.mirror_wrist);
        assert!(config.pen.enabled);
        assert_eq!(config.pen.up_deg, 90.0);
        assert_eq!(config.control.tick_period_ms, 50);
        assert_eq!(config.control.debounce_ms, 300);
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: ArmConfig = toml::from_str("").unwrap();
        assert_eq!(config, ArmConfig::default());
    }
}
