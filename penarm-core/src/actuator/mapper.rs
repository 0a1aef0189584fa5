//! Joint angle to servo duty mapping
//!
//! Degrees map linearly onto a pulse width, the pulse width becomes a
//! fraction of the PWM period, and that fraction is scaled to a 16-bit duty
//! value. The result is always clamped into `[duty_min, duty_max]`; the
//! clamp is a hard bound of the physical servos, independent of the linear
//! formula.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::kinematics::JointAngles;

/// Full scale of a 16-bit duty value
pub const DUTY_FULL_SCALE: u16 = u16::MAX;

/// Lowest duty value the servos tolerate
pub const DUTY_MIN: u16 = 2300;

/// Highest duty value the servos tolerate
pub const DUTY_MAX: u16 = 7500;

/// Pulse width at 0° (microseconds)
pub const MIN_PULSE_US: u16 = 500;

/// Pulse width at full range (microseconds)
pub const MAX_PULSE_US: u16 = 2500;

/// PWM period for 50 Hz position servos (microseconds)
pub const PERIOD_US: u32 = 20_000;

/// Servo travel covered by the pulse range (degrees)
pub const RANGE_DEG: f64 = 180.0;

/// A clamped 16-bit duty value for one servo channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorCommand(u16);

impl ActuatorCommand {
    /// Duty value as written to the PWM channel
    pub const fn duty(self) -> u16 {
        self.0
    }
}

/// Servo pulse timing and safe duty window
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ServoTiming {
    /// Pulse width at 0° (µs)
    pub min_pulse_us: u16,
    /// Pulse width at `range_deg` (µs)
    pub max_pulse_us: u16,
    /// PWM period (µs), 20000 for 50 Hz
    pub period_us: u32,
    /// Angle covered by the pulse range (degrees)
    pub range_deg: f64,
    /// Lower duty clamp
    pub duty_min: u16,
    /// Upper duty clamp
    pub duty_max: u16,
    /// Angle every channel is parked at on shutdown (degrees)
    pub neutral_deg: f64,
}

impl Default for ServoTiming {
    fn default() -> Self {
        Self {
            min_pulse_us: MIN_PULSE_US,
            max_pulse_us: MAX_PULSE_US,
            period_us: PERIOD_US,
            range_deg: RANGE_DEG,
            duty_min: DUTY_MIN,
            duty_max: DUTY_MAX,
            neutral_deg: 90.0,
        }
    }
}

impl ServoTiming {
    /// Check the timing is physically meaningful
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_pulse_us >= self.max_pulse_us {
            return Err(ConfigError::InvalidPulseRange);
        }
        if self.period_us == 0 || self.max_pulse_us as u32 > self.period_us {
            return Err(ConfigError::InvalidPeriod);
        }
        if self.duty_min > self.duty_max {
            return Err(ConfigError::InvalidDutyRange);
        }
        if !(self.range_deg.is_finite() && self.range_deg > 0.0) || !self.neutral_deg.is_finite()
        {
            return Err(ConfigError::InvalidAngleRange);
        }
        Ok(())
    }

    /// PWM frequency implied by the period (Hz)
    pub fn frequency_hz(&self) -> u32 {
        1_000_000 / self.period_us.max(1)
    }

    /// Linear pulse width for `angle_deg`, before any clamping (µs)
    pub fn pulse_us(&self, angle_deg: f64) -> f64 {
        let span = self.max_pulse_us as f64 - self.min_pulse_us as f64;
        self.min_pulse_us as f64 + span * angle_deg / self.range_deg
    }

    /// Map an angle in degrees to a clamped duty value
    ///
    /// Angles outside the servo range are clamped, never rejected.
    pub fn angle_to_duty(&self, angle_deg: f64) -> ActuatorCommand {
        let fraction = self.pulse_us(angle_deg) / self.period_us as f64;
        let raw = fraction * DUTY_FULL_SCALE as f64;

        // `max` discards NaN, so a NaN angle resolves to duty_min
        let clamped = raw.max(self.duty_min as f64).min(self.duty_max as f64);

        // Truncates toward zero
        ActuatorCommand(clamped as u16)
    }

    /// Angle a duty value corresponds to on the linear map (degrees)
    pub fn duty_to_angle(&self, duty: u16) -> f64 {
        let pulse = duty as f64 / DUTY_FULL_SCALE as f64 * self.period_us as f64;
        let span = self.max_pulse_us as f64 - self.min_pulse_us as f64;
        (pulse - self.min_pulse_us as f64) * self.range_deg / span
    }
}

/// Map an angle in degrees to a clamped duty value using the default timing
pub fn angle_to_duty(angle_deg: f64) -> ActuatorCommand {
    ServoTiming::default().angle_to_duty(angle_deg)
}

/// Mounting correction between a kinematic angle and the servo horn
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JointTrim {
    /// Added after the optional inversion (degrees)
    pub offset_deg: f64,
    /// Servo turns against the kinematic angle
    pub inverted: bool,
}

impl JointTrim {
    /// Servo angle for a kinematic angle
    pub fn apply(&self, angle_deg: f64) -> f64 {
        let signed = if self.inverted { -angle_deg } else { angle_deg };
        signed + self.offset_deg
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.offset_deg.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::InvalidTrim)
        }
    }
}

/// Duty values for the two kinematic joints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JointCommands {
    pub shoulder: ActuatorCommand,
    pub elbow: ActuatorCommand,
}

/// Converts solved joint angles into servo commands
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActuatorMapper {
    timing: ServoTiming,
    shoulder: JointTrim,
    elbow: JointTrim,
}

impl ActuatorMapper {
    /// Create a mapper with per-joint trims
    pub fn new(timing: ServoTiming, shoulder: JointTrim, elbow: JointTrim) -> Self {
        Self {
            timing,
            shoulder,
            elbow,
        }
    }

    /// Servo timing in use
    pub fn timing(&self) -> &ServoTiming {
        &self.timing
    }

    /// Map a bare angle (no trim) to a duty value
    pub fn angle_to_duty(&self, angle_deg: f64) -> ActuatorCommand {
        self.timing.angle_to_duty(angle_deg)
    }

    /// Map solved joint angles to shoulder and elbow commands
    pub fn map(&self, angles: &JointAngles) -> JointCommands {
        JointCommands {
            shoulder: self
                .timing
                .angle_to_duty(self.shoulder.apply(angles.shoulder_deg())),
            elbow: self.timing.angle_to_duty(self.elbow.apply(angles.elbow_deg())),
        }
    }

    /// Duty every channel is parked at on shutdown
    pub fn neutral(&self) -> ActuatorCommand {
        self.timing.angle_to_duty(self.timing.neutral_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_angles() {
        assert_eq!(angle_to_duty(0.0).duty(), 2300);
        assert_eq!(angle_to_duty(30.0).duty(), 2730);
        assert_eq!(angle_to_duty(45.0).duty(), 3276);
        assert_eq!(angle_to_duty(60.0).duty(), 3822);
        assert_eq!(angle_to_duty(90.0).duty(), 4915);
        assert_eq!(angle_to_duty(135.0).duty(), 6553);
    }

    #[test]
    fn test_full_range_is_clamped() {
        // Unclamped formula gives 8191 at 180°, above the safe window
        let timing = ServoTiming::default();
        let raw = timing.pulse_us(180.0) / timing.period_us as f64 * DUTY_FULL_SCALE as f64;
        assert!(raw > DUTY_MAX as f64);
        assert_eq!(angle_to_duty(180.0).duty(), DUTY_MAX);
    }

    #[test]
    fn test_out_of_range_angles_clamp() {
        assert_eq!(angle_to_duty(-90.0).duty(), DUTY_MIN);
        assert_eq!(angle_to_duty(720.0).duty(), DUTY_MAX);
        assert_eq!(angle_to_duty(f64::NEG_INFINITY).duty(), DUTY_MIN);
        assert_eq!(angle_to_duty(f64::INFINITY).duty(), DUTY_MAX);
        assert_eq!(angle_to_duty(f64::NAN).duty(), DUTY_MIN);
    }

    #[test]
    fn test_duty_to_angle_inverts_linear_map() {
        let timing = ServoTiming::default();
        let duty = timing.angle_to_duty(90.0).duty();
        assert!((timing.duty_to_angle(duty) - 90.0).abs() < 0.1);
    }

    #[test]
    fn test_frequency() {
        assert_eq!(ServoTiming::default().frequency_hz(), 50);
    }

    #[test]
    fn test_timing_validation() {
        assert!(ServoTiming::default().validate().is_ok());

        let reversed = ServoTiming {
            min_pulse_us: 2500,
            max_pulse_us: 500,
            ..Default::default()
        };
        assert_eq!(reversed.validate(), Err(ConfigError::InvalidPulseRange));

        let short_period = ServoTiming {
            period_us: 2000,
            ..Default::default()
        };
        assert_eq!(short_period.validate(), Err(ConfigError::InvalidPeriod));

        let bad_window = ServoTiming {
            duty_min: 8000,
            ..Default::default()
        };
        assert_eq!(bad_window.validate(), Err(ConfigError::InvalidDutyRange));

        let zero_range = ServoTiming {
            range_deg: 0.0,
            ..Default::default()
        };
        assert_eq!(zero_range.validate(), Err(ConfigError::InvalidAngleRange));
    }

    #[test]
    fn test_trim() {
        let trim = JointTrim {
            offset_deg: 180.0,
            inverted: false,
        };
        assert_eq!(trim.apply(-75.0), 105.0);

        let inverted = JointTrim {
            offset_deg: 90.0,
            inverted: true,
        };
        assert_eq!(inverted.apply(30.0), 60.0);

        assert_eq!(JointTrim::default().apply(42.0), 42.0);
    }

    #[test]
    fn test_mapper_defaults_to_untrimmed() {
        let mapper = ActuatorMapper::default();
        let angles = JointAngles::new(45f64.to_radians(), -30f64.to_radians());
        let cmds = mapper.map(&angles);

        assert_eq!(cmds.shoulder, angle_to_duty(45.0));
        // Elbow-down angles are negative and land on the lower clamp
        assert_eq!(cmds.elbow.duty(), DUTY_MIN);
        assert_eq!(mapper.neutral().duty(), 4915);
    }

    #[test]
    fn test_mapper_applies_trim() {
        let elbow = JointTrim {
            offset_deg: 180.0,
            inverted: false,
        };
        let mapper = ActuatorMapper::new(ServoTiming::default(), JointTrim::default(), elbow);
        let angles = JointAngles::new(0.0, -90f64.to_radians());

        assert_eq!(mapper.map(&angles).elbow, angle_to_duty(90.0));
    }

    proptest! {
        #[test]
        fn prop_duty_always_in_safe_window(angle in proptest::num::f64::ANY) {
            let duty = angle_to_duty(angle).duty();
            prop_assert!((DUTY_MIN..=DUTY_MAX).contains(&duty));
        }

        #[test]
        fn prop_duty_is_monotonic(a in -360.0f64..360.0, b in -360.0f64..360.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(angle_to_duty(lo) <= angle_to_duty(hi));
        }
    }
}
