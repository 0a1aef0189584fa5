//! Configuration errors
//!
//! Any of these is fatal: the control loop refuses to start.

use core::fmt;

/// Invalid configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A link length is zero, negative, or not finite
    InvalidLinkLength,
    /// Servo minimum pulse is not below the maximum pulse
    InvalidPulseRange,
    /// PWM period is zero or shorter than the maximum pulse
    InvalidPeriod,
    /// Lower duty clamp is above the upper duty clamp
    InvalidDutyRange,
    /// Servo angle range or a configured angle is not usable
    InvalidAngleRange,
    /// Control tick period is zero
    InvalidTickPeriod,
    /// Joint trim offset is not finite
    InvalidTrim,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::InvalidLinkLength => "link lengths must be positive and finite",
            ConfigError::InvalidPulseRange => "servo min pulse must be below max pulse",
            ConfigError::InvalidPeriod => "PWM period must cover the max pulse",
            ConfigError::InvalidDutyRange => "duty_min must not exceed duty_max",
            ConfigError::InvalidAngleRange => "servo angles must be finite and range positive",
            ConfigError::InvalidTickPeriod => "tick period must be non-zero",
            ConfigError::InvalidTrim => "joint trim offset must be finite",
        };
        f.write_str(msg)
    }
}
