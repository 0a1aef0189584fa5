//! Servo channel mapping
//!
//! Converts solved joint angles into clamped 16-bit duty values.

pub mod mapper;

pub use mapper::{
    angle_to_duty, ActuatorCommand, ActuatorMapper, JointCommands, JointTrim, ServoTiming,
    DUTY_FULL_SCALE, DUTY_MAX, DUTY_MIN,
};

/// Servo channels driven by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JointId {
    /// First link, rotates about the base
    Shoulder,
    /// Second link, rotates about the elbow
    Elbow,
    /// Wrist channel; mirrors the shoulder command when enabled
    Wrist,
    /// Pen lift servo
    Pen,
}

impl JointId {
    /// All channels, in wiring order
    pub const ALL: [JointId; 4] = [JointId::Shoulder, JointId::Elbow, JointId::Wrist, JointId::Pen];
}
