//! Servo and indicator output traits

use crate::actuator::{ActuatorCommand, JointId};

/// Status LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorId {
    /// Lit while the pen is lifted
    Pen,
    /// Lit once the first corner is captured
    Corner1,
    /// Lit once the second corner is captured
    Corner2,
}

impl IndicatorId {
    pub const ALL: [IndicatorId; 3] = [IndicatorId::Pen, IndicatorId::Corner1, IndicatorId::Corner2];
}

/// Servo PWM outputs
///
/// Fire and forget: a write is assumed to succeed.
pub trait ActuatorSink {
    /// Write a clamped duty value to a servo channel
    fn set_duty(&mut self, joint: JointId, command: ActuatorCommand);
}

/// On/off indicators
pub trait IndicatorSink {
    fn set_state(&mut self, id: IndicatorId, on: bool);
}

impl<T: ActuatorSink + ?Sized> ActuatorSink for &mut T {
    fn set_duty(&mut self, joint: JointId, command: ActuatorCommand) {
        T::set_duty(self, joint, command)
    }
}

impl<T: IndicatorSink + ?Sized> IndicatorSink for &mut T {
    fn set_state(&mut self, id: IndicatorId, on: bool) {
        T::set_state(self, id, on)
    }
}
