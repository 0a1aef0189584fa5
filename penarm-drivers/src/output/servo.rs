//! PWM servo outputs
//!
//! Each servo channel is a PWM output running at the servo frame rate.
//! Duty values arrive as fractions of 65535 and are rescaled to the
//! channel's own resolution.

use embedded_hal::pwm::SetDutyCycle;
use penarm_core::actuator::{ActuatorCommand, JointId, DUTY_FULL_SCALE};
use penarm_core::traits::ActuatorSink;

/// Servo channels of the arm
///
/// Shoulder and elbow are always present. Wrist and pen are optional; writes
/// to an absent channel are dropped.
pub struct PwmServoBank<C> {
    shoulder: C,
    elbow: C,
    wrist: Option<C>,
    pen: Option<C>,
    last: [Option<u16>; 4],
}

impl<C: SetDutyCycle> PwmServoBank<C> {
    pub fn new(shoulder: C, elbow: C) -> Self {
        Self {
            shoulder,
            elbow,
            wrist: None,
            pen: None,
            last: [None; 4],
        }
    }

    /// Add a wrist channel
    pub fn with_wrist(mut self, wrist: C) -> Self {
        self.wrist = Some(wrist);
        self
    }

    /// Add a pen lift channel
    pub fn with_pen(mut self, pen: C) -> Self {
        self.pen = Some(pen);
        self
    }

    /// Last duty value written to `joint`
    pub fn last_duty(&self, joint: JointId) -> Option<u16> {
        self.last[index(joint)]
    }

    fn channel(&mut self, joint: JointId) -> Option<&mut C> {
        match joint {
            JointId::Shoulder => Some(&mut self.shoulder),
            JointId::Elbow => Some(&mut self.elbow),
            JointId::Wrist => self.wrist.as_mut(),
            JointId::Pen => self.pen.as_mut(),
        }
    }
}

impl<C: SetDutyCycle> ActuatorSink for PwmServoBank<C> {
    fn set_duty(&mut self, joint: JointId, command: ActuatorCommand) {
        let duty = command.duty();
        let Some(channel) = self.channel(joint) else {
            return;
        };

        // Hardware write failures are outside what the loop can react to
        if channel.set_duty_cycle_fraction(duty, DUTY_FULL_SCALE).is_ok() {
            self.last[index(joint)] = Some(duty);
        }
    }
}

const fn index(joint: JointId) -> usize {
    match joint {
        JointId::Shoulder => 0,
        JointId::Elbow => 1,
        JointId::Wrist => 2,
        JointId::Pen => 3,
    }
}
