//! Arm state aggregate
//!
//! Owns everything the control loop mutates: calibration, pen state,
//! button debouncers and fault counters, together with the solver and
//! mapper built from the validated configuration. Hardware access stays
//! in [`ControlLoop`](super::ControlLoop).

use crate::actuator::{ActuatorCommand, ActuatorMapper, JointCommands};
use crate::boundary::BoundaryClamp;
use crate::config::{ArmConfig, ConfigError, PenServoConfig};
use crate::kinematics::{CartesianPoint, JointAngles, KinematicsSolver, ReachError, ReachPolicy};
use crate::safety::{FaultMonitor, FaultTransition};
use crate::state::{ButtonId, Debouncer, InputEvent, PenState, PenStateMachine};

/// A solved target ready to send to the servos
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Solution {
    /// Target after boundary clamping
    pub target: CartesianPoint,
    pub angles: JointAngles,
    pub commands: JointCommands,
}

/// Outcome of solving one target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Planned {
    Reached(Solution, FaultTransition),
    Faulted {
        target: CartesianPoint,
        error: ReachError,
        transition: FaultTransition,
    },
}

/// Controller state
#[derive(Debug, Clone)]
pub struct Controller {
    solver: KinematicsSolver,
    mapper: ActuatorMapper,
    boundary: BoundaryClamp,
    pen: PenStateMachine,
    debouncers: [Debouncer; 3],
    faults: FaultMonitor,
    mirror_wrist: bool,
    pen_servo: PenServoConfig,
}

impl Controller {
    /// Build a controller from a configuration, validating it first
    pub fn new(config: &ArmConfig) -> Result<Self, ConfigError> {
        Self::with_policy(config, ReachPolicy::Strict)
    }

    /// Build a controller with a non-default reach policy
    pub fn with_policy(config: &ArmConfig, policy: ReachPolicy) -> Result<Self, ConfigError> {
        let geometry = config.validate()?;
        let debouncer = Debouncer::new(config.control.debounce_ms);

        Ok(Self {
            solver: KinematicsSolver::with_policy(geometry, policy),
            mapper: ActuatorMapper::new(config.servo, config.joints.shoulder, config.joints.elbow),
            boundary: BoundaryClamp::new(),
            pen: PenStateMachine::new(),
            debouncers: [debouncer; 3],
            faults: FaultMonitor::new(),
            mirror_wrist: config.joints.mirror_wrist,
            pen_servo: config.pen,
        })
    }

    pub fn solver(&self) -> &KinematicsSolver {
        &self.solver
    }

    pub fn mapper(&self) -> &ActuatorMapper {
        &self.mapper
    }

    pub fn boundary(&self) -> &BoundaryClamp {
        &self.boundary
    }

    pub fn boundary_mut(&mut self) -> &mut BoundaryClamp {
        &mut self.boundary
    }

    pub fn faults(&self) -> &FaultMonitor {
        &self.faults
    }

    pub fn pen_state(&self) -> PenState {
        self.pen.state()
    }

    /// Whether the wrist channel repeats the shoulder command
    pub fn mirror_wrist(&self) -> bool {
        self.mirror_wrist
    }

    /// Clamp, solve and map one raw target, updating the fault counters
    pub fn plan(&mut self, raw: CartesianPoint) -> Planned {
        // Clamping would pin a NaN to the rectangle edge
        let target = if raw.is_finite() {
            self.boundary.clamp(raw)
        } else {
            raw
        };

        match self.solver.inverse(target) {
            Ok(angles) => {
                let commands = self.mapper.map(&angles);
                let transition = self.faults.record_ok();
                Planned::Reached(
                    Solution {
                        target,
                        angles,
                        commands,
                    },
                    transition,
                )
            }
            Err(error) => Planned::Faulted {
                target,
                error,
                transition: self.faults.record_fault(error),
            },
        }
    }

    /// Debounce a polled button level
    pub fn debounce(&mut self, id: ButtonId, pressed: bool, now_ms: u32) -> bool {
        self.debouncers[button_index(id)].update(pressed, now_ms)
    }

    /// Apply an accepted button edge
    ///
    /// Corner buttons capture `raw`, the unclamped reading of this tick.
    pub fn handle_press(&mut self, id: ButtonId, raw: CartesianPoint) -> InputEvent {
        match id.corner_slot() {
            Some(slot) => {
                self.boundary.set_corner(slot, raw);
                InputEvent::CornerCaptured { slot, point: raw }
            }
            None => InputEvent::PenToggled(self.pen.toggle()),
        }
    }

    /// Duty for the pen servo in `state`, if the pen servo is enabled
    pub fn pen_command(&self, state: PenState) -> Option<ActuatorCommand> {
        if !self.pen_servo.enabled {
            return None;
        }
        let angle = match state {
            PenState::Down => self.pen_servo.down_deg,
            PenState::Up => self.pen_servo.up_deg,
        };
        Some(self.mapper.angle_to_duty(angle))
    }

    /// Duty every servo is parked at on shutdown
    pub fn neutral_command(&self) -> ActuatorCommand {
        self.mapper.neutral()
    }
}

const fn button_index(id: ButtonId) -> usize {
    match id {
        ButtonId::Corner1 => 0,
        ButtonId::Corner2 => 1,
        ButtonId::PenToggle => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::CornerSlot;

    fn small_arm() -> ArmConfig {
        let mut config = ArmConfig::default();
        config.geometry.l1_mm = 15.0;
        config.geometry.l2_mm = 10.0;
        config
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ArmConfig::default();
        config.geometry.l1_mm = -1.0;
        assert_eq!(Controller::new(&config).err(), Some(ConfigError::InvalidLinkLength));
    }

    #[test]
    fn test_plan_reachable() {
        let mut controller = Controller::new(&small_arm()).unwrap();
        match controller.plan(CartesianPoint::new(20.0, 0.0)) {
            Planned::Reached(solution, transition) => {
                assert_eq!(transition, FaultTransition::Steady);
                assert!((solution.angles.shoulder_deg() - 28.955).abs() < 1e-3);
                assert!((solution.angles.elbow_deg() + 75.522).abs() < 1e-3);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_plan_fault_and_recovery() {
        let mut controller = Controller::new(&small_arm()).unwrap();

        let planned = controller.plan(CartesianPoint::new(30.0, 0.0));
        assert!(matches!(
            planned,
            Planned::Faulted {
                error: ReachError::OutOfReach,
                transition: FaultTransition::StreakStarted(ReachError::OutOfReach),
                ..
            }
        ));

        let planned = controller.plan(CartesianPoint::new(1.0, 1.0));
        assert!(matches!(
            planned,
            Planned::Faulted {
                error: ReachError::TooClose,
                transition: FaultTransition::Steady,
                ..
            }
        ));

        let planned = controller.plan(CartesianPoint::new(20.0, 0.0));
        assert!(matches!(
            planned,
            Planned::Reached(_, FaultTransition::StreakEnded { skipped: 2 })
        ));
        assert_eq!(controller.faults().total_faults(), 2);
    }

    #[test]
    fn test_clamp_applies_before_solving() {
        let mut controller = Controller::new(&ArmConfig::default()).unwrap();
        controller
            .boundary_mut()
            .set_corner(CornerSlot::First, CartesianPoint::new(-50.0, 0.0));
        controller
            .boundary_mut()
            .set_corner(CornerSlot::Second, CartesianPoint::new(50.0, 100.0));

        // (300, 300) is out of reach but clamps to (50, 100)
        match controller.plan(CartesianPoint::new(300.0, 300.0)) {
            Planned::Reached(solution, _) => {
                assert_eq!(solution.target, CartesianPoint::new(50.0, 100.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_handle_press() {
        let mut controller = Controller::new(&ArmConfig::default()).unwrap();
        let raw = CartesianPoint::new(400.0, -20.0);

        assert_eq!(
            controller.handle_press(ButtonId::Corner2, raw),
            InputEvent::CornerCaptured {
                slot: CornerSlot::Second,
                point: raw
            }
        );
        assert_eq!(controller.boundary().corner(CornerSlot::Second), Some(raw));

        assert_eq!(
            controller.handle_press(ButtonId::PenToggle, raw),
            InputEvent::PenToggled(PenState::Up)
        );
        assert_eq!(controller.pen_state(), PenState::Up);
    }

    #[test]
    fn test_debouncers_are_independent() {
        let mut controller = Controller::new(&ArmConfig::default()).unwrap();
        assert!(controller.debounce(ButtonId::Corner1, true, 0));
        assert!(controller.debounce(ButtonId::PenToggle, true, 10));
        assert!(!controller.debounce(ButtonId::Corner1, true, 20));
    }

    #[test]
    fn test_pen_command() {
        let controller = Controller::new(&ArmConfig::default()).unwrap();
        assert_eq!(controller.pen_command(PenState::Up), None);

        let mut config = ArmConfig::default();
        config.pen.enabled = true;
        let controller = Controller::new(&config).unwrap();
        assert_eq!(controller.pen_command(PenState::Down).map(|c| c.duty()), Some(2300));
        assert_eq!(controller.pen_command(PenState::Up).map(|c| c.duty()), Some(4915));
        assert_eq!(controller.neutral_command().duty(), 4915);
    }
}
