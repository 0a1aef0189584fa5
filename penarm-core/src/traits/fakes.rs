//! In-memory trait implementations for tests

use super::{ActuatorSink, ButtonSource, CoordinateSource, IndicatorId, IndicatorSink};
use crate::actuator::{ActuatorCommand, JointId};
use crate::kinematics::CartesianPoint;
use crate::state::ButtonId;

/// Returns a fixed point until changed
#[derive(Debug, Default)]
pub struct FixedSource {
    pub point: CartesianPoint,
    pub reads: u32,
}

impl FixedSource {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            point: CartesianPoint::new(x, y),
            reads: 0,
        }
    }
}

impl CoordinateSource for FixedSource {
    fn read(&mut self) -> CartesianPoint {
        self.reads += 1;
        self.point
    }
}

/// Buttons whose levels are set by the test
#[derive(Debug, Default)]
pub struct FakeButtons {
    held: [bool; 3],
}

impl FakeButtons {
    fn slot(id: ButtonId) -> usize {
        match id {
            ButtonId::Corner1 => 0,
            ButtonId::Corner2 => 1,
            ButtonId::PenToggle => 2,
        }
    }

    pub fn set(&mut self, id: ButtonId, pressed: bool) {
        self.held[Self::slot(id)] = pressed;
    }
}

impl ButtonSource for FakeButtons {
    fn is_pressed(&mut self, id: ButtonId) -> bool {
        self.held[Self::slot(id)]
    }
}

/// Records every duty write
#[derive(Debug, Default)]
pub struct RecordingActuators {
    pub writes: Vec<(JointId, u16)>,
}

impl RecordingActuators {
    /// Most recent duty written to `joint`
    pub fn last(&self, joint: JointId) -> Option<u16> {
        self.writes
            .iter()
            .rev()
            .find(|(j, _)| *j == joint)
            .map(|(_, duty)| *duty)
    }
}

impl ActuatorSink for RecordingActuators {
    fn set_duty(&mut self, joint: JointId, command: ActuatorCommand) {
        self.writes.push((joint, command.duty()));
    }
}

/// Records indicator levels
#[derive(Debug, Default)]
pub struct RecordingIndicators {
    pub writes: Vec<(IndicatorId, bool)>,
}

impl RecordingIndicators {
    /// Current level of `id`, if it was ever written
    pub fn level(&self, id: IndicatorId) -> Option<bool> {
        self.writes
            .iter()
            .rev()
            .find(|(i, _)| *i == id)
            .map(|(_, on)| *on)
    }
}

impl IndicatorSink for RecordingIndicators {
    fn set_state(&mut self, id: IndicatorId, on: bool) {
        self.writes.push((id, on));
    }
}
