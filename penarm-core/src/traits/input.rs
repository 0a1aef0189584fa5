//! Operator input traits

use crate::kinematics::CartesianPoint;
use crate::state::ButtonId;

/// Source of the commanded pen position
///
/// Polled once per control tick. Implementations may be backed by knobs,
/// a joystick, a UI slider or a precomputed path.
pub trait CoordinateSource {
    /// Current target in millimetres, relative to the arm base
    fn read(&mut self) -> CartesianPoint;
}

/// Polled button levels
///
/// Edges are derived by the control loop; implementations report levels
/// only.
pub trait ButtonSource {
    /// True while the button is held down
    fn is_pressed(&mut self, id: ButtonId) -> bool;
}

impl<T: CoordinateSource + ?Sized> CoordinateSource for &mut T {
    fn read(&mut self) -> CartesianPoint {
        T::read(self)
    }
}

impl<T: ButtonSource + ?Sized> ButtonSource for &mut T {
    fn is_pressed(&mut self, id: ButtonId) -> bool {
        T::is_pressed(self, id)
    }
}
