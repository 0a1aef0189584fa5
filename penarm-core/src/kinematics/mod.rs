//! Arm geometry and 2-link kinematics
//!
//! Pure functions over an [`ArmGeometry`]; nothing here touches hardware.

pub mod geometry;
pub mod solver;

pub use geometry::{ArmGeometry, CartesianPoint, REACH_TOLERANCE_MM};
pub use solver::{
    forward_kinematics, inverse_kinematics, ArmPose, JointAngles, KinematicsSolver, ReachError,
    ReachPolicy,
};
