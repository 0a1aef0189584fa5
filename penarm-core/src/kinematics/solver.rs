//! 2-link inverse and forward kinematics
//!
//! Angle conventions:
//! - `q1` (shoulder) is measured from the positive x axis.
//! - `q2` (elbow) is measured relative to the first link. Only the
//!   elbow-down branch is produced, so `q2` is always in `[-π, 0]`.

use core::fmt;

use super::geometry::{ArmGeometry, CartesianPoint};

/// Why a target cannot be solved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReachError {
    /// Target is further from the base than `l1 + l2`
    OutOfReach,
    /// Target is closer to the base than `|l1 - l2|`
    TooClose,
}

impl fmt::Display for ReachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReachError::OutOfReach => f.write_str("target is out of reach"),
            ReachError::TooClose => f.write_str("target is too close to the base"),
        }
    }
}

/// Which reach bounds the solver enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReachPolicy {
    /// Reject targets outside the annulus `[|l1 - l2|, l1 + l2]`
    #[default]
    Strict,
    /// Reject only targets beyond `l1 + l2`; inner targets fold the elbow fully
    OuterOnly,
}

/// Joint angles in radians
///
/// Only produced by the solver, so every value corresponds to a real pose.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JointAngles {
    q1: f64,
    q2: f64,
}

impl JointAngles {
    pub(crate) const fn new(q1: f64, q2: f64) -> Self {
        Self { q1, q2 }
    }

    /// Shoulder angle (radians)
    pub fn shoulder(&self) -> f64 {
        self.q1
    }

    /// Elbow angle relative to the upper arm (radians)
    pub fn elbow(&self) -> f64 {
        self.q2
    }

    /// Shoulder angle (degrees)
    pub fn shoulder_deg(&self) -> f64 {
        self.q1.to_degrees()
    }

    /// Elbow angle (degrees)
    pub fn elbow_deg(&self) -> f64 {
        self.q2.to_degrees()
    }
}

/// Positions of the elbow joint and the pen tip
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArmPose {
    pub elbow: CartesianPoint,
    pub end_effector: CartesianPoint,
}

/// Solve the joint angles that put the pen on `target`
///
/// Enforces both reach bounds.
pub fn inverse_kinematics(
    target: CartesianPoint,
    geometry: &ArmGeometry,
) -> Result<JointAngles, ReachError> {
    solve(target, geometry, ReachPolicy::Strict)
}

/// Compute the elbow and pen positions for a pair of joint angles
pub fn forward_kinematics(q1: f64, q2: f64, geometry: &ArmGeometry) -> ArmPose {
    let (l1, l2) = (geometry.l1(), geometry.l2());

    let elbow = CartesianPoint::new(l1 * libm::cos(q1), l1 * libm::sin(q1));
    let end_effector = CartesianPoint::new(
        elbow.x + l2 * libm::cos(q1 + q2),
        elbow.y + l2 * libm::sin(q1 + q2),
    );

    ArmPose {
        elbow,
        end_effector,
    }
}

fn solve(
    target: CartesianPoint,
    geometry: &ArmGeometry,
    policy: ReachPolicy,
) -> Result<JointAngles, ReachError> {
    if !target.is_finite() || geometry.is_beyond_reach(target) {
        return Err(ReachError::OutOfReach);
    }
    if policy == ReachPolicy::Strict && geometry.is_too_close(target) {
        return Err(ReachError::TooClose);
    }

    let (l1, l2) = (geometry.l1(), geometry.l2());
    let r2 = target.norm_squared();

    // Law of cosines; clamp absorbs rounding right at the reach boundary
    let cos_beta = ((r2 - l1 * l1 - l2 * l2) / (2.0 * l1 * l2)).clamp(-1.0, 1.0);
    let beta = libm::acos(cos_beta);
    let q2 = -beta;

    // With the elbow folded down the pen sits clockwise of the upper arm,
    // so the shoulder leads the target bearing by the triangle's inner angle.
    let q1 = libm::atan2(target.y, target.x)
        + libm::atan2(l2 * libm::sin(beta), l1 + l2 * libm::cos(beta));

    Ok(JointAngles::new(q1, q2))
}

/// Kinematics bound to one arm
#[derive(Debug, Clone, Copy)]
pub struct KinematicsSolver {
    geometry: ArmGeometry,
    policy: ReachPolicy,
}

impl KinematicsSolver {
    /// Create a solver that enforces both reach bounds
    pub fn new(geometry: ArmGeometry) -> Self {
        Self::with_policy(geometry, ReachPolicy::Strict)
    }

    /// Create a solver with an explicit reach policy
    pub fn with_policy(geometry: ArmGeometry, policy: ReachPolicy) -> Self {
        Self { geometry, policy }
    }

    /// Arm geometry
    pub fn geometry(&self) -> &ArmGeometry {
        &self.geometry
    }

    /// Reach policy
    pub fn policy(&self) -> ReachPolicy {
        self.policy
    }

    /// Solve joint angles for `target`
    pub fn inverse(&self, target: CartesianPoint) -> Result<JointAngles, ReachError> {
        solve(target, &self.geometry, self.policy)
    }

    /// Pose for previously solved angles
    pub fn forward(&self, angles: &JointAngles) -> ArmPose {
        forward_kinematics(angles.q1, angles.q2, &self.geometry)
    }
}
