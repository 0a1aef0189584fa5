//! Arm geometry and reach predicates
//!
//! The arm is a planar 2-link chain rooted at the origin. Its reach is the
//! annulus between `|l1 - l2|` and `l1 + l2`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Slack applied to both reach bounds (mm)
///
/// Points placed exactly on a boundary by trigonometry can land one ulp
/// outside it; they are still treated as reachable.
pub const REACH_TOLERANCE_MM: f64 = 1e-9;

/// Cartesian point in millimetres, relative to the arm base
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
}

impl CartesianPoint {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The arm base
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Squared distance from the base
    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Distance from the base
    pub fn norm(&self) -> f64 {
        libm::sqrt(self.norm_squared())
    }

    /// True if neither coordinate is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Linear interpolation towards `other` (`t = 0` is `self`, `t = 1` is `other`)
    pub fn lerp(&self, other: CartesianPoint, t: f64) -> CartesianPoint {
        CartesianPoint {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl From<(f64, f64)> for CartesianPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Link lengths of the arm (mm)
///
/// Both lengths are strictly positive and finite; the only way to obtain
/// one is through [`ArmGeometry::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArmGeometry {
    l1: f64,
    l2: f64,
}

impl ArmGeometry {
    /// Create a geometry, rejecting non-positive or non-finite lengths
    pub fn new(l1: f64, l2: f64) -> Result<Self, ConfigError> {
        if !(l1.is_finite() && l2.is_finite() && l1 > 0.0 && l2 > 0.0) {
            return Err(ConfigError::InvalidLinkLength);
        }
        Ok(Self { l1, l2 })
    }

    /// Upper arm (shoulder to elbow) length
    pub fn l1(&self) -> f64 {
        self.l1
    }

    /// Forearm (elbow to pen) length
    pub fn l2(&self) -> f64 {
        self.l2
    }

    /// Inner radius of the reachable annulus
    pub fn min_reach(&self) -> f64 {
        let d = self.l1 - self.l2;
        if d < 0.0 {
            -d
        } else {
            d
        }
    }

    /// Outer radius of the reachable annulus
    pub fn max_reach(&self) -> f64 {
        self.l1 + self.l2
    }

    /// Distance of `point` from the base
    pub fn reach_of(&self, point: CartesianPoint) -> f64 {
        point.norm()
    }

    /// True if `point` lies beyond the outer radius
    ///
    /// A point with a NaN coordinate has no distance and counts as beyond.
    pub fn is_beyond_reach(&self, point: CartesianPoint) -> bool {
        let r = point.norm();
        r.is_nan() || r > self.max_reach() + REACH_TOLERANCE_MM
    }

    /// True if `point` lies inside the inner radius
    pub fn is_too_close(&self, point: CartesianPoint) -> bool {
        point.norm() < self.min_reach() - REACH_TOLERANCE_MM
    }

    /// True if `point` lies in the closed reachable annulus
    pub fn is_reachable(&self, point: CartesianPoint) -> bool {
        !self.is_beyond_reach(point) && !self.is_too_close(point)
    }
}
