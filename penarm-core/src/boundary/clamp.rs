//! Calibrated drawing boundary
//!
//! Two corner captures define an axis-aligned rectangle. Until both are
//! set, clamping passes points through unchanged.

use crate::kinematics::CartesianPoint;

/// Corner storage slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CornerSlot {
    First,
    Second,
}

impl CornerSlot {
    const fn index(self) -> usize {
        match self {
            CornerSlot::First => 0,
            CornerSlot::Second => 1,
        }
    }
}

/// Axis-aligned rectangle with normalized bounds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub min: CartesianPoint,
    pub max: CartesianPoint,
}

impl Rect {
    /// Rectangle spanned by two opposite corners, in either order
    pub fn from_corners(a: CartesianPoint, b: CartesianPoint) -> Self {
        Self {
            min: CartesianPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: CartesianPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Constrain `point` component-wise into the rectangle
    pub fn clamp(&self, point: CartesianPoint) -> CartesianPoint {
        CartesianPoint::new(
            point.x.max(self.min.x).min(self.max.x),
            point.y.max(self.min.y).min(self.max.y),
        )
    }

    /// True if `point` lies inside or on the edge
    pub fn contains(&self, point: CartesianPoint) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Pair of optional corner captures
///
/// Volatile: lost on restart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationRegion {
    corners: [Option<CartesianPoint>; 2],
}

impl CalibrationRegion {
    pub const fn new() -> Self {
        Self { corners: [None; 2] }
    }

    /// Rectangle defined by the two corners, once both are set
    pub fn rect(&self) -> Option<Rect> {
        match self.corners {
            [Some(a), Some(b)] => Some(Rect::from_corners(a, b)),
            _ => None,
        }
    }
}

/// Boundary clamp over a [`CalibrationRegion`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundaryClamp {
    region: CalibrationRegion,
}

impl BoundaryClamp {
    pub const fn new() -> Self {
        Self {
            region: CalibrationRegion::new(),
        }
    }

    /// Record a corner; the last write to a slot wins
    pub fn set_corner(&mut self, slot: CornerSlot, point: CartesianPoint) {
        self.region.corners[slot.index()] = Some(point);
    }

    /// Corner recorded in `slot`, if any
    pub fn corner(&self, slot: CornerSlot) -> Option<CartesianPoint> {
        self.region.corners[slot.index()]
    }

    /// True once both corners are set
    pub fn is_calibrated(&self) -> bool {
        self.region.rect().is_some()
    }

    /// The active rectangle, if calibrated
    pub fn region(&self) -> Option<Rect> {
        self.region.rect()
    }

    /// Constrain `point` to the rectangle, or pass it through if uncalibrated
    pub fn clamp(&self, point: CartesianPoint) -> CartesianPoint {
        match self.region.rect() {
            Some(rect) => rect.clamp(point),
            None => point,
        }
    }

    /// True if `point` is inside the rectangle; always true if uncalibrated
    pub fn contains(&self, point: CartesianPoint) -> bool {
        self.region.rect().map_or(true, |rect| rect.contains(point))
    }

    /// Forget both corners
    pub fn clear(&mut self) {
        self.region = CalibrationRegion::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> CartesianPoint {
        CartesianPoint::new(x, y)
    }

    #[test]
    fn test_uncalibrated_passes_through() {
        let mut clamp = BoundaryClamp::new();
        assert_eq!(clamp.clamp(p(200.0, -300.0)), p(200.0, -300.0));

        clamp.set_corner(CornerSlot::First, p(0.0, 0.0));
        assert!(!clamp.is_calibrated());
        assert_eq!(clamp.clamp(p(200.0, -300.0)), p(200.0, -300.0));
        assert!(clamp.contains(p(1e6, 1e6)));
    }

    #[test]
    fn test_clamp_scenario_both_orders() {
        let mut forward = BoundaryClamp::new();
        forward.set_corner(CornerSlot::First, p(-50.0, 0.0));
        forward.set_corner(CornerSlot::Second, p(50.0, 100.0));

        let mut reverse = BoundaryClamp::new();
        reverse.set_corner(CornerSlot::First, p(50.0, 100.0));
        reverse.set_corner(CornerSlot::Second, p(-50.0, 0.0));

        assert_eq!(forward.clamp(p(200.0, 200.0)), p(50.0, 100.0));
        assert_eq!(reverse.clamp(p(200.0, 200.0)), p(50.0, 100.0));
        assert_eq!(forward.clamp(p(-200.0, -5.0)), p(-50.0, 0.0));
        assert_eq!(forward.clamp(p(10.0, 20.0)), p(10.0, 20.0));
    }

    #[test]
    fn test_last_write_wins() {
        let mut clamp = BoundaryClamp::new();
        clamp.set_corner(CornerSlot::First, p(0.0, 0.0));
        clamp.set_corner(CornerSlot::First, p(10.0, 10.0));
        assert_eq!(clamp.corner(CornerSlot::First), Some(p(10.0, 10.0)));
        assert_eq!(clamp.corner(CornerSlot::Second), None);
    }

    #[test]
    fn test_region_and_clear() {
        let mut clamp = BoundaryClamp::new();
        clamp.set_corner(CornerSlot::Second, p(30.0, 40.0));
        clamp.set_corner(CornerSlot::First, p(-10.0, 60.0));

        let rect = clamp.region().unwrap();
        assert_eq!(rect.min, p(-10.0, 40.0));
        assert_eq!(rect.max, p(30.0, 60.0));
        assert_eq!(rect.width(), 40.0);
        assert_eq!(rect.height(), 20.0);
        assert!(clamp.contains(p(0.0, 50.0)));
        assert!(!clamp.contains(p(0.0, 70.0)));

        clamp.clear();
        assert!(!clamp.is_calibrated());
        assert_eq!(clamp.region(), None);
        assert_eq!(clamp.corner(CornerSlot::Second), None);
    }

    #[test]
    fn test_degenerate_rectangle() {
        let mut clamp = BoundaryClamp::new();
        clamp.set_corner(CornerSlot::First, p(5.0, 5.0));
        clamp.set_corner(CornerSlot::Second, p(5.0, 5.0));
        assert_eq!(clamp.clamp(p(-100.0, 100.0)), p(5.0, 5.0));
    }

    fn coord() -> impl Strategy<Value = f64> {
        -500.0f64..500.0
    }

    proptest! {
        #[test]
        fn prop_clamp_order_independent(
            ax in coord(), ay in coord(), bx in coord(), by in coord(),
            x in coord(), y in coord(),
        ) {
            let mut one = BoundaryClamp::new();
            one.set_corner(CornerSlot::First, p(ax, ay));
            one.set_corner(CornerSlot::Second, p(bx, by));

            let mut two = BoundaryClamp::new();
            two.set_corner(CornerSlot::First, p(bx, by));
            two.set_corner(CornerSlot::Second, p(ax, ay));

            prop_assert_eq!(one.clamp(p(x, y)), two.clamp(p(x, y)));
        }

        #[test]
        fn prop_clamp_idempotent(
            ax in coord(), ay in coord(), bx in coord(), by in coord(),
            x in coord(), y in coord(),
        ) {
            let mut clamp = BoundaryClamp::new();
            clamp.set_corner(CornerSlot::First, p(ax, ay));
            clamp.set_corner(CornerSlot::Second, p(bx, by));

            let once = clamp.clamp(p(x, y));
            prop_assert_eq!(clamp.clamp(once), once);
            prop_assert!(clamp.contains(once));
        }
    }
}
