//! Button identities and the events they produce

use super::pen::PenState;
use crate::boundary::CornerSlot;
use crate::kinematics::CartesianPoint;

/// Front panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Capture the first calibration corner
    Corner1,
    /// Capture the second calibration corner
    Corner2,
    /// Lift or lower the pen
    PenToggle,
}

impl ButtonId {
    /// All buttons, in polling order
    pub const ALL: [ButtonId; 3] = [ButtonId::Corner1, ButtonId::Corner2, ButtonId::PenToggle];

    /// Calibration slot written by this button, if it is a corner button
    pub const fn corner_slot(self) -> Option<CornerSlot> {
        match self {
            ButtonId::Corner1 => Some(CornerSlot::First),
            ButtonId::Corner2 => Some(CornerSlot::Second),
            ButtonId::PenToggle => None,
        }
    }
}

/// Result of an accepted button edge
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// A calibration corner was recorded at the raw position
    CornerCaptured {
        slot: CornerSlot,
        point: CartesianPoint,
    },
    /// The pen changed state
    PenToggled(PenState),
}
