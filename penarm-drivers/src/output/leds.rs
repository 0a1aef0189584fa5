//! Status LEDs
//!
//! LEDs on GPIO outputs. The pins can be configured as active-high
//! (default) or active-low.

use embedded_hal::digital::OutputPin;
use penarm_core::traits::{IndicatorId, IndicatorSink};

/// Pen and calibration corner LEDs
pub struct LedIndicators<P> {
    pen: P,
    corner1: P,
    corner2: P,
    /// If true, LED on = pin LOW
    inverted: bool,
}

impl<P: OutputPin> LedIndicators<P> {
    /// Create the indicators with every LED off
    pub fn new(pen: P, corner1: P, corner2: P, inverted: bool) -> Self {
        let mut leds = Self {
            pen,
            corner1,
            corner2,
            inverted,
        };
        for id in IndicatorId::ALL {
            leds.set_state(id, false);
        }
        leds
    }

    pub fn new_active_high(pen: P, corner1: P, corner2: P) -> Self {
        Self::new(pen, corner1, corner2, false)
    }

    pub fn new_active_low(pen: P, corner1: P, corner2: P) -> Self {
        Self::new(pen, corner1, corner2, true)
    }
}

impl<P: OutputPin> IndicatorSink for LedIndicators<P> {
    fn set_state(&mut self, id: IndicatorId, on: bool) {
        let pin = match id {
            IndicatorId::Pen => &mut self.pen,
            IndicatorId::Corner1 => &mut self.corner1,
            IndicatorId::Corner2 => &mut self.corner2,
        };

        let _ = if on != self.inverted {
            pin.set_high()
        } else {
            pin.set_low()
        };
    }
}
