//! GPIO buttons

use embedded_hal::digital::InputPin;
use penarm_core::state::ButtonId;
use penarm_core::traits::ButtonSource;

/// Three front panel buttons on GPIO inputs
///
/// Buttons are active-high (pull-down inputs) unless built with
/// [`GpioButtons::new_active_low`]. A pin read error counts as released.
pub struct GpioButtons<P> {
    corner1: P,
    corner2: P,
    pen: P,
    /// If true, pressed = pin LOW
    inverted: bool,
}

impl<P: InputPin> GpioButtons<P> {
    pub fn new(corner1: P, corner2: P, pen: P, inverted: bool) -> Self {
        Self {
            corner1,
            corner2,
            pen,
            inverted,
        }
    }

    /// Buttons to VCC with pull-down inputs
    pub fn new_active_high(corner1: P, corner2: P, pen: P) -> Self {
        Self::new(corner1, corner2, pen, false)
    }

    /// Buttons to ground with pull-up inputs
    pub fn new_active_low(corner1: P, corner2: P, pen: P) -> Self {
        Self::new(corner1, corner2, pen, true)
    }
}

impl<P: InputPin> ButtonSource for GpioButtons<P> {
    fn is_pressed(&mut self, id: ButtonId) -> bool {
        let pin = match id {
            ButtonId::Corner1 => &mut self.corner1,
            ButtonId::Corner2 => &mut self.corner2,
            ButtonId::PenToggle => &mut self.pen,
        };

        match pin.is_high() {
            Ok(high) => high != self.inverted,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Mock input pin for testing
    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    /// Input pin that always fails
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    fn pin(high: bool) -> MockPin {
        MockPin { high }
    }

    #[test]
    fn test_active_high_buttons() {
        let mut buttons = GpioButtons::new_active_high(pin(true), pin(false), pin(true));
        assert!(buttons.is_pressed(ButtonId::Corner1));
        assert!(!buttons.is_pressed(ButtonId::Corner2));
        assert!(buttons.is_pressed(ButtonId::PenToggle));
    }

    #[test]
    fn test_active_low_buttons() {
        let mut buttons = GpioButtons::new_active_low(pin(true), pin(false), pin(true));
        assert!(!buttons.is_pressed(ButtonId::Corner1));
        assert!(buttons.is_pressed(ButtonId::Corner2));
        assert!(!buttons.is_pressed(ButtonId::PenToggle));
    }

    #[test]
    fn test_read_error_is_released() {
        let mut buttons = GpioButtons::new_active_low(BrokenPin, BrokenPin, BrokenPin);
        for id in ButtonId::ALL {
            assert!(!buttons.is_pressed(id));
        }
    }
}
