//! Time-based button debouncing

/// Turns a polled button level into debounced rising edges
///
/// A rising edge is accepted unless it arrives within `window_ms` of the
/// previously accepted edge. Holding the button produces one edge only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    window_ms: u32,
    was_pressed: bool,
    last_accepted_ms: Option<u32>,
}

impl Debouncer {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            was_pressed: false,
            last_accepted_ms: None,
        }
    }

    pub const fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Feed the current level; returns true on an accepted rising edge
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> bool {
        let rising = pressed && !self.was_pressed;
        self.was_pressed = pressed;

        if !rising {
            return false;
        }

        // Wrapping difference keeps working across the u32 rollover
        let within_window = self
            .last_accepted_ms
            .is_some_and(|last| now_ms.wrapping_sub(last) < self.window_ms);

        if within_window {
            return false;
        }

        self.last_accepted_ms = Some(now_ms);
        true
    }

    /// Forget edge history
    pub fn reset(&mut self) {
        self.was_pressed = false;
        self.last_accepted_ms = None;
    }
}
