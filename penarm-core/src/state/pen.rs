//! Pen lift state machine

/// End-effector state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PenState {
    /// Pen on the paper
    #[default]
    Down,
    /// Pen lifted
    Up,
}

impl PenState {
    /// The opposite state
    pub const fn toggled(self) -> Self {
        match self {
            PenState::Down => PenState::Up,
            PenState::Up => PenState::Down,
        }
    }

    /// Pen indicator level (lit while lifted)
    pub const fn indicator_on(self) -> bool {
        matches!(self, PenState::Up)
    }
}

/// Holds the pen state and flips it once per accepted toggle edge
///
/// Debouncing happens upstream; every call to [`toggle`](Self::toggle)
/// is one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PenStateMachine {
    state: PenState,
}

impl PenStateMachine {
    /// Start with the pen down
    pub const fn new() -> Self {
        Self {
            state: PenState::Down,
        }
    }

    pub const fn state(&self) -> PenState {
        self.state
    }

    /// Flip the state and return the new value
    pub fn toggle(&mut self) -> PenState {
        self.state = self.state.toggled();
        self.state
    }
}
