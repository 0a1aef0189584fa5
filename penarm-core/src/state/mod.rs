//! Operator input state
//!
//! Pen state, button debouncing and the events accepted edges produce.
//! All of it is volatile and lives only as long as the control loop.

pub mod debounce;
pub mod events;
pub mod pen;

pub use debounce::Debouncer;
pub use events::{ButtonId, InputEvent};
pub use pen::{PenState, PenStateMachine};
