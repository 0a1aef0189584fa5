//! Tick scheduling
//!
//! A clock abstraction and the fixed-period deadline generator that drives
//! the control loop. Tests run the loop on a [`VirtualClock`].

pub mod clock;
pub mod ticker;

pub use clock::{deadline_reached, Clock, VirtualClock};
pub use ticker::TickScheduler;
