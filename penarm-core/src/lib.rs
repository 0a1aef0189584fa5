//! Board-agnostic core logic for the plotter arm firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Arm geometry and 2-link kinematics (inverse and forward)
//! - Angle to servo duty mapping with safety clamping
//! - Calibrated drawing boundary
//! - Pen state machine and button debouncing
//! - Control loop, tick scheduler and fault monitoring
//! - Hardware abstraction traits (coordinate source, buttons, servos, LEDs)
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod actuator;
pub mod boundary;
pub mod config;
pub mod control;
pub mod kinematics;
pub mod motion;
pub mod safety;
pub mod scheduler;
pub mod state;
pub mod traits;
