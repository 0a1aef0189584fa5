//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in penarm-core on top of `embedded-hal`:
//!
//! - Knob coordinate source (two ADC channels)
//! - GPIO buttons
//! - PWM servo bank (shoulder, elbow, optional wrist and pen)
//! - Status LEDs

#![no_std]
#![deny(unsafe_code)]

pub mod input;
pub mod output;
