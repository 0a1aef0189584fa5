//! Servo and indicator drivers

pub mod leds;
pub mod servo;

pub use leds::LedIndicators;
pub use servo::PwmServoBank;
