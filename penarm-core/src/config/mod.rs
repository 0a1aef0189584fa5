//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware embeds them as
//! postcard binary data generated from `plotter.toml` at build time.

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
