//! Configuration types
//!
//! Policy values the banner starts with, and validation of the settings
//! delivered by the co-processor.

pub mod types;

pub use types::*;
