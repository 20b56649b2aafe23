//! Hardware driver implementations
//!
//! This crate provides the display side of the banner:
//!
//! - MAX7219 LED matrix chain over an `embedded-hal` SPI device
//! - An 8-row column framebuffer that `embedded-graphics` can draw into
//! - The scrolling text engine implementing
//!   [`DisplayDriver`](banner_core::traits::DisplayDriver)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod matrix;
pub mod max7219;
pub mod scroll;

pub use matrix::{MatrixFrame, MatrixSink};
pub use max7219::{Max7219, Max7219Error};
pub use scroll::{Clock, ScrollText};
