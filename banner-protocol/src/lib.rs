//! Banner property and link protocol
//!
//! This crate defines the vocabulary shared between the banner firmware and
//! the network co-processor that owns the message-bus session:
//!
//! - The device properties (`message`, `speed`, `brightness`, `reboot`) and
//!   how they are advertised
//! - Lenient integer parsing for property values
//! - The framed UART link that carries property sets, broadcasts and bus
//!   lifecycle events in, and publishes/acknowledgments out
//!
//! # Frame format
//!
//! ```text
//! ┌───────┬──────────────┬──────┬──────────────┬──────────┐
//! │ START │ LENGTH (LE)  │ TYPE │ PAYLOAD      │ CHECKSUM │
//! │ 1B    │ 2B           │ 1B   │ 0–1024B      │ 1B       │
//! └───────┴──────────────┴──────┴──────────────┴──────────┘
//! ```
//!
//! The message-bus wire protocol itself (MQTT topics, retained flags on the
//! broker) stays on the co-processor.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod events;
pub mod frame;
pub mod messages;
pub mod properties;
pub mod text;

pub use events::{BusEvent, Settings};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{BannerMessage, LinkCommand, MAX_NAME_LEN, MAX_VALUE_LEN};
pub use properties::{parse_int, Datatype, Property, PropertyDescriptor, ADVERTISED_PROPERTIES};
