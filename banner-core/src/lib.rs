//! Board-agnostic core logic for the banner firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware/collaborator traits (display driver, publisher)
//! - Single-slot staging of inbound updates ([`intake`])
//! - The animation-boundary coordinator that applies them ([`coordinator`])
//! - Message-bus lifecycle state machine
//! - The node surface wiring the above to the messaging callbacks

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod coordinator;
pub mod error;
pub mod intake;
pub mod node;
pub mod pending;
pub mod state;
pub mod traits;

#[cfg(test)]
mod testing;

pub use coordinator::{DisplayCoordinator, DisplayState, Drained};
pub use error::Fatal;
pub use intake::UpdateIntake;
pub use node::BannerNode;
pub use pending::PendingUpdate;
pub use state::{LifecycleEvent, LifecycleState};
