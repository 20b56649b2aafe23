//! Message-bus lifecycle state machine
//!
//! Tracks how far the bus session has come so that a lost broker
//! connection is only fatal once the node has been fully operational.

pub mod events;
pub mod machine;

pub use events::LifecycleEvent;
pub use machine::LifecycleState;
