//! Collaborator traits
//!
//! These traits define the interface between the coordination logic and
//! the display hardware / message bus it is wired to.

pub mod display;
pub mod publish;

pub use display::{DisplayDriver, TextAlign, TextEffect};
pub use publish::Publisher;
