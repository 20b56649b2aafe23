//! Display driver trait for the scrolling matrix

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where text settles on the matrix when it fits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// How text enters or leaves the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextEffect {
    /// Move one column left per frame
    #[default]
    ScrollLeft,
    /// Appear or vanish in a single frame
    Print,
}

/// Trait for the animated text display
///
/// The display runs one animation cycle at a time: text scrolls in,
/// pauses, and scrolls out. Reconfiguring it is only safe once
/// [`display_animate`](DisplayDriver::display_animate) has reported the
/// cycle complete; its column and frame counters are not consistent
/// mid-cycle.
pub trait DisplayDriver {
    /// Error type for display operations
    type Error: core::fmt::Debug;

    /// Initialize the hardware; called once at startup
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Set the matrix intensity (0-15)
    fn set_intensity(&mut self, level: u8) -> Result<(), Self::Error>;

    /// Set the frame delay in milliseconds
    fn set_speed(&mut self, frame_delay_ms: u16) -> Result<(), Self::Error>;

    /// Load new text and animation parameters
    fn display_text(
        &mut self,
        text: &str,
        align: TextAlign,
        speed_ms: u16,
        pause_ms: u16,
        effect_in: TextEffect,
        effect_out: TextEffect,
    ) -> Result<(), Self::Error>;

    /// Advance the animation if a frame is due
    ///
    /// Returns `true` once the current cycle has completed.
    fn display_animate(&mut self) -> Result<bool, Self::Error>;

    /// Restart the animation cycle with the current text and parameters
    fn display_reset(&mut self);
}
