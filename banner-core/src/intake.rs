//! Validation and staging of inbound display updates
//!
//! The intake never touches the display. It validates each request and
//! stages it in that field's [`PendingUpdate`] slot. Invalid values and
//! requests that arrive while a slot is occupied are dropped silently: the
//! display keeps its stale value rather than taking a bad or queued one.

use core::ops::{Range, RangeInclusive};

use heapless::String;

use banner_protocol::text::push_truncated;
use banner_protocol::Settings;

use crate::pending::PendingUpdate;

/// Size of the fixed message buffer, terminator included
pub const MESSAGE_BUFFER_SIZE: usize = 512;

/// Longest message kept, in bytes
pub const MAX_MESSAGE_LEN: usize = MESSAGE_BUFFER_SIZE - 1;

/// Banner text buffer
pub type MessageText = String<MAX_MESSAGE_LEN>;

/// Size of the buffer broadcasts are formatted into, terminator included
pub const BROADCAST_BUFFER_SIZE: usize = 255;

/// Longest formatted broadcast kept, in bytes
pub const MAX_BROADCAST_LEN: usize = BROADCAST_BUFFER_SIZE - 1;

/// Accepted scroll frame delays in milliseconds
///
/// Shorter delays outrun the matrix refresh; 150 and above is unreadably slow.
pub const SPEED_RANGE: Range<i32> = 1..150;

/// Accepted matrix intensities
pub const BRIGHTNESS_RANGE: RangeInclusive<i32> = 1..=15;

/// Whether `value` is an acceptable scroll speed
pub fn is_valid_speed(value: i32) -> bool {
    SPEED_RANGE.contains(&value)
}

/// Whether `value` is an acceptable brightness
pub fn is_valid_brightness(value: i32) -> bool {
    BRIGHTNESS_RANGE.contains(&value)
}

/// Staging area for text, speed and brightness updates
#[derive(Debug, Default)]
pub struct UpdateIntake {
    text: PendingUpdate<MessageText>,
    speed: PendingUpdate<u16>,
    brightness: PendingUpdate<u8>,
}

impl UpdateIntake {
    /// Create an intake with all slots empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage new banner text
    ///
    /// Text longer than [`MAX_MESSAGE_LEN`] bytes is cut to the longest
    /// prefix that fits. Empty text is accepted and blanks the banner.
    /// Returns whether the text was staged.
    pub fn submit_text(&mut self, text: &str) -> bool {
        if self.text.is_occupied() {
            return false;
        }
        let mut staged = MessageText::new();
        push_truncated(&mut staged, text);
        self.text.offer(staged)
    }

    /// Stage a new scroll speed (frame delay in ms)
    ///
    /// Returns whether the speed was staged.
    pub fn submit_speed(&mut self, value: i32) -> bool {
        if !is_valid_speed(value) {
            return false;
        }
        // In range, so it fits
        self.speed.offer(value as u16)
    }

    /// Stage a new brightness
    ///
    /// Returns whether the brightness was staged.
    pub fn submit_brightness(&mut self, value: i32) -> bool {
        if !is_valid_brightness(value) {
            return false;
        }
        self.brightness.offer(value as u8)
    }

    /// Stage a bus broadcast as banner text, formatted `"{level}: {value}"`
    ///
    /// The formatted text is bounded by [`MAX_BROADCAST_LEN`].
    pub fn submit_broadcast(&mut self, level: &str, value: &str) -> bool {
        if self.text.is_occupied() {
            return false;
        }
        let mut line: String<MAX_BROADCAST_LEN> = String::new();
        if push_truncated(&mut line, level) && push_truncated(&mut line, ": ") {
            push_truncated(&mut line, value);
        }
        self.submit_text(&line)
    }

    /// Stage configured settings as ordinary submissions
    pub fn submit_settings(&mut self, settings: &Settings) {
        self.submit_brightness(settings.brightness);
        self.submit_speed(settings.speed);
    }

    /// Whether any field has a staged update
    pub fn has_pending(&self) -> bool {
        self.text.is_occupied() || self.speed.is_occupied() || self.brightness.is_occupied()
    }

    pub fn is_text_pending(&self) -> bool {
        self.text.is_occupied()
    }

    pub fn is_speed_pending(&self) -> bool {
        self.speed.is_occupied()
    }

    pub fn is_brightness_pending(&self) -> bool {
        self.brightness.is_occupied()
    }

    /// Staged text, if any
    pub fn pending_text(&self) -> Option<&str> {
        self.text.peek().map(|t| t.as_str())
    }

    pub(crate) fn take_text(&mut self) -> Option<MessageText> {
        self.text.take()
    }

    pub(crate) fn take_speed(&mut self) -> Option<u16> {
        self.speed.take()
    }

    pub(crate) fn take_brightness(&mut self) -> Option<u8> {
        self.brightness.take()
    }
}
