//! Configuration type definitions

use heapless::String;

use banner_protocol::text::push_truncated;
use banner_protocol::Settings;

use crate::intake::{is_valid_brightness, is_valid_speed, MessageText};
use crate::traits::{TextAlign, TextEffect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum node name length
pub const MAX_NODE_NAME_LEN: usize = 32;

/// Maximum welcome prefix length
pub const MAX_WELCOME_LEN: usize = 48;

/// Default node name
pub const DEFAULT_NODE_NAME: &str = "Message Banner";

/// Default text shown before the node name at power-on
pub const DEFAULT_WELCOME_PREFIX: &str = "Welcome, node: ";

/// Default scroll frame delay (ms); 85 reads too slow, 25 too fast
pub const DEFAULT_SPEED_MS: u16 = 50;

/// Default matrix intensity
pub const DEFAULT_BRIGHTNESS: u8 = 6;

/// Default pause between scroll-in and scroll-out (ms)
pub const DEFAULT_PAUSE_MS: u16 = 2000;

/// Banner node configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BannerConfig {
    /// Node name shown in the welcome text
    pub node_name: String<MAX_NODE_NAME_LEN>,
    /// Welcome text placed before the node name
    pub welcome_prefix: String<MAX_WELCOME_LEN>,
    /// Initial frame delay (ms)
    pub speed_ms: u16,
    /// Initial intensity
    pub brightness: u8,
    /// Pause once text has scrolled in (ms)
    pub pause_ms: u16,
    pub align: TextAlign,
    pub effect_in: TextEffect,
    pub effect_out: TextEffect,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self::with_node_name(DEFAULT_NODE_NAME)
    }
}

impl BannerConfig {
    /// Default configuration for a node with the given name
    pub fn with_node_name(name: &str) -> Self {
        let mut node_name = String::new();
        push_truncated(&mut node_name, name);
        let mut welcome_prefix = String::new();
        push_truncated(&mut welcome_prefix, DEFAULT_WELCOME_PREFIX);

        Self {
            node_name,
            welcome_prefix,
            speed_ms: DEFAULT_SPEED_MS,
            brightness: DEFAULT_BRIGHTNESS,
            pause_ms: DEFAULT_PAUSE_MS,
            align: TextAlign::Left,
            effect_in: TextEffect::ScrollLeft,
            effect_out: TextEffect::ScrollLeft,
        }
    }

    /// Text shown until the first message arrives
    pub fn welcome_text(&self) -> MessageText {
        let mut text = MessageText::new();
        push_truncated(&mut text, &self.welcome_prefix);
        push_truncated(&mut text, &self.node_name);
        text
    }
}

/// Whether both settings fall in the ranges the intake accepts
pub fn settings_valid(settings: &Settings) -> bool {
    is_valid_brightness(settings.brightness) && is_valid_speed(settings.speed)
}
