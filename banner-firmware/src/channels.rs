//! Inter-task communication channels
//!
//! Defines the static channels used between the link tasks and the banner
//! task. Uses embassy-sync primitives for async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use banner_core::intake::MessageText;
use banner_protocol::{BannerMessage, LinkCommand, Property, PropertyDescriptor};

/// Channel capacity for commands from the co-processor
const INBOUND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for messages to the co-processor
const OUTBOUND_CHANNEL_SIZE: usize = 8;

/// Messages queued for the co-processor
///
/// Owned counterpart of [`BannerMessage`] so it can sit in a channel.
#[derive(Debug, Clone)]
pub enum Outbound {
    Publish {
        property: Property,
        value: MessageText,
    },
    Advertise(PropertyDescriptor),
    Ack {
        handled: bool,
    },
}

impl Outbound {
    pub fn as_message(&self) -> BannerMessage<'_> {
        match self {
            Outbound::Publish { property, value } => BannerMessage::Publish {
                property: *property,
                value,
            },
            Outbound::Advertise(descriptor) => BannerMessage::Advertise(*descriptor),
            Outbound::Ack { handled } => BannerMessage::Ack { handled: *handled },
        }
    }
}

/// Commands parsed from the co-processor link
pub static INBOUND_CHANNEL: Channel<CriticalSectionRawMutex, LinkCommand, INBOUND_CHANNEL_SIZE> =
    Channel::new();

/// Publishes, advertisements and acknowledgments for the co-processor
pub static OUTBOUND_CHANNEL: Channel<CriticalSectionRawMutex, Outbound, OUTBOUND_CHANNEL_SIZE> =
    Channel::new();
