//! Message types for the co-processor link
//!
//! Message types are divided into two categories:
//! - Co-processor → Banner: property sets, broadcasts, bus lifecycle events
//! - Banner → Co-processor: property publishes, advertisements, acknowledgments

use heapless::{String, Vec};

use crate::events::{BusEvent, MAX_SETTINGS_SIZE};
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::properties::{Property, PropertyDescriptor};
use crate::text::bounded;

// Message type IDs: Co-processor → Banner
pub const MSG_PROPERTY_SET: u8 = 0x01;
pub const MSG_BROADCAST: u8 = 0x02;
pub const MSG_BUS_EVENT: u8 = 0x03;

// Message type IDs: Banner → Co-processor
pub const MSG_PUBLISH: u8 = 0x20;
pub const MSG_ADVERTISE: u8 = 0x21;
pub const MSG_ACK: u8 = 0x22;

/// Maximum length of a property name or broadcast level
pub const MAX_NAME_LEN: usize = 32;

/// Maximum length of a property or broadcast value
///
/// Longer values are cut on a character boundary when parsed.
pub const MAX_VALUE_LEN: usize = 960;

/// Commands parsed from co-processor frames
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkCommand {
    /// A bus client set a device property
    PropertySet {
        property: String<MAX_NAME_LEN>,
        value: String<MAX_VALUE_LEN>,
    },
    /// A broadcast not tied to a device property
    Broadcast {
        level: String<MAX_NAME_LEN>,
        value: String<MAX_VALUE_LEN>,
    },
    /// Bus session lifecycle change
    Bus(BusEvent),
}

/// Split a `[len][head][tail]` payload into UTF-8 head and tail
fn split_pair(payload: &[u8]) -> Result<(&str, &str), FrameError> {
    let (&head_len, rest) = payload.split_first().ok_or(FrameError::InvalidFrame)?;
    let head_len = usize::from(head_len);
    if head_len > rest.len() {
        return Err(FrameError::InvalidFrame);
    }
    let (head, tail) = rest.split_at(head_len);
    let head = core::str::from_utf8(head).map_err(|_| FrameError::InvalidText)?;
    let tail = core::str::from_utf8(tail).map_err(|_| FrameError::InvalidText)?;
    Ok((head, tail))
}

/// Build a `[len][head][tail]` payload
fn join_pair(head: &str, tail: &str) -> Result<Vec<u8, MAX_PAYLOAD_SIZE>, FrameError> {
    let head_len = u8::try_from(head.len()).map_err(|_| FrameError::PayloadTooLarge)?;
    let mut payload = Vec::new();
    payload
        .push(head_len)
        .map_err(|_| FrameError::PayloadTooLarge)?;
    payload
        .extend_from_slice(head.as_bytes())
        .map_err(|_| FrameError::PayloadTooLarge)?;
    payload
        .extend_from_slice(tail.as_bytes())
        .map_err(|_| FrameError::PayloadTooLarge)?;
    Ok(payload)
}

impl LinkCommand {
    /// Parse a command from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_PROPERTY_SET => {
                let (property, value) = split_pair(&frame.payload)?;
                Ok(LinkCommand::PropertySet {
                    property: bounded(property),
                    value: bounded(value),
                })
            }
            MSG_BROADCAST => {
                let (level, value) = split_pair(&frame.payload)?;
                Ok(LinkCommand::Broadcast {
                    level: bounded(level),
                    value: bounded(value),
                })
            }
            MSG_BUS_EVENT => Ok(LinkCommand::Bus(BusEvent::from_payload(&frame.payload)?)),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this command into a frame (co-processor side, or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            LinkCommand::PropertySet { property, value } => {
                let payload = join_pair(property, value)?;
                Ok(Frame {
                    msg_type: MSG_PROPERTY_SET,
                    payload,
                })
            }
            LinkCommand::Broadcast { level, value } => {
                let payload = join_pair(level, value)?;
                Ok(Frame {
                    msg_type: MSG_BROADCAST,
                    payload,
                })
            }
            LinkCommand::Bus(event) => {
                let mut buf = [0u8; 1 + MAX_SETTINGS_SIZE];
                let len = event.encode(&mut buf)?;
                Frame::new(MSG_BUS_EVENT, &buf[..len])
            }
        }
    }
}

/// Messages from the banner to the co-processor
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BannerMessage<'a> {
    /// Confirmed property value
    Publish { property: Property, value: &'a str },
    /// Announce a property at setup
    Advertise(PropertyDescriptor),
    /// Whether the last property set was handled
    Ack { handled: bool },
}

impl<'a> BannerMessage<'a> {
    /// Encode this message into a frame
    ///
    /// Publish values that do not fit a frame are truncated.
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            BannerMessage::Publish { property, value } => {
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .push(property.to_byte())
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                let value = crate::text::truncate_to(value, MAX_PAYLOAD_SIZE - 1);
                payload
                    .extend_from_slice(value.as_bytes())
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Ok(Frame {
                    msg_type: MSG_PUBLISH,
                    payload,
                })
            }
            BannerMessage::Advertise(descriptor) => Frame::new(
                MSG_ADVERTISE,
                &[
                    descriptor.property.to_byte(),
                    descriptor.datatype.to_byte(),
                    descriptor.flags(),
                ],
            ),
            BannerMessage::Ack { handled } => Frame::new(MSG_ACK, &[u8::from(*handled)]),
        }
    }

    /// Parse a message from a frame (co-processor side, or simulation)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_PUBLISH => {
                let (&property, value) =
                    frame.payload.split_first().ok_or(FrameError::InvalidFrame)?;
                let property = Property::from_byte(property).ok_or(FrameError::InvalidFrame)?;
                let value = core::str::from_utf8(value).map_err(|_| FrameError::InvalidText)?;
                Ok(BannerMessage::Publish { property, value })
            }
            MSG_ADVERTISE => match frame.payload[..] {
                [property, datatype, flags] => {
                    PropertyDescriptor::from_bytes(property, datatype, flags)
                        .map(BannerMessage::Advertise)
                        .ok_or(FrameError::InvalidFrame)
                }
                _ => Err(FrameError::InvalidFrame),
            },
            MSG_ACK => match frame.payload[..] {
                [handled] => Ok(BannerMessage::Ack {
                    handled: handled != 0,
                }),
                _ => Err(FrameError::InvalidFrame),
            },
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Settings;
    use crate::properties::ADVERTISED_PROPERTIES;

    fn property_set(property: &str, value: &str) -> LinkCommand {
        LinkCommand::PropertySet {
            property: bounded(property),
            value: bounded(value),
        }
    }

    #[test]
    fn test_property_set_payload_layout() {
        let frame = property_set("speed", "80").to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_PROPERTY_SET);
        assert_eq!(frame.payload[0], 5);
        assert_eq!(&frame.payload[1..6], b"speed");
        assert_eq!(&frame.payload[6..], b"80");
    }

    #[test]
    fn test_property_set_from_frame() {
        let frame = Frame::new(MSG_PROPERTY_SET, b"\x07messageHELLO").unwrap();
        let cmd = LinkCommand::from_frame(&frame).unwrap();
        assert_eq!(cmd, property_set("message", "HELLO"));
    }

    #[test]
    fn test_empty_value_is_allowed() {
        let frame = Frame::new(MSG_PROPERTY_SET, b"\x07message").unwrap();
        let cmd = LinkCommand::from_frame(&frame).unwrap();
        assert_eq!(cmd, property_set("message", ""));
    }

    #[test]
    fn test_name_length_past_payload_rejected() {
        let frame = Frame::new(MSG_BROADCAST, b"\x09alert").unwrap();
        assert_eq!(LinkCommand::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let frame = Frame::new(MSG_PROPERTY_SET, &[1, b'a', 0xFF, 0xFE]).unwrap();
        assert_eq!(LinkCommand::from_frame(&frame), Err(FrameError::InvalidText));
    }

    #[test]
    fn test_overlong_value_truncated() {
        let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
        payload.push(1).unwrap();
        payload.push(b'x').unwrap();
        payload.resize(MAX_PAYLOAD_SIZE, b'v').unwrap();
        let frame = Frame::new(MSG_BROADCAST, &payload).unwrap();

        match LinkCommand::from_frame(&frame).unwrap() {
            LinkCommand::Broadcast { level, value } => {
                assert_eq!(level.as_str(), "x");
                assert_eq!(value.len(), MAX_VALUE_LEN);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bus_event_through_frame() {
        let cmd = LinkCommand::Bus(BusEvent::NormalMode(Settings {
            brightness: 3,
            speed: 40,
        }));
        let frame = cmd.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_BUS_EVENT);
        assert_eq!(LinkCommand::from_frame(&frame), Ok(cmd));
    }

    #[test]
    fn test_unknown_command_type() {
        let frame = Frame::empty(MSG_PUBLISH);
        assert_eq!(LinkCommand::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_publish_frame() {
        let msg = BannerMessage::Publish {
            property: Property::Brightness,
            value: "10",
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_PUBLISH);
        assert_eq!(&frame.payload[..], &[0x03, b'1', b'0']);
        assert_eq!(BannerMessage::from_frame(&frame), Ok(msg));
    }

    #[test]
    fn test_advertise_frame() {
        let msg = BannerMessage::Advertise(ADVERTISED_PROPERTIES[0]);
        let frame = msg.to_frame().unwrap();
        assert_eq!(&frame.payload[..], &[0x01, 0x01, 0x03]);
        assert_eq!(BannerMessage::from_frame(&frame), Ok(msg));
    }

    #[test]
    fn test_ack_frame() {
        let frame = BannerMessage::Ack { handled: false }.to_frame().unwrap();
        assert_eq!(&frame.payload[..], &[0]);
        let bad = Frame::new(MSG_ACK, &[1, 2]).unwrap();
        assert_eq!(BannerMessage::from_frame(&bad), Err(FrameError::InvalidFrame));
    }
}
