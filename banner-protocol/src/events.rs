//! Message-bus lifecycle events reported by the co-processor

use serde::{Deserialize, Serialize};

use crate::frame::FrameError;

/// Device settings held by the co-processor's configuration store
///
/// Both values are pre-validated by the co-processor, but the banner
/// validates them again on submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Matrix intensity
    pub brightness: i32,
    /// Scroll frame delay in milliseconds
    pub speed: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brightness: 6,
            speed: 60,
        }
    }
}

/// Largest postcard encoding of [`Settings`] (two zigzag varint `i32`s)
pub const MAX_SETTINGS_SIZE: usize = 10;

/// Lifecycle events of the message-bus session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusEvent {
    /// Configuration loaded, device entering normal operation
    NormalMode(Settings),
    /// Session fully established; properties may be published
    ReadyToOperate,
    /// WiFi association lost
    WifiDisconnected,
    /// Broker session lost
    MqttDisconnected { reason: i8 },
}

// Wire format values
const EVENT_NORMAL_MODE: u8 = 0x01;
const EVENT_READY: u8 = 0x02;
const EVENT_WIFI_DISCONNECTED: u8 = 0x03;
const EVENT_MQTT_DISCONNECTED: u8 = 0x04;

impl BusEvent {
    /// Decode an event from a BUS_EVENT payload
    pub fn from_payload(payload: &[u8]) -> Result<Self, FrameError> {
        let (&code, rest) = payload.split_first().ok_or(FrameError::InvalidFrame)?;
        match code {
            EVENT_NORMAL_MODE => {
                let settings: Settings =
                    postcard::from_bytes(rest).map_err(|_| FrameError::InvalidFrame)?;
                Ok(BusEvent::NormalMode(settings))
            }
            EVENT_READY => Ok(BusEvent::ReadyToOperate),
            EVENT_WIFI_DISCONNECTED => Ok(BusEvent::WifiDisconnected),
            EVENT_MQTT_DISCONNECTED => {
                let &reason = rest.first().ok_or(FrameError::InvalidFrame)?;
                Ok(BusEvent::MqttDisconnected {
                    reason: reason as i8,
                })
            }
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this event into `buffer`
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let (code, rest) = buffer.split_first_mut().ok_or(FrameError::BufferTooSmall)?;
        match self {
            BusEvent::NormalMode(settings) => {
                *code = EVENT_NORMAL_MODE;
                let used = postcard::to_slice(settings, rest)
                    .map_err(|_| FrameError::BufferTooSmall)?
                    .len();
                Ok(1 + used)
            }
            BusEvent::ReadyToOperate => {
                *code = EVENT_READY;
                Ok(1)
            }
            BusEvent::WifiDisconnected => {
                *code = EVENT_WIFI_DISCONNECTED;
                Ok(1)
            }
            BusEvent::MqttDisconnected { reason } => {
                *code = EVENT_MQTT_DISCONNECTED;
                let slot = rest.first_mut().ok_or(FrameError::BufferTooSmall)?;
                *slot = *reason as u8;
                Ok(2)
            }
        }
    }
}
