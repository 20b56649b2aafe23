//! Events that drive the lifecycle state machine

use banner_protocol::{BusEvent, Settings};

/// Lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleEvent {
    /// Configuration loaded; carries the configured settings
    NormalMode(Settings),
    /// Bus session fully established
    ReadyToOperate,
    /// WiFi association lost
    WifiDisconnected,
    /// Broker session lost
    MqttDisconnected { reason: i8 },
    /// The `reboot` property was set
    RebootRequested,
}

impl LifecycleEvent {
    /// Check if this event reports a lost connection
    pub fn is_disconnect(&self) -> bool {
        matches!(
            self,
            LifecycleEvent::WifiDisconnected | LifecycleEvent::MqttDisconnected { .. }
        )
    }
}

impl From<BusEvent> for LifecycleEvent {
    fn from(event: BusEvent) -> Self {
        match event {
            BusEvent::NormalMode(settings) => LifecycleEvent::NormalMode(settings),
            BusEvent::ReadyToOperate => LifecycleEvent::ReadyToOperate,
            BusEvent::WifiDisconnected => LifecycleEvent::WifiDisconnected,
            BusEvent::MqttDisconnected { reason } => LifecycleEvent::MqttDisconnected { reason },
        }
    }
}
