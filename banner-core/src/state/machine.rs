//! Lifecycle state definition

use super::events::LifecycleEvent;
use crate::error::Fatal;

/// Bus session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleState {
    /// Power-on, waiting for the co-processor's configuration
    Booting,
    /// Configuration applied, bus session not yet established
    NormalMode,
    /// Bus session established at least once
    Operational,
    /// A fatal condition was raised; the device must restart
    Restarting(Fatal),
}

impl Default for LifecycleState {
    fn default() -> Self {
        LifecycleState::Booting
    }
}

impl LifecycleState {
    /// Check if the node has been fully operational
    pub fn is_operational(&self) -> bool {
        matches!(self, LifecycleState::Operational)
    }

    /// The fatal condition, if a restart is pending
    pub fn restart_reason(&self) -> Option<Fatal> {
        match self {
            LifecycleState::Restarting(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LifecycleEvent) -> Self {
        use LifecycleEvent as E;
        use LifecycleState::*;

        match (self, event) {
            // A pending restart absorbs everything
            (Restarting(reason), _) => Restarting(reason),

            (_, E::RebootRequested) => Restarting(Fatal::RebootRequested),

            (Booting, E::NormalMode(_)) => NormalMode,
            (Booting | NormalMode, E::ReadyToOperate) => Operational,

            // Losing the broker only matters once we were up
            (Operational, E::MqttDisconnected { .. }) => Restarting(Fatal::ConnectivityLost),

            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banner_protocol::Settings;

    #[test]
    fn test_boot_to_operational() {
        let state = LifecycleState::Booting
            .transition(LifecycleEvent::NormalMode(Settings::default()))
            .transition(LifecycleEvent::ReadyToOperate);
        assert!(state.is_operational());
    }

    #[test]
    fn test_ready_without_normal_mode() {
        let state = LifecycleState::Booting.transition(LifecycleEvent::ReadyToOperate);
        assert_eq!(state, LifecycleState::Operational);
    }

    #[test]
    fn test_disconnect_before_ready_is_ignored() {
        let states = [LifecycleState::Booting, LifecycleState::NormalMode];
        for state in states {
            let next = state.transition(LifecycleEvent::MqttDisconnected { reason: 1 });
            assert_eq!(next, state);
        }
    }

    #[test]
    fn test_disconnect_after_ready_is_fatal() {
        let next =
            LifecycleState::Operational.transition(LifecycleEvent::MqttDisconnected { reason: 0 });
        assert_eq!(next.restart_reason(), Some(Fatal::ConnectivityLost));
    }

    #[test]
    fn test_wifi_disconnect_is_not_fatal() {
        let next = LifecycleState::Operational.transition(LifecycleEvent::WifiDisconnected);
        assert_eq!(next, LifecycleState::Operational);
    }

    #[test]
    fn test_reboot_from_any_live_state() {
        let states = [
            LifecycleState::Booting,
            LifecycleState::NormalMode,
            LifecycleState::Operational,
        ];
        for state in states {
            let next = state.transition(LifecycleEvent::RebootRequested);
            assert_eq!(next, LifecycleState::Restarting(Fatal::RebootRequested));
        }
    }

    #[test]
    fn test_restarting_absorbs_events() {
        let state = LifecycleState::Restarting(Fatal::ConnectivityLost);
        assert_eq!(state.transition(LifecycleEvent::ReadyToOperate), state);
        assert_eq!(state.transition(LifecycleEvent::RebootRequested), state);
    }

    #[test]
    fn test_normal_mode_again_keeps_operational() {
        let next = LifecycleState::Operational
            .transition(LifecycleEvent::NormalMode(Settings::default()));
        assert_eq!(next, LifecycleState::Operational);
    }
}
