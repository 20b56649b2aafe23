//! Fatal conditions handed back to the run-loop

/// Conditions the node cannot recover from locally
///
/// The run-loop answers every variant with a full device restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fatal {
    /// The `reboot` property was set
    RebootRequested,
    /// The broker session dropped after the node had been operational
    ConnectivityLost,
}
