//! Outbound property publishing

use banner_protocol::Property;

/// Sink for confirmed property values
///
/// Called right after a value has been applied to the display. Delivery is
/// best effort; a publisher that cannot forward a value drops it.
pub trait Publisher {
    fn publish(&mut self, property: Property, value: &str);
}
