//! Display wiring
//!
//! Concrete driver stack for the banner task, plus the clock and publisher
//! the core needs.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Instant;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};

use banner_core::intake::MessageText;
use banner_core::traits::Publisher;
use banner_core::BannerNode;
use banner_drivers::{Clock, Max7219, ScrollText};
use banner_protocol::text::push_truncated;
use banner_protocol::Property;

use crate::board::DISPLAY_COLS;
use crate::channels::{Outbound, OUTBOUND_CHANNEL};

/// SPI device for the MAX7219 chain
pub type MatrixSpi = ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>;

/// The scrolling display
pub type BannerDisplay = ScrollText<Max7219<MatrixSpi>, EmbassyClock, DISPLAY_COLS>;

/// The node as run by the banner task
pub type Node = BannerNode<BannerDisplay, ChannelPublisher>;

/// Uptime clock for the scroll engine
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Forwards confirmed values to the link TX task
pub struct ChannelPublisher;

impl Publisher for ChannelPublisher {
    fn publish(&mut self, property: Property, value: &str) {
        let mut text = MessageText::new();
        push_truncated(&mut text, value);
        debug!("Publish {}: {}", property.id(), value);
        if OUTBOUND_CHANNEL
            .try_send(Outbound::Publish {
                property,
                value: text,
            })
            .is_err()
        {
            warn!("Outbound channel full, dropping {} publish", property.id());
        }
    }
}
