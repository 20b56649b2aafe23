//! Banner - Networked Scrolling LED Sign Firmware
//!
//! Main firmware binary for an RP2040 driving a MAX7219 matrix chain.
//! Text, speed and brightness arrive from a pub/sub message bus via a
//! network co-processor on UART0; confirmed values are published back.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig};
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use banner_core::config::BannerConfig;
use banner_core::BannerNode;
use banner_drivers::{Max7219, ScrollText};

use crate::board::{LINK_BAUD, MAX_DEVICES, NODE_NAME, SPI_FREQUENCY_HZ};
use crate::display::{ChannelPublisher, EmbassyClock};

mod board;
mod channels;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Banner firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Co-processor link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = LINK_BAUD;
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 1024]);
    let uart = BufferedUart::new(p.UART0, p.PIN_0, p.PIN_1, Irqs, tx_buf, rx_buf, uart_config);
    let (tx, rx) = uart.split();
    info!("UART initialized for co-processor link");

    // MAX7219 chain: SCK=GPIO18, MOSI=GPIO19, CS=GPIO17
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();
    let matrix = Max7219::new(spi_device, MAX_DEVICES).unwrap();
    let display = ScrollText::new(matrix, EmbassyClock);
    info!("Display initialized: {} modules", MAX_DEVICES);

    let config = BannerConfig::with_node_name(NODE_NAME);
    let node = BannerNode::new(display, ChannelPublisher, &config);

    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner.spawn(tasks::banner_task(node)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
