//! Co-processor link receive task
//!
//! Receives frames from the network co-processor and forwards the parsed
//! commands to the banner task.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use banner_protocol::{FrameParser, LinkCommand};

use crate::channels::INBOUND_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the co-processor
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match LinkCommand::from_frame(&frame) {
                            Ok(cmd) => {
                                // Applies backpressure; the banner task drains quickly
                                INBOUND_CHANNEL.send(cmd).await;
                            }
                            Err(e) => {
                                warn!("Failed to parse link command: {:?}", e);
                            }
                        },
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
