//! Co-processor link transmit task
//!
//! Sends publishes, advertisements and acknowledgments to the co-processor.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use banner_protocol::frame::MAX_FRAME_SIZE;

use crate::channels::{Outbound, OUTBOUND_CHANNEL};

/// Link TX task - encodes queued messages onto the UART
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        let outbound = OUTBOUND_CHANNEL.receive().await;
        send(&mut tx, &outbound, &mut buf).await;
    }
}

async fn send(tx: &mut BufferedUartTx, outbound: &Outbound, buf: &mut [u8]) {
    let frame = match outbound.as_message().to_frame() {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to build frame: {:?}", e);
            return;
        }
    };

    match frame.encode(buf) {
        Ok(len) => {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send frame: {:?}", e);
            } else {
                trace!("TX: type {:#x}, {} bytes", frame.msg_type, len);
            }
        }
        Err(e) => warn!("Failed to encode frame: {:?}", e),
    }
}
