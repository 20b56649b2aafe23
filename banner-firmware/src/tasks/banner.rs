//! Banner task
//!
//! Owns the node. Inbound commands and coordinator ticks are handled on
//! this one task, so the intake and the display are never touched
//! concurrently.

use cortex_m::peripheral::SCB;
use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker, Timer};

use banner_core::config::settings_valid;
use banner_core::Fatal;
use banner_protocol::{BusEvent, LinkCommand};

use crate::board::{RESTART_GRACE_MS, TICK_INTERVAL_MS};
use crate::channels::{Outbound, INBOUND_CHANNEL, OUTBOUND_CHANNEL};
use crate::display::Node;

/// Banner task - main coordination loop
#[embassy_executor::task]
pub async fn banner_task(mut node: Node) {
    info!("Banner task started");

    match node.setup() {
        Ok(advertised) => {
            for descriptor in advertised {
                OUTBOUND_CHANNEL.send(Outbound::Advertise(*descriptor)).await;
            }
            info!("Display started, {} properties advertised", advertised.len());
        }
        Err(e) => error!("Display start failed: {:?}", Debug2Format(&e)),
    }

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        let result = match select(INBOUND_CHANNEL.receive(), ticker.next()).await {
            Either::First(cmd) => handle_command(&mut node, cmd).await,
            Either::Second(()) => {
                poll(&mut node);
                Ok(())
            }
        };

        if let Err(reason) = result {
            error!("Restarting: {:?}", reason);
            Timer::after_millis(RESTART_GRACE_MS).await;
            SCB::sys_reset();
        }
    }
}

/// Run one coordinator tick
fn poll(node: &mut Node) {
    match node.poll() {
        Ok(drained) if drained.any() => debug!("Applied {:?}", drained),
        Ok(_) => {}
        Err(e) => warn!("Display error: {:?}", Debug2Format(&e)),
    }
}

/// Route a command from the co-processor into the node
async fn handle_command(node: &mut Node, cmd: LinkCommand) -> Result<(), Fatal> {
    match cmd {
        LinkCommand::PropertySet { property, value } => {
            debug!("Set {} = {}", property.as_str(), value.as_str());
            let handled = node.handle_input(&property, &value)?;
            if !handled {
                warn!("Unknown property {}", property.as_str());
            }
            OUTBOUND_CHANNEL.send(Outbound::Ack { handled }).await;
        }
        LinkCommand::Broadcast { level, value } => {
            info!("Broadcast {}: {}", level.as_str(), value.as_str());
            node.handle_broadcast(&level, &value);
        }
        LinkCommand::Bus(event) => {
            match event {
                BusEvent::NormalMode(settings) => {
                    info!("Normal mode: {:?}", settings);
                    if !settings_valid(&settings) {
                        warn!("Some stored settings out of range, ignoring those");
                    }
                }
                BusEvent::ReadyToOperate => info!("Bus ready"),
                BusEvent::WifiDisconnected => warn!("WiFi disconnected"),
                BusEvent::MqttDisconnected { reason } => {
                    warn!("MQTT disconnected, reason {}", reason)
                }
            }
            node.on_event(event.into())?;
            trace!("Lifecycle: {:?}", node.lifecycle());
        }
    }
    Ok(())
}
