//! Board constants
//!
//! Pin assignments are for a Pico wired to an FC16 matrix chain on SPI0
//! and the network co-processor on UART0.

/// Modules in the MAX7219 chain
pub const MAX_DEVICES: usize = 12;

/// Display width in columns
pub const DISPLAY_COLS: usize = MAX_DEVICES * 8;

/// MAX7219 SPI clock (Hz); the chip tops out at 10 MHz
pub const SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// Co-processor link baud rate
pub const LINK_BAUD: u32 = 115_200;

/// Coordinator tick interval
pub const TICK_INTERVAL_MS: u64 = 1;

/// Name shown in the welcome text
pub const NODE_NAME: &str = "Message Banner";

/// Grace period for the link TX task to flush before a restart
pub const RESTART_GRACE_MS: u64 = 100;
