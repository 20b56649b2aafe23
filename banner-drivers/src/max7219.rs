//! MAX7219 LED matrix chain (SPI)
//!
//! Each MAX7219 drives one 8x8 module. Modules are daisy-chained: every
//! 16-bit word shifted in pushes the previous one on to the next module, so
//! a full update is one chip-select window carrying one `[register, data]`
//! pair per module.
//!
//! # Wiring
//!
//! FC16 style modules: data enters at the rightmost module, so the first
//! pair in a window lands on the leftmost module. Digit register `n` holds
//! row `n` with bit 7 as the module's leftmost column.

use embedded_hal::spi::SpiDevice;
use heapless::Vec;

use crate::matrix::{MatrixSink, MATRIX_ROWS};

/// MAX7219 register addresses
pub mod reg {
    pub const NOOP: u8 = 0x00;
    /// First row register; rows 0-7 are 0x01-0x08
    pub const DIGIT0: u8 = 0x01;
    pub const DECODE_MODE: u8 = 0x09;
    pub const INTENSITY: u8 = 0x0A;
    pub const SCAN_LIMIT: u8 = 0x0B;
    pub const SHUTDOWN: u8 = 0x0C;
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// Longest supported chain
pub const MAX_CHAIN: usize = 16;

/// Highest intensity the chip accepts
pub const MAX_INTENSITY: u8 = 0x0F;

/// MAX7219 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Max7219Error<E> {
    /// SPI transfer failed
    Spi(E),
    /// Chain length is zero or above [`MAX_CHAIN`]
    InvalidChainLength,
    /// Intensity above [`MAX_INTENSITY`]
    InvalidIntensity,
    /// Frame is not eight columns per module
    FrameSize,
}

/// A chain of MAX7219 modules
pub struct Max7219<SPI> {
    spi: SPI,
    modules: usize,
}

impl<SPI: SpiDevice> Max7219<SPI> {
    /// Create a driver for `modules` chained modules
    pub fn new(spi: SPI, modules: usize) -> Result<Self, Max7219Error<SPI::Error>> {
        if modules == 0 || modules > MAX_CHAIN {
            return Err(Max7219Error::InvalidChainLength);
        }
        Ok(Self { spi, modules })
    }

    /// Number of modules in the chain
    pub fn modules(&self) -> usize {
        self.modules
    }

    /// Width of the chain in columns
    pub fn width(&self) -> usize {
        self.modules * 8
    }

    /// Release the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Write the same register on every module
    pub fn write_all(&mut self, register: u8, data: u8) -> Result<(), Max7219Error<SPI::Error>> {
        let mut words: Vec<u8, { MAX_CHAIN * 2 }> = Vec::new();
        for _ in 0..self.modules {
            // Cannot overflow: modules <= MAX_CHAIN
            let _ = words.push(register);
            let _ = words.push(data);
        }
        self.spi.write(&words).map_err(Max7219Error::Spi)
    }

    /// Write one row on every module; `data[0]` goes to the leftmost module
    pub fn write_row(&mut self, row: u8, data: &[u8]) -> Result<(), Max7219Error<SPI::Error>> {
        if data.len() != self.modules {
            return Err(Max7219Error::FrameSize);
        }
        let mut words: Vec<u8, { MAX_CHAIN * 2 }> = Vec::new();
        for &byte in data {
            let _ = words.push(reg::DIGIT0 + row);
            let _ = words.push(byte);
        }
        self.spi.write(&words).map_err(Max7219Error::Spi)
    }

    /// Power up the chain in raw (no decode) mode, blank
    pub fn init(&mut self) -> Result<(), Max7219Error<SPI::Error>> {
        self.write_all(reg::DISPLAY_TEST, 0x00)?;
        self.write_all(reg::SCAN_LIMIT, 0x07)?;
        self.write_all(reg::DECODE_MODE, 0x00)?;
        self.clear()?;
        self.write_all(reg::SHUTDOWN, 0x01)
    }

    /// Blank every module
    pub fn clear(&mut self) -> Result<(), Max7219Error<SPI::Error>> {
        for row in 0..MATRIX_ROWS as u8 {
            self.write_all(reg::DIGIT0 + row, 0x00)?;
        }
        Ok(())
    }

    /// Put every module in or out of low-power shutdown
    pub fn shutdown(&mut self, off: bool) -> Result<(), Max7219Error<SPI::Error>> {
        self.write_all(reg::SHUTDOWN, u8::from(!off))
    }
}

/// Pack one module's eight columns into the byte for `row`
fn row_byte(columns: &[u8], row: usize) -> u8 {
    columns
        .iter()
        .enumerate()
        .fold(0, |acc, (c, col)| {
            if col & (1 << row) != 0 {
                acc | (0x80 >> c)
            } else {
                acc
            }
        })
}

impl<SPI: SpiDevice> MatrixSink for Max7219<SPI> {
    type Error = Max7219Error<SPI::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        Max7219::init(self)
    }

    fn set_intensity(&mut self, level: u8) -> Result<(), Self::Error> {
        if level > MAX_INTENSITY {
            return Err(Max7219Error::InvalidIntensity);
        }
        self.write_all(reg::INTENSITY, level)
    }

    fn flush(&mut self, columns: &[u8]) -> Result<(), Self::Error> {
        if columns.len() != self.width() {
            return Err(Max7219Error::FrameSize);
        }
        let mut data: Vec<u8, MAX_CHAIN> = Vec::new();
        for row in 0..MATRIX_ROWS {
            data.clear();
            for module in columns.chunks_exact(8) {
                let _ = data.push(row_byte(module, row));
            }
            self.write_row(row as u8, &data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::spi::{ErrorType, Operation};
    use std::vec;
    use std::vec::Vec as StdVec;

    /// Records each chip-select window
    #[derive(Default)]
    struct MockSpi {
        windows: StdVec<StdVec<u8>>,
    }

    impl ErrorType for MockSpi {
        type Error = Infallible;
    }

    impl SpiDevice for MockSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            let mut window = StdVec::new();
            for op in operations {
                if let Operation::Write(bytes) = op {
                    window.extend_from_slice(bytes);
                }
            }
            self.windows.push(window);
            Ok(())
        }
    }

    #[test]
    fn test_chain_length_checked() {
        assert!(matches!(
            Max7219::new(MockSpi::default(), 0),
            Err(Max7219Error::InvalidChainLength)
        ));
        assert!(matches!(
            Max7219::new(MockSpi::default(), MAX_CHAIN + 1),
            Err(Max7219Error::InvalidChainLength)
        ));
    }

    #[test]
    fn test_init_sequence() {
        let mut max = Max7219::new(MockSpi::default(), 2).unwrap();
        max.init().unwrap();
        let windows = max.release().windows;

        assert_eq!(windows[0], vec![reg::DISPLAY_TEST, 0, reg::DISPLAY_TEST, 0]);
        assert_eq!(windows[1], vec![reg::SCAN_LIMIT, 7, reg::SCAN_LIMIT, 7]);
        assert_eq!(windows[2], vec![reg::DECODE_MODE, 0, reg::DECODE_MODE, 0]);
        // Eight blank rows, then wake up
        assert_eq!(windows[3], vec![reg::DIGIT0, 0, reg::DIGIT0, 0]);
        assert_eq!(windows[10], vec![reg::DIGIT0 + 7, 0, reg::DIGIT0 + 7, 0]);
        assert_eq!(windows[11], vec![reg::SHUTDOWN, 1, reg::SHUTDOWN, 1]);
        assert_eq!(windows.len(), 12);
    }

    #[test]
    fn test_intensity_range() {
        let mut max = Max7219::new(MockSpi::default(), 1).unwrap();
        MatrixSink::set_intensity(&mut max, 15).unwrap();
        assert_eq!(
            MatrixSink::set_intensity(&mut max, 16),
            Err(Max7219Error::InvalidIntensity)
        );
        assert_eq!(max.release().windows, vec![vec![reg::INTENSITY, 15]]);
    }

    #[test]
    fn test_flush_packs_columns() {
        let mut max = Max7219::new(MockSpi::default(), 2).unwrap();
        let mut columns = [0u8; 16];
        // Leftmost column of the left module, top row
        columns[0] = 0x01;
        // Rightmost column of the right module, bottom row
        columns[15] = 0x80;
        max.flush(&columns).unwrap();

        let windows = max.release().windows;
        assert_eq!(windows.len(), 8);
        assert_eq!(windows[0], vec![reg::DIGIT0, 0x80, reg::DIGIT0, 0x00]);
        assert_eq!(windows[7], vec![reg::DIGIT0 + 7, 0x00, reg::DIGIT0 + 7, 0x01]);
    }

    #[test]
    fn test_flush_size_checked() {
        let mut max = Max7219::new(MockSpi::default(), 2).unwrap();
        assert_eq!(max.flush(&[0u8; 8]), Err(Max7219Error::FrameSize));
    }

    #[test]
    fn test_shutdown() {
        let mut max = Max7219::new(MockSpi::default(), 3).unwrap();
        max.shutdown(true).unwrap();
        max.shutdown(false).unwrap();

        let windows = max.release().windows;
        assert_eq!(windows[0], vec![reg::SHUTDOWN, 0, reg::SHUTDOWN, 0, reg::SHUTDOWN, 0]);
        assert_eq!(windows[1], vec![reg::SHUTDOWN, 1, reg::SHUTDOWN, 1, reg::SHUTDOWN, 1]);
    }

    #[test]
    fn test_row_byte() {
        let module = [0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x03];
        assert_eq!(row_byte(&module, 0), 0b1010_0001);
        assert_eq!(row_byte(&module, 1), 0b0000_0001);
    }
}
