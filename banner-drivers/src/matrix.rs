//! Column framebuffer for 8-row LED matrices
//!
//! Each column is one byte; bit `r` lights row `r`, row 0 at the top.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Rows on every matrix module
pub const MATRIX_ROWS: usize = 8;

/// Something that can show a [`MatrixFrame`]
pub trait MatrixSink {
    type Error: core::fmt::Debug;

    /// Bring the hardware up, blank
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Set the intensity (0-15)
    fn set_intensity(&mut self, level: u8) -> Result<(), Self::Error>;

    /// Show a frame; `columns` runs left to right
    fn flush(&mut self, columns: &[u8]) -> Result<(), Self::Error>;
}

/// Framebuffer `COLS` columns wide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixFrame<const COLS: usize>([u8; COLS]);

impl<const COLS: usize> MatrixFrame<COLS> {
    pub const fn new() -> Self {
        Self([0; COLS])
    }

    pub fn clear(&mut self) {
        self.0 = [0; COLS];
    }

    pub fn columns(&self) -> &[u8; COLS] {
        &self.0
    }

    /// Whether the pixel at (`x`, `y`) is lit
    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        y < MATRIX_ROWS && self.0.get(x).is_some_and(|col| col & (1 << y) != 0)
    }

    /// Whether no pixel is lit
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&col| col == 0)
    }
}

impl<const COLS: usize> Default for MatrixFrame<COLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize> OriginDimensions for MatrixFrame<COLS> {
    fn size(&self) -> Size {
        Size::new(COLS as u32, MATRIX_ROWS as u32)
    }
}

impl<const COLS: usize> DrawTarget for MatrixFrame<COLS> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            // Off-matrix pixels are clipped
            if coord.x < 0 || coord.x >= COLS as i32 || coord.y < 0 || coord.y >= MATRIX_ROWS as i32
            {
                continue;
            }
            let mask = 1u8 << coord.y;
            let col = &mut self.0[coord.x as usize];
            match color {
                BinaryColor::On => *col |= mask,
                BinaryColor::Off => *col &= !mask,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_sets_bits() {
        let mut frame: MatrixFrame<16> = MatrixFrame::new();
        frame
            .draw_iter([
                Pixel(Point::new(0, 0), BinaryColor::On),
                Pixel(Point::new(3, 7), BinaryColor::On),
            ])
            .unwrap();
        assert_eq!(frame.columns()[0], 0x01);
        assert_eq!(frame.columns()[3], 0x80);
        assert!(frame.is_lit(3, 7));
        assert!(!frame.is_lit(3, 6));
    }

    #[test]
    fn test_off_pixels_clear() {
        let mut frame: MatrixFrame<8> = MatrixFrame::new();
        frame
            .draw_iter([
                Pixel(Point::new(2, 1), BinaryColor::On),
                Pixel(Point::new(2, 1), BinaryColor::Off),
            ])
            .unwrap();
        assert!(frame.is_blank());
    }

    #[test]
    fn test_out_of_bounds_clipped() {
        let mut frame: MatrixFrame<8> = MatrixFrame::new();
        frame
            .draw_iter([
                Pixel(Point::new(-1, 0), BinaryColor::On),
                Pixel(Point::new(8, 0), BinaryColor::On),
                Pixel(Point::new(0, 8), BinaryColor::On),
            ])
            .unwrap();
        assert!(frame.is_blank());
    }
}
