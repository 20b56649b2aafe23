//! Scrolling text engine
//!
//! Drives one animation cycle at a time over a [`MatrixSink`]: the text
//! enters, rests for the pause time, then leaves. Each call to
//! [`display_animate`](DisplayDriver::display_animate) advances at most one
//! frame, so the caller can poll it as often as it likes.
//!
//! Glyphs come from the `embedded-graphics` 5x7 ASCII font; characters
//! outside it render as the font's replacement glyph.

use embedded_graphics::mono_font::ascii::FONT_5X7;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use banner_core::intake::MessageText;
use banner_core::traits::{DisplayDriver, TextAlign, TextEffect};
use banner_protocol::text::push_truncated;
use heapless::String;

use crate::matrix::{MatrixFrame, MatrixSink};

/// Millisecond time source
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Where the current cycle is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Text is entering
    In,
    /// Text is resting
    Pause,
    /// Text is leaving
    Out,
    /// Cycle complete
    Done,
}

/// Columns one glyph advances
const GLYPH_ADVANCE: i32 = (FONT_5X7.character_size.width + FONT_5X7.character_spacing) as i32;

/// Width of `text` in columns, trailing spacing excluded
fn text_width(text: &str) -> i32 {
    match text.chars().count() as i32 {
        0 => 0,
        n => n * GLYPH_ADVANCE - FONT_5X7.character_spacing as i32,
    }
}

/// Scrolling text display `COLS` columns wide
pub struct ScrollText<M, C, const COLS: usize> {
    matrix: M,
    clock: C,
    frame: MatrixFrame<COLS>,
    text: MessageText,
    width: i32,
    align: TextAlign,
    speed_ms: u16,
    pause_ms: u16,
    effect_in: TextEffect,
    effect_out: TextEffect,
    phase: Phase,
    /// Left edge of the text, in display columns
    x: i32,
    last_frame_ms: u64,
}

impl<M: MatrixSink, C: Clock, const COLS: usize> ScrollText<M, C, COLS> {
    pub fn new(matrix: M, clock: C) -> Self {
        Self {
            matrix,
            clock,
            frame: MatrixFrame::new(),
            text: String::new(),
            width: 0,
            align: TextAlign::Left,
            speed_ms: 50,
            pause_ms: 0,
            effect_in: TextEffect::ScrollLeft,
            effect_out: TextEffect::ScrollLeft,
            phase: Phase::Done,
            x: 0,
            last_frame_ms: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn frame(&self) -> &MatrixFrame<COLS> {
        &self.frame
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn speed_ms(&self) -> u16 {
        self.speed_ms
    }

    pub fn matrix(&self) -> &M {
        &self.matrix
    }

    /// Column the text's left edge settles on
    fn rest_x(&self) -> i32 {
        let cols = COLS as i32;
        if self.width > cols {
            // Too wide to rest whole: stop with its end at the right edge
            return cols - self.width;
        }
        match self.align {
            TextAlign::Left => 0,
            TextAlign::Center => (cols - self.width) / 2,
            TextAlign::Right => cols - self.width,
        }
    }

    /// Advance the cycle by one frame
    fn step(&mut self) {
        match self.phase {
            Phase::In => {
                let rest = self.rest_x();
                match self.effect_in {
                    TextEffect::ScrollLeft => self.x -= 1,
                    TextEffect::Print => self.x = rest,
                }
                if self.x <= rest {
                    self.x = rest;
                    self.phase = Phase::Pause;
                }
            }
            Phase::Pause => self.phase = Phase::Out,
            Phase::Out => match self.effect_out {
                TextEffect::ScrollLeft => {
                    self.x -= 1;
                    if self.x + self.width <= 0 {
                        self.phase = Phase::Done;
                    }
                }
                TextEffect::Print => self.phase = Phase::Done,
            },
            Phase::Done => {}
        }
    }

    fn render(&mut self) -> Result<(), M::Error> {
        self.frame.clear();
        if self.phase != Phase::Done {
            // Skip glyphs that are already off the left edge
            let hidden = if self.x < 0 {
                (-self.x / GLYPH_ADVANCE) as usize
            } else {
                0
            };
            let visible = COLS / GLYPH_ADVANCE as usize + 2;
            let start = self
                .text
                .char_indices()
                .nth(hidden)
                .map_or(self.text.len(), |(i, _)| i);
            let end = self.text[start..]
                .char_indices()
                .nth(visible)
                .map_or(self.text.len(), |(i, _)| start + i);

            let origin = Point::new(self.x + hidden as i32 * GLYPH_ADVANCE, 0);
            let style = MonoTextStyle::new(&FONT_5X7, BinaryColor::On);
            // Drawing into the framebuffer is infallible
            let _ = Text::with_baseline(&self.text[start..end], origin, style, Baseline::Top)
                .draw(&mut self.frame);
        }
        self.matrix.flush(self.frame.columns())
    }
}

impl<M: MatrixSink, C: Clock, const COLS: usize> DisplayDriver for ScrollText<M, C, COLS> {
    type Error = M::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.matrix.init()
    }

    fn set_intensity(&mut self, level: u8) -> Result<(), Self::Error> {
        self.matrix.set_intensity(level)
    }

    fn set_speed(&mut self, frame_delay_ms: u16) -> Result<(), Self::Error> {
        self.speed_ms = frame_delay_ms;
        Ok(())
    }

    fn display_text(
        &mut self,
        text: &str,
        align: TextAlign,
        speed_ms: u16,
        pause_ms: u16,
        effect_in: TextEffect,
        effect_out: TextEffect,
    ) -> Result<(), Self::Error> {
        self.text.clear();
        push_truncated(&mut self.text, text);
        self.width = text_width(&self.text);
        self.align = align;
        self.speed_ms = speed_ms;
        self.pause_ms = pause_ms;
        self.effect_in = effect_in;
        self.effect_out = effect_out;
        self.display_reset();
        Ok(())
    }

    fn display_animate(&mut self) -> Result<bool, Self::Error> {
        if self.phase == Phase::Done {
            return Ok(true);
        }

        let now = self.clock.now_ms();
        let interval = match self.phase {
            Phase::Pause => self.pause_ms,
            _ => self.speed_ms,
        };
        if now.wrapping_sub(self.last_frame_ms) < u64::from(interval) {
            return Ok(false);
        }
        self.last_frame_ms = now;

        self.step();
        self.render()?;
        Ok(self.phase == Phase::Done)
    }

    fn display_reset(&mut self) {
        self.last_frame_ms = self.clock.now_ms();
        if self.text.is_empty() {
            // Nothing to animate; the cycle is over before it starts
            self.phase = Phase::Done;
            return;
        }
        self.phase = Phase::In;
        self.x = match self.effect_in {
            TextEffect::ScrollLeft => COLS as i32,
            TextEffect::Print => self.rest_x(),
        };
    }
}
