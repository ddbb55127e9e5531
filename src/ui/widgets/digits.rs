use crate::config::{GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::ui::bitmap::Bitmap;
use crate::ui::widgets::{draw_glyphs, Frame, Widget};
use crate::ui::{Dispatch, Event};

/// Bounded number shown with leading zeros (hours, minutes, year, ...).
pub struct Digits {
    frame: Frame,
    digits: u8,
    value: u16,
    min: u16,
    max: u16,
}

impl Digits {
    pub const fn new(digits: u8, min: u16, max: u16) -> Self {
        Self {
            frame: Frame::new(digits as u32 * GLYPH_WIDTH, GLYPH_HEIGHT),
            digits,
            value: min,
            min,
            max,
        }
    }

    /// Like `new` without the spacing column after the last digit.
    pub const fn tight(digits: u8, min: u16, max: u16) -> Self {
        Self {
            frame: Frame::new(digits as u32 * GLYPH_WIDTH - 1, GLYPH_HEIGHT),
            digits,
            value: min,
            min,
            max,
        }
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn min(&self) -> u16 {
        self.min
    }

    pub fn max(&self) -> u16 {
        self.max
    }

    /// Write the value as ASCII digits, zero-padded to the widget width.
    fn format(&self, out: &mut [u8; 5]) -> usize {
        let n = (self.digits as usize).min(out.len());
        let mut value = self.value;
        for slot in out[..n].iter_mut().rev() {
            *slot = b'0' + (value % 10) as u8;
            value /= 10;
        }
        n
    }
}

impl Widget for Digits {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn draw(&mut self, canvas: &mut Bitmap) {
        self.frame.clear(canvas);
        if !self.frame.ink_phase() {
            return;
        }
        let mut buf = [0u8; 5];
        let len = self.format(&mut buf);
        if let Ok(text) = core::str::from_utf8(&buf[..len]) {
            draw_glyphs(&mut self.frame.region(canvas), text, 0);
        }
    }

    fn set(&mut self, value: u16) {
        self.value = value.clamp(self.min, self.max);
    }

    fn get(&self) -> Option<u16> {
        Some(self.value)
    }

    fn send_event(&mut self, event: Event) -> Dispatch {
        match event {
            Event::Up => {
                self.value = if self.value >= self.max { self.min } else { self.value + 1 };
                Dispatch::Consumed
            }
            Event::Down => {
                self.value = if self.value <= self.min { self.max } else { self.value - 1 };
                Dispatch::Consumed
            }
            other => Dispatch::Unconsumed(other),
        }
    }
}
