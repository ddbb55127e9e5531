use heapless::String;

use crate::config::TEXT_CAPACITY;
use crate::ui::bitmap::Bitmap;
use crate::ui::widgets::{draw_glyphs, text_width, Frame, Widget, WidgetFlags};

/// Short string, ping-pong scrolled when wider than the widget.
pub struct Text {
    frame: Frame,
    text: String<TEXT_CAPACITY>,
    shift: i32,
    direction: i32,
}

impl Text {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            frame: Frame::new(width, height),
            text: String::new(),
            shift: 0,
            direction: 1,
        }
    }

    /// Replace the content. Longer strings are truncated at capacity.
    pub fn set_text(&mut self, text: &str) {
        if self.text.as_str() == text {
            return;
        }
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
        self.shift = 0;
        self.direction = 1;
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn shift(&self) -> i32 {
        self.shift
    }

    pub fn scroll_direction(&self) -> i32 {
        self.direction
    }

    fn advance_scroll(&mut self) {
        let overflow = text_width(&self.text) as i32 - self.frame.size().width as i32;
        if overflow <= 0 {
            self.frame.set_flag(WidgetFlags::SCROLL, false);
            self.shift = 0;
            self.direction = 1;
            return;
        }
        self.frame.set_flag(WidgetFlags::SCROLL, true);
        self.shift += self.direction;
        if self.shift >= overflow {
            self.direction = -1;
        } else if self.shift <= 0 {
            self.direction = 1;
        }
    }
}

impl Widget for Text {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn draw(&mut self, canvas: &mut Bitmap) {
        self.frame.clear(canvas);
        if self.text.is_empty() {
            return;
        }
        self.advance_scroll();
        if !self.frame.ink_phase() {
            trace!("text not inked");
            return;
        }
        draw_glyphs(&mut self.frame.region(canvas), &self.text, -self.shift);
    }
}
