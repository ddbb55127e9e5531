use embedded_graphics::prelude::*;

use crate::config::{GLYPH_HEIGHT, MAX_STATIONS};
use crate::ui::bitmap::Bitmap;
use crate::ui::widgets::{Frame, Text, Widget};

/// Frequency text plus a now-playing column on the right edge.
///
/// Preset `i` lights rows `2i` and `2i + 1` of the last column.
pub struct RadioWidget {
    frame: Frame,
    text: Text,
    station: Option<usize>,
}

impl RadioWidget {
    const INDICATOR_X: i32 = 23;

    pub const fn new() -> Self {
        Self {
            frame: Frame::new(24, GLYPH_HEIGHT),
            text: Text::new(22, GLYPH_HEIGHT),
            station: None,
        }
    }

    pub fn set_station(&mut self, station: Option<usize>) {
        self.station = station.filter(|&s| s < MAX_STATIONS);
    }

    pub fn set_message(&mut self, message: &str) {
        self.text.set_text(message);
    }

    pub fn message(&self) -> &str {
        self.text.text()
    }
}

impl Default for RadioWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for RadioWidget {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn bind(&mut self, origin: Point, canvas: &mut Bitmap) {
        self.frame.bind(origin, canvas);
        self.text.bind(origin, canvas);
    }

    fn draw(&mut self, canvas: &mut Bitmap) {
        self.frame.clear(canvas);
        self.text.draw(canvas);
        if let Some(slot) = self.station {
            let mut region = self.frame.region(canvas);
            let row = 2 * slot as i32;
            region.set_pixel(Self::INDICATOR_X, row);
            region.set_pixel(Self::INDICATOR_X, row + 1);
        }
    }

    fn set_blink(&mut self, blink: bool) {
        self.text.set_blink(blink);
    }
}
