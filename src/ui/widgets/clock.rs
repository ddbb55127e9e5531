use embedded_graphics::prelude::*;

use crate::ui::bitmap::Bitmap;
use crate::ui::widgets::{Digits, Frame, Widget};

/// HH MM with a seconds tick above the gap.
///
/// One extra row on top carries the tick dot, which hops between two
/// columns on odd and even seconds.
pub struct ClockWidget {
    frame: Frame,
    hour: Digits,
    minute: Digits,
    tick: Option<u8>,
}

impl ClockWidget {
    const MINUTE_X: i32 = 13;
    const TICK_X: i32 = 11;

    pub const fn new() -> Self {
        Self {
            frame: Frame::new(24, 9),
            hour: Digits::new(2, 0, 23),
            minute: Digits::tight(2, 0, 59),
            tick: None,
        }
    }

    /// `second = None` hides the tick (alarm preview).
    pub fn set_time(&mut self, hour: u8, minute: u8, second: Option<u8>) {
        self.hour.set(hour as u16);
        self.minute.set(minute as u16);
        self.tick = second;
    }

    pub fn time(&self) -> (u8, u8) {
        (self.hour.value() as u8, self.minute.value() as u8)
    }

    pub fn set_blink_fields(&mut self, hour: bool, minute: bool) {
        self.hour.set_blink(hour);
        self.minute.set_blink(minute);
    }
}

impl Default for ClockWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ClockWidget {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn bind(&mut self, origin: Point, canvas: &mut Bitmap) {
        self.frame.bind(origin, canvas);
        self.hour.bind(origin + Point::new(0, 1), canvas);
        self.minute.bind(origin + Point::new(Self::MINUTE_X, 1), canvas);
    }

    fn draw(&mut self, canvas: &mut Bitmap) {
        self.frame.clear(canvas);
        self.hour.draw(canvas);
        self.minute.draw(canvas);
        if let Some(second) = self.tick {
            self.frame
                .region(canvas)
                .set_pixel(Self::TICK_X + (second % 2) as i32, 0);
        }
    }

    fn set_blink(&mut self, blink: bool) {
        self.set_blink_fields(blink, blink);
    }
}
