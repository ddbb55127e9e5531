//! LED matrix front end.
//!
//! Owns the framebuffer the widgets draw into and pushes it to the
//! `DisplaySink` on refresh. The panel can be switched off from the clock
//! screen; while off, refreshes are dropped but widgets keep animating.

use crate::config::DEFAULT_BRIGHTNESS;
use crate::platform::DisplaySink;
use crate::ui::bitmap::Bitmap;

pub struct Display {
    canvas: Bitmap,
    enabled: bool,
    brightness: u8,
}

impl Display {
    pub const fn new() -> Self {
        Self {
            canvas: Bitmap::new(),
            enabled: true,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    /// Power up the panel, blank it and apply the default brightness.
    pub fn init(&mut self, sink: &mut dyn DisplaySink) {
        sink.set_power(true);
        sink.set_brightness(self.brightness);
        sink.clear();
        self.canvas.clear();
        self.enabled = true;
        info!("Display initialised");
    }

    pub fn canvas(&mut self) -> &mut Bitmap {
        &mut self.canvas
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.canvas
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn set_brightness(&mut self, sink: &mut dyn DisplaySink, level: u8) {
        self.brightness = level.min(15);
        sink.set_brightness(self.brightness);
    }

    /// Flip panel power.
    pub fn toggle(&mut self, sink: &mut dyn DisplaySink) {
        self.enabled = !self.enabled;
        sink.set_power(self.enabled);
        if !self.enabled {
            sink.clear();
        }
        debug!("Display power {}", self.enabled);
    }

    /// Push the frame if the panel is on.
    pub fn refresh(&mut self, sink: &mut dyn DisplaySink) {
        if self.enabled {
            sink.blit(&self.canvas);
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
