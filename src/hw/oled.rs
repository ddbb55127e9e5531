//! SSD1306 OLED standing in for the LED matrix.
//!
//! Each matrix pixel becomes a 4×4 block, centred on the 128×64 panel.

use defmt::warn;
use embedded_hal::i2c::I2c;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use clock_radio::config::{MATRIX_HEIGHT, MATRIX_WIDTH};
use clock_radio::platform::DisplaySink;
use clock_radio::ui::bitmap::Bitmap;

const SCALE: u32 = 4;
const OFFSET_X: u32 = (128 - MATRIX_WIDTH * SCALE) / 2;
const OFFSET_Y: u32 = (64 - MATRIX_HEIGHT * SCALE) / 2;

type Driver<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct OledSink<I2C> {
    display: Driver<I2C>,
}

impl<I2C: I2c> OledSink<I2C> {
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        if display.init().is_err() {
            warn!("OLED init failed");
        }
        Self { display }
    }

    fn flush(&mut self) {
        if self.display.flush().is_err() {
            warn!("OLED flush failed");
        }
    }
}

impl<I2C: I2c> DisplaySink for OledSink<I2C> {
    fn clear(&mut self) {
        self.display.clear_buffer();
        self.flush();
    }

    fn blit(&mut self, bitmap: &Bitmap) {
        for y in 0..MATRIX_HEIGHT {
            for x in 0..MATRIX_WIDTH {
                let on = bitmap.get_bit(x as i32, y as i32);
                for dy in 0..SCALE {
                    for dx in 0..SCALE {
                        self.display.set_pixel(
                            OFFSET_X + x * SCALE + dx,
                            OFFSET_Y + y * SCALE + dy,
                            on,
                        );
                    }
                }
            }
        }
        self.flush();
    }

    fn set_power(&mut self, on: bool) {
        if self.display.set_display_on(on).is_err() {
            warn!("OLED power switch failed");
        }
    }

    /// Matrix levels 0..=15 spread over the contrast range.
    fn set_brightness(&mut self, level: u8) {
        let contrast = level.min(15) * 16 + 15;
        if self.display.set_brightness(Brightness::custom(1, contrast)).is_err() {
            warn!("OLED brightness failed");
        }
    }
}
