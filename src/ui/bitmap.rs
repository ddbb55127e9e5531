//! Framebuffer for the 24×16 LED matrix.
//!
//! Pixels are bit-packed row-major: pixel `(x, y)` is bit `i % 8` of byte
//! `i / 8` with `i = x + y * width`. Coordinates outside the matrix are
//! ignored so widgets can scroll partly (or fully) off-canvas without
//! bounds checks at every call site.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{MATRIX_BYTES, MATRIX_HEIGHT, MATRIX_WIDTH};

/// Monochrome frame, one bit per LED.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    bits: [u8; MATRIX_BYTES],
}

impl Bitmap {
    pub const WIDTH: u32 = MATRIX_WIDTH;
    pub const HEIGHT: u32 = MATRIX_HEIGHT;

    pub const fn new() -> Self {
        Self {
            bits: [0; MATRIX_BYTES],
        }
    }

    pub fn clear(&mut self) {
        self.bits = [0; MATRIX_BYTES];
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= Self::WIDTH as i32 || y >= Self::HEIGHT as i32 {
            return None;
        }
        Some(x as usize + y as usize * Self::WIDTH as usize)
    }

    pub fn set_bit(&mut self, x: i32, y: i32) {
        if let Some(i) = Self::index(x, y) {
            self.bits[i / 8] |= 1 << (i % 8);
        }
    }

    pub fn clear_bit(&mut self, x: i32, y: i32) {
        if let Some(i) = Self::index(x, y) {
            self.bits[i / 8] &= !(1 << (i % 8));
        }
    }

    /// Off-canvas pixels read as unlit.
    pub fn get_bit(&self, x: i32, y: i32) -> bool {
        match Self::index(x, y) {
            Some(i) => self.bits[i / 8] & (1 << (i % 8)) != 0,
            None => false,
        }
    }

    /// Raw packed frame, as pushed to the display driver.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Number of lit pixels inside a rectangle.
    pub fn count_lit(&self, area: &Rectangle) -> usize {
        area.points().filter(|p| self.get_bit(p.x, p.y)).count()
    }

    /// Clipped drawing surface over a sub-rectangle, in local coordinates.
    pub fn region(&mut self, area: Rectangle) -> Region<'_> {
        Region { canvas: self, area }
    }
}

impl Default for Bitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawTarget for Bitmap {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            match color {
                BinaryColor::On => self.set_bit(point.x, point.y),
                BinaryColor::Off => self.clear_bit(point.x, point.y),
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        Size::new(Self::WIDTH, Self::HEIGHT)
    }
}

/// A widget's window into the framebuffer.
///
/// `(0, 0)` is the top-left corner of the area; anything drawn outside the
/// area is dropped, so a widget can never touch its neighbours.
pub struct Region<'a> {
    canvas: &'a mut Bitmap,
    area: Rectangle,
}

impl Region<'_> {
    fn to_canvas(&self, local: Point) -> Option<Point> {
        let size = self.area.size;
        if local.x < 0 || local.y < 0 || local.x >= size.width as i32 || local.y >= size.height as i32
        {
            return None;
        }
        Some(self.area.top_left + local)
    }

    pub fn set_pixel(&mut self, x: i32, y: i32) {
        if let Some(p) = self.to_canvas(Point::new(x, y)) {
            self.canvas.set_bit(p.x, p.y);
        }
    }

    /// Unlight every pixel of the area.
    pub fn clear(&mut self) {
        for p in self.area.points() {
            self.canvas.clear_bit(p.x, p.y);
        }
    }
}

impl DrawTarget for Region<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(local, color) in pixels {
            if let Some(p) = self.to_canvas(local) {
                match color {
                    BinaryColor::On => self.canvas.set_bit(p.x, p.y),
                    BinaryColor::Off => self.canvas.clear_bit(p.x, p.y),
                }
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Region<'_> {
    fn size(&self) -> Size {
        self.area.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear_bit() {
        let mut bmp = Bitmap::new();
        bmp.set_bit(3, 2);
        assert!(bmp.get_bit(3, 2));
        // i = 3 + 2*24 = 51 -> byte 6, bit 3
        assert_eq!(bmp.as_bytes()[6], 1 << 3);
        bmp.clear_bit(3, 2);
        assert!(!bmp.get_bit(3, 2));
        assert!(bmp.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut bmp = Bitmap::new();
        bmp.set_bit(-1, 0);
        bmp.set_bit(0, -1);
        bmp.set_bit(24, 0);
        bmp.set_bit(0, 16);
        bmp.clear_bit(100, 100);
        assert!(bmp.as_bytes().iter().all(|&b| b == 0));
        assert!(!bmp.get_bit(-5, 3));
    }

    #[test]
    fn clear_resets_everything() {
        let mut bmp = Bitmap::new();
        bmp.set_bit(0, 0);
        bmp.set_bit(23, 15);
        bmp.clear();
        assert_eq!(bmp, Bitmap::new());
    }

    #[test]
    fn region_clips_to_its_area() {
        let mut bmp = Bitmap::new();
        let area = Rectangle::new(Point::new(4, 4), Size::new(2, 2));
        {
            let mut region = bmp.region(area);
            region.set_pixel(0, 0);
            region.set_pixel(1, 1);
            region.set_pixel(2, 0);
            region.set_pixel(-1, 0);
        }
        assert!(bmp.get_bit(4, 4));
        assert!(bmp.get_bit(5, 5));
        assert!(!bmp.get_bit(6, 4));
        assert!(!bmp.get_bit(3, 4));
        assert_eq!(bmp.count_lit(&Rectangle::new(Point::zero(), Size::new(24, 16))), 2);
    }

    #[test]
    fn region_clear_leaves_neighbours() {
        let mut bmp = Bitmap::new();
        bmp.set_bit(0, 0);
        bmp.set_bit(1, 0);
        bmp.region(Rectangle::new(Point::new(1, 0), Size::new(1, 1))).clear();
        assert!(bmp.get_bit(0, 0));
        assert!(!bmp.get_bit(1, 0));
    }
}
