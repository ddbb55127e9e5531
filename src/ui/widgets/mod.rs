//! Matrix widgets.
//!
//! A widget is a small renderable element bound to a rectangle of the
//! framebuffer. All widgets live in one `WidgetPool` created at start-up;
//! screens refer to them by `WidgetId` and rebind them to new positions as
//! navigation moves between screens. Nothing is allocated per frame.

pub mod alarm_days;
pub mod clock;
pub mod day_of_week;
pub mod digits;
pub mod radio;
pub mod text;

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::Baseline;

use crate::config::{GLYPH_HEIGHT, GLYPH_WIDTH, MAX_ALARMS, TUNE_MAX, TUNE_MIN, YEAR_MAX, YEAR_MIN};
use crate::ui::bitmap::{Bitmap, Region};
use crate::ui::{Dispatch, Event};

pub use alarm_days::AlarmDays;
pub use clock::ClockWidget;
pub use day_of_week::DayOfWeek;
pub use digits::Digits;
pub use radio::RadioWidget;
pub use text::Text;

/// Per-widget attribute bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WidgetFlags(u8);

impl WidgetFlags {
    pub const BLINK: WidgetFlags = WidgetFlags(1);
    pub const SCROLL: WidgetFlags = WidgetFlags(2);
    pub const INKED: WidgetFlags = WidgetFlags(4);

    pub const fn contains(self, other: WidgetFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Geometry and attributes shared by every widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    origin: Point,
    size: Size,
    flags: WidgetFlags,
}

impl Frame {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            origin: Point::zero(),
            size: Size::new(width, height),
            flags: WidgetFlags::INKED,
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn area(&self) -> Rectangle {
        Rectangle::new(self.origin, self.size)
    }

    /// Move the frame and blank its new area.
    pub fn bind(&mut self, origin: Point, canvas: &mut Bitmap) {
        self.origin = origin;
        self.clear(canvas);
    }

    pub fn clear(&self, canvas: &mut Bitmap) {
        canvas.region(self.area()).clear();
    }

    pub fn region<'a>(&self, canvas: &'a mut Bitmap) -> Region<'a> {
        canvas.region(self.area())
    }

    pub fn flags(&self) -> WidgetFlags {
        self.flags
    }

    pub fn has(&self, flag: WidgetFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn set_flag(&mut self, flag: WidgetFlags, on: bool) {
        if on {
            self.flags.0 |= flag.0;
        } else {
            self.flags.0 &= !flag.0;
        }
    }

    /// Advance the blink phase. Returns whether content is drawn this frame.
    ///
    /// While blinking, INKED flips on every call; otherwise the widget is
    /// always inked.
    pub fn ink_phase(&mut self) -> bool {
        if self.has(WidgetFlags::BLINK) {
            self.flags.0 ^= WidgetFlags::INKED.0;
        } else {
            self.set_flag(WidgetFlags::INKED, true);
        }
        self.has(WidgetFlags::INKED)
    }
}

/// Capability set shared by all widgets.
pub trait Widget {
    fn frame(&self) -> &Frame;
    fn frame_mut(&mut self) -> &mut Frame;

    /// Render into the bound rectangle.
    fn draw(&mut self, canvas: &mut Bitmap);

    fn set(&mut self, _value: u16) {}

    fn get(&self) -> Option<u16> {
        None
    }

    fn send_event(&mut self, event: Event) -> Dispatch {
        Dispatch::Unconsumed(event)
    }

    fn set_blink(&mut self, blink: bool) {
        self.frame_mut().set_flag(WidgetFlags::BLINK, blink);
    }

    /// Attach to a position on the canvas; clears the new area.
    fn bind(&mut self, origin: Point, canvas: &mut Bitmap) {
        self.frame_mut().bind(origin, canvas);
    }

    fn width(&self) -> u32 {
        self.frame().size().width
    }

    fn height(&self) -> u32 {
        self.frame().size().height
    }
}

fn glyph_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_5X8)
        .text_color(BinaryColor::On)
        .build()
}

/// Draw `text` one glyph per 6 px cell, first cell at local `x`.
pub(crate) fn draw_glyphs(region: &mut Region<'_>, text: &str, x: i32) {
    let style = glyph_style();
    let mut buf = [0u8; 4];
    for (i, ch) in text.chars().enumerate() {
        let cell = Point::new(x + i as i32 * GLYPH_WIDTH as i32, 0);
        // Skip cells fully outside the region.
        if cell.x + (GLYPH_WIDTH as i32) <= 0 || cell.x >= region.size().width as i32 {
            continue;
        }
        let _ = style.draw_string(ch.encode_utf8(&mut buf), cell, Baseline::Top, region);
    }
}

/// Pixel width of a string at one glyph per cell.
pub(crate) fn text_width(text: &str) -> u32 {
    text.chars().count() as u32 * GLYPH_WIDTH
}

/// Handle to a widget in the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WidgetId {
    Time,
    Hour,
    Minute,
    Day,
    Month,
    Year,
    Tune,
    AlarmDays,
    Weekday,
    Radio,
    BottomText,
    Label,
}

/// Every widget on the device, allocated once.
pub struct WidgetPool {
    pub time: ClockWidget,
    pub hour: Digits,
    pub minute: Digits,
    pub day: Digits,
    pub month: Digits,
    pub year: Digits,
    pub tune: Digits,
    pub alarm_days: AlarmDays,
    pub weekday: DayOfWeek,
    pub radio: RadioWidget,
    pub bottom_text: Text,
    pub label: Text,
}

impl WidgetPool {
    pub fn new() -> Self {
        Self {
            time: ClockWidget::new(),
            hour: Digits::new(2, 0, 23),
            minute: Digits::tight(2, 0, 59),
            day: Digits::new(2, 1, 31),
            month: Digits::new(2, 1, 12),
            year: Digits::new(4, YEAR_MIN, YEAR_MAX),
            tune: Digits::new(4, TUNE_MIN, TUNE_MAX),
            alarm_days: AlarmDays::new(MAX_ALARMS),
            weekday: DayOfWeek::new(),
            radio: RadioWidget::new(),
            bottom_text: Text::new(23, GLYPH_HEIGHT),
            label: Text::new(24, GLYPH_HEIGHT),
        }
    }

    pub fn widget(&self, id: WidgetId) -> &dyn Widget {
        match id {
            WidgetId::Time => &self.time,
            WidgetId::Hour => &self.hour,
            WidgetId::Minute => &self.minute,
            WidgetId::Day => &self.day,
            WidgetId::Month => &self.month,
            WidgetId::Year => &self.year,
            WidgetId::Tune => &self.tune,
            WidgetId::AlarmDays => &self.alarm_days,
            WidgetId::Weekday => &self.weekday,
            WidgetId::Radio => &self.radio,
            WidgetId::BottomText => &self.bottom_text,
            WidgetId::Label => &self.label,
        }
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> &mut dyn Widget {
        match id {
            WidgetId::Time => &mut self.time,
            WidgetId::Hour => &mut self.hour,
            WidgetId::Minute => &mut self.minute,
            WidgetId::Day => &mut self.day,
            WidgetId::Month => &mut self.month,
            WidgetId::Year => &mut self.year,
            WidgetId::Tune => &mut self.tune,
            WidgetId::AlarmDays => &mut self.alarm_days,
            WidgetId::Weekday => &mut self.weekday,
            WidgetId::Radio => &mut self.radio,
            WidgetId::BottomText => &mut self.bottom_text,
            WidgetId::Label => &mut self.label,
        }
    }
}

impl Default for WidgetPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ink_phase_steady_without_blink() {
        let mut frame = Frame::new(4, 4);
        assert!(frame.ink_phase());
        assert!(frame.ink_phase());
    }

    #[test]
    fn ink_phase_alternates_while_blinking() {
        let mut frame = Frame::new(4, 4);
        frame.set_flag(WidgetFlags::BLINK, true);
        let phases = [frame.ink_phase(), frame.ink_phase(), frame.ink_phase()];
        assert_eq!(phases, [false, true, false]);
        frame.set_flag(WidgetFlags::BLINK, false);
        assert!(frame.ink_phase());
    }

    #[test]
    fn bind_clears_new_area_only() {
        let mut canvas = Bitmap::new();
        canvas.set_bit(0, 0);
        canvas.set_bit(5, 5);
        let mut frame = Frame::new(2, 2);
        frame.bind(Point::new(4, 4), &mut canvas);
        assert!(canvas.get_bit(0, 0));
        assert!(!canvas.get_bit(5, 5));
        assert_eq!(frame.origin(), Point::new(4, 4));
    }

    #[test]
    fn glyphs_stay_inside_region() {
        let mut canvas = Bitmap::new();
        let area = Rectangle::new(Point::new(2, 4), Size::new(10, 8));
        draw_glyphs(&mut canvas.region(area), "8888", -3);
        assert!(canvas.count_lit(&area) > 0);
        let all = Rectangle::new(Point::zero(), Size::new(24, 16));
        assert_eq!(canvas.count_lit(&all), canvas.count_lit(&area));
    }

    #[test]
    fn pool_hands_out_widgets_by_id() {
        let mut pool = WidgetPool::new();
        pool.widget_mut(WidgetId::Year).set(1999);
        assert_eq!(pool.widget(WidgetId::Year).get(), Some(YEAR_MIN));
        assert_eq!(pool.widget(WidgetId::Tune).width(), 24);
        assert_eq!(pool.widget(WidgetId::Time).height(), 9);
    }
}
