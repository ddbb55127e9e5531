use crate::config::GLYPH_HEIGHT;
use crate::platform::Weekday;
use crate::ui::bitmap::Bitmap;
use crate::ui::widgets::{Frame, Text, Widget};
use crate::ui::{Dispatch, Event};

/// Two-letter captions. Index 0 is the "ok" commit slot.
const LABELS: [&str; 8] = ["ok", "mo", "tu", "we", "th", "fr", "sa", "su"];

/// Weekday picker: 0 = ok, 1..=7 = Monday..Sunday.
pub struct DayOfWeek {
    text: Text,
    value: u8,
}

impl DayOfWeek {
    pub const fn new() -> Self {
        Self {
            text: Text::new(12, GLYPH_HEIGHT),
            value: 0,
        }
    }

    /// Back to the "ok" slot.
    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn set_weekday(&mut self, day: Weekday) {
        self.value = day.number();
    }

    /// Selected weekday, `None` on the "ok" slot.
    pub fn weekday(&self) -> Option<Weekday> {
        self.value.checked_sub(1).and_then(Weekday::from_index)
    }

    pub fn label(&self) -> &'static str {
        LABELS[self.value as usize]
    }
}

impl Default for DayOfWeek {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for DayOfWeek {
    fn frame(&self) -> &Frame {
        self.text.frame()
    }

    fn frame_mut(&mut self) -> &mut Frame {
        self.text.frame_mut()
    }

    fn draw(&mut self, canvas: &mut Bitmap) {
        self.text.set_text(LABELS[self.value as usize]);
        self.text.draw(canvas);
    }

    fn set(&mut self, value: u16) {
        self.value = value.min(7) as u8;
    }

    fn get(&self) -> Option<u16> {
        Some(self.value as u16)
    }

    fn send_event(&mut self, event: Event) -> Dispatch {
        match event {
            Event::Up => {
                self.value = if self.value >= 7 { 0 } else { self.value + 1 };
                Dispatch::Consumed
            }
            Event::Down => {
                self.value = if self.value == 0 { 7 } else { self.value - 1 };
                Dispatch::Consumed
            }
            other => Dispatch::Unconsumed(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_all_eight_slots() {
        let mut d = DayOfWeek::new();
        assert_eq!(d.label(), "ok");
        d.send_event(Event::Up);
        assert_eq!(d.weekday(), Some(Weekday::Monday));
        for _ in 0..6 {
            d.send_event(Event::Up);
        }
        assert_eq!(d.label(), "su");
        assert_eq!(d.send_event(Event::Up), Dispatch::Consumed);
        assert_eq!(d.get(), Some(0));
        assert_eq!(d.weekday(), None);
    }

    #[test]
    fn down_wraps_to_sunday() {
        let mut d = DayOfWeek::new();
        d.send_event(Event::Down);
        assert_eq!(d.weekday(), Some(Weekday::Sunday));
    }

    #[test]
    fn set_weekday_and_reset() {
        let mut d = DayOfWeek::new();
        d.set_weekday(Weekday::Wednesday);
        assert_eq!(d.get(), Some(3));
        assert_eq!(d.label(), "we");
        d.reset();
        assert_eq!(d.get(), Some(0));
        d.set(99);
        assert_eq!(d.get(), Some(7));
    }

    #[test]
    fn ok_is_not_consumed() {
        let mut d = DayOfWeek::new();
        assert_eq!(d.send_event(Event::Ok), Dispatch::Unconsumed(Event::Ok));
    }
}
