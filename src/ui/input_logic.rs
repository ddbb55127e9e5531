//! Button chord decoding.
//!
//! Pressed buttons are accumulated while any of them is held; the event
//! is emitted when everything is released. That way UP+DOWN pressed a few
//! milliseconds apart still decodes as one chord.

use crate::ui::{Buttons, Event};

/// Map a released chord to its event.
pub fn chord_event(chord: Buttons) -> Option<Event> {
    const UP: u8 = Buttons::UP.bits();
    const DOWN: u8 = Buttons::DOWN.bits();
    const OK: u8 = Buttons::OK.bits();
    const UP_DOWN: u8 = UP | DOWN;
    const UP_OK: u8 = UP | OK;

    match chord.bits() {
        UP => Some(Event::Up),
        DOWN => Some(Event::Down),
        OK => Some(Event::Ok),
        UP_DOWN => Some(Event::ToggleDisplay),
        UP_OK => Some(Event::SleepOff),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ButtonDecoder {
    chord: Buttons,
}

impl ButtonDecoder {
    pub const fn new() -> Self {
        Self {
            chord: Buttons::NONE,
        }
    }

    /// Feed one sample; returns an event on full release.
    pub fn update(&mut self, sample: Buttons) -> Option<Event> {
        if !sample.is_empty() {
            self.chord = self.chord | sample;
            return None;
        }
        if self.chord.is_empty() {
            return None;
        }
        let chord = self.chord;
        self.chord = Buttons::NONE;
        let event = chord_event(chord);
        if event.is_none() {
            debug!("Ignoring chord {=u8:b}", chord.bits());
        }
        event
    }
}
