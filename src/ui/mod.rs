//! User interface subsystem - LED matrix + physical buttons.
//!
//! The dispatcher offers every input event to the active screen (which
//! may hand it to its focused widget first) and then to the menu state
//! machine. Rendering goes through a shared framebuffer that the screens
//! flush on every redraw.
//!
//! ## Components
//!
//! - **Bitmap**: 24×16 monochrome framebuffer
//! - **Widgets**: digits, scrolling text, weekday and alarm-day pickers
//! - **Screens**: clock, menu and the setup flows
//! - **Buttons**: 3 tactile switches (UP, DOWN, OK), chords for extra events

pub mod bitmap;
pub mod buttons;
pub mod display;
pub mod input_logic;
pub mod screens;
pub mod widgets;

use core::ops::BitOr;

/// Input events routed through widget → screen → state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    Up,
    Down,
    Ok,
    /// Toggle the radio (sleep timer) or silence a ringing alarm.
    SleepOff,
    /// Switch the LED matrix on or off.
    ToggleDisplay,
}

impl Event {
    /// Column in the transition table, if the state machine knows this event.
    pub const fn column(self) -> Option<usize> {
        match self {
            Event::Up => Some(0),
            Event::Down => Some(1),
            Event::Ok => Some(2),
            Event::SleepOff | Event::ToggleDisplay => None,
        }
    }
}

/// Outcome of offering an event to one layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Fully handled; nothing further sees it.
    Consumed,
    /// Still live; the next layer gets a chance.
    Unconsumed(Event),
}

impl Dispatch {
    pub fn is_consumed(self) -> bool {
        matches!(self, Dispatch::Consumed)
    }

    /// Offer a live event to the next layer; consumed results pass through.
    pub fn or_else<F>(self, next: F) -> Dispatch
    where
        F: FnOnce(Event) -> Dispatch,
    {
        match self {
            Dispatch::Consumed => Dispatch::Consumed,
            Dispatch::Unconsumed(event) => next(event),
        }
    }
}

/// Raw button bitmask as sampled from the GPIOs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const UP: Buttons = Buttons(1);
    pub const DOWN: Buttons = Buttons(2);
    pub const OK: Buttons = Buttons(4);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn from_bits(bits: u8) -> Self {
        Buttons(bits & 0x07)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Buttons) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}
