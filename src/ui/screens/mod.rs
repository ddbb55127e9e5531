//! Screens: one controller per menu state (or group of states).
//!
//! A screen places pool widgets on the canvas, feeds them model data on
//! every `show()` and interprets the events its widgets leave unconsumed.
//! The dispatcher calls `hide()` on the outgoing screen and
//! `set_initial_view()` + `show()` on the incoming one whenever the state
//! machine moves.

pub mod alarm_setup;
pub mod clock;
pub mod date_setup;
pub mod menu;
pub mod radio_setup;
pub mod setup;
pub mod time_setup;

use crate::alarm::AlarmBank;
use crate::error::Error;
use crate::platform::{Clock, DisplaySink, NvStore, Tuner};
use crate::radio::RadioControl;
use crate::state_machine::{State, StateMachine};
use crate::station::StationBank;
use crate::ui::display::Display;
use crate::ui::widgets::WidgetPool;
use crate::ui::{Dispatch, Event};

pub use alarm_setup::AlarmSetup;
pub use clock::ClockScreen;
pub use date_setup::DateSetup;
pub use menu::MenuScreen;
pub use radio_setup::RadioSetup;
pub use setup::SetupScreen;
pub use time_setup::TimeSetup;

/// Everything a screen may touch while handling an event or redrawing.
pub struct Context<'a> {
    pub display: &'a mut Display,
    pub sink: &'a mut dyn DisplaySink,
    pub widgets: &'a mut WidgetPool,
    pub alarms: &'a mut AlarmBank,
    pub stations: &'a mut StationBank,
    pub fsm: &'a mut StateMachine,
    pub radio: &'a mut RadioControl,
    pub clock: &'a mut dyn Clock,
    pub store: &'a mut dyn NvStore,
    pub tuner: &'a mut dyn Tuner,
}

impl Context<'_> {
    /// Flush the framebuffer to the panel.
    pub fn refresh(&mut self) {
        self.display.refresh(&mut *self.sink);
    }
}

pub trait Screen {
    /// Update widgets from the model, draw them and refresh the panel.
    fn show(&mut self, ctx: &mut Context<'_>);

    /// Leave the screen. Blanks the canvas by default.
    fn hide(&mut self, ctx: &mut Context<'_>) {
        ctx.display.canvas().clear();
    }

    /// Offer an event. Storage failures while committing an edit surface
    /// as errors; everything else is a `Dispatch` value.
    fn send_event(&mut self, event: Event, _ctx: &mut Context<'_>) -> Result<Dispatch, Error> {
        Ok(Dispatch::Unconsumed(event))
    }

    /// Entered because the state machine moved to `state`.
    fn set_initial_view(&mut self, _state: State, _ctx: &mut Context<'_>) {}
}

/// One instance of every screen.
pub struct Screens {
    pub clock: ClockScreen,
    pub menu: MenuScreen,
    pub time: TimeSetup,
    pub date: DateSetup,
    pub alarm: AlarmSetup,
    pub radio: RadioSetup,
}

impl Screens {
    pub fn new() -> Self {
        Self {
            clock: ClockScreen::new(),
            menu: MenuScreen::new(),
            time: TimeSetup::new(),
            date: DateSetup::new(),
            alarm: AlarmSetup::new(),
            radio: RadioSetup::new(),
        }
    }

    /// The screen that renders `state`.
    pub fn for_state(&mut self, state: State) -> &mut dyn Screen {
        match state {
            State::Clock | State::Info | State::Radio | State::RadioOn => &mut self.clock,
            State::Menu
            | State::SetTime
            | State::SetDate
            | State::SetAlarms
            | State::SetRadio
            | State::Exit => &mut self.menu,
            State::TimeSetup => &mut self.time,
            State::DateSetup => &mut self.date,
            State::AlarmSetup => &mut self.alarm,
            State::RadioSetup => &mut self.radio,
        }
    }
}

impl Default for Screens {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod harness {
    //! Owns one of everything so screen tests can build a `Context`.

    use super::*;
    use crate::mock::{FakeClock, FakeSink, FakeTuner, MemStore};
    use crate::platform::DateTime;

    pub struct Rig {
        pub display: Display,
        pub sink: FakeSink,
        pub widgets: WidgetPool,
        pub alarms: AlarmBank,
        pub stations: StationBank,
        pub fsm: StateMachine,
        pub radio: RadioControl,
        pub clock: FakeClock,
        pub store: MemStore,
        pub tuner: FakeTuner,
    }

    impl Rig {
        pub fn new() -> Self {
            Self {
                display: Display::new(),
                sink: FakeSink::default(),
                widgets: WidgetPool::new(),
                alarms: AlarmBank::new(),
                stations: StationBank::new(),
                fsm: StateMachine::default(),
                radio: RadioControl::new(),
                // Wednesday
                clock: FakeClock::at(DateTime::new(2024, 1, 3, 10, 15, 42)),
                store: MemStore::new(),
                tuner: FakeTuner::default(),
            }
        }

        pub fn ctx(&mut self) -> Context<'_> {
            Context {
                display: &mut self.display,
                sink: &mut self.sink,
                widgets: &mut self.widgets,
                alarms: &mut self.alarms,
                stations: &mut self.stations,
                fsm: &mut self.fsm,
                radio: &mut self.radio,
                clock: &mut self.clock,
                store: &mut self.store,
                tuner: &mut self.tuner,
            }
        }
    }
}
