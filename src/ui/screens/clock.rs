//! Main display.
//!
//! The clock always occupies the top nine rows. What goes underneath
//! depends on a view nested inside the coarse menu state, advanced by OK:
//!
//! ```text
//!   Clock mode:  Clock -> Alarm 0 -> .. -> Alarm 3 -> Clock
//!   Info mode:   Date <-> Temperature
//!   Radio mode:  Radio (OK = switch on / next preset)
//! ```
//!
//! SLEEP toggles the radio (starting the sleep timer when switching on)
//! and the UP+DOWN chord switches the panel off and on in every view.

use core::fmt::Write;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use crate::config::{MAX_ALARMS, TEXT_CAPACITY};
use crate::error::Error;
use crate::state_machine::{Attributes, State};
use crate::ui::screens::{Context, Screen};
use crate::ui::widgets::Widget;
use crate::ui::{Dispatch, Event};

/// Coarse mode, picked from the menu state on entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Clock,
    Info,
    Radio,
}

impl Mode {
    fn for_state(state: State) -> Self {
        match state {
            State::Info => Mode::Info,
            State::Radio | State::RadioOn => Mode::Radio,
            _ => Mode::Clock,
        }
    }
}

/// What the lower half shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum View {
    Clock,
    Alarm(usize),
    Date,
    Temperature,
    Radio,
}

/// Rows below the clock.
const LOWER: Rectangle = Rectangle::new(Point::new(0, 9), Size::new(24, 7));

pub struct ClockScreen {
    mode: Option<Mode>,
    view: View,
}

impl ClockScreen {
    pub const fn new() -> Self {
        Self {
            mode: None,
            view: View::Clock,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    fn next_view(&mut self, ctx: &mut Context<'_>) {
        self.view = match self.view {
            View::Clock => View::Alarm(0),
            View::Alarm(i) if i + 1 < MAX_ALARMS => View::Alarm(i + 1),
            View::Alarm(_) => View::Clock,
            View::Date => View::Temperature,
            View::Temperature => View::Date,
            View::Radio => {
                if ctx.fsm.has_attribute(Attributes::RADIO_ON) {
                    ctx.radio.next_station(&mut *ctx.tuner, ctx.stations);
                } else {
                    ctx.radio.switch_on(ctx.fsm, &mut *ctx.tuner, ctx.stations);
                }
                View::Radio
            }
        };
    }

    fn toggle_radio(&mut self, ctx: &mut Context<'_>) {
        if ctx.fsm.has_attribute(Attributes::RADIO_ON) {
            ctx.radio.switch_off(ctx.fsm, &mut *ctx.tuner);
        } else {
            let minute = ctx.clock.now().minute;
            ctx.radio
                .switch_on_sleep(ctx.fsm, &mut *ctx.tuner, ctx.stations, minute);
        }
    }
}

impl Default for ClockScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for ClockScreen {
    fn show(&mut self, ctx: &mut Context<'_>) {
        let now = ctx.clock.now();
        let mut line: String<TEXT_CAPACITY> = String::new();

        ctx.widgets.time.set_time(now.hour, now.minute, Some(now.second));
        match self.view {
            View::Alarm(slot) => {
                let alarm = ctx.alarms.get(slot).copied().unwrap_or_default();
                ctx.widgets.time.set_time(alarm.hour, alarm.minute, None);
                ctx.widgets.alarm_days.set_current(Some(slot));
                ctx.widgets.alarm_days.load(ctx.alarms);
            }
            View::Clock => {
                ctx.widgets.alarm_days.set_current(None);
                ctx.widgets.alarm_days.load(ctx.alarms);
            }
            View::Date => {
                let _ = write!(line, "{}/{}/{}", now.day, now.month, now.year);
                ctx.widgets.bottom_text.set_text(&line);
            }
            View::Temperature => {
                let _ = write!(line, "{}'C", ctx.clock.temperature() / 10);
                ctx.widgets.bottom_text.set_text(&line);
            }
            View::Radio => {
                let f = ctx.radio.frequency();
                let _ = write!(line, "{}.{}", f / 10, f % 10);
                let station = ctx.radio.station();
                let playing = ctx.fsm.has_attribute(Attributes::RADIO_ON);
                ctx.widgets.radio.set_message(&line);
                ctx.widgets.radio.set_station(playing.then_some(station));
            }
        }

        let widgets = &mut *ctx.widgets;
        let canvas = ctx.display.canvas();
        widgets.time.draw(canvas);
        canvas.region(LOWER).clear();
        match self.view {
            View::Clock | View::Alarm(_) => {
                widgets.weekday.set_weekday(now.weekday);
                widgets.weekday.draw(canvas);
                widgets.alarm_days.draw(canvas);
            }
            View::Date | View::Temperature => widgets.bottom_text.draw(canvas),
            View::Radio => widgets.radio.draw(canvas),
        }
        ctx.refresh();
    }

    fn send_event(&mut self, event: Event, ctx: &mut Context<'_>) -> Result<Dispatch, Error> {
        match event {
            Event::Ok => self.next_view(ctx),
            Event::SleepOff => self.toggle_radio(ctx),
            Event::ToggleDisplay => ctx.display.toggle(&mut *ctx.sink),
            other => return Ok(Dispatch::Unconsumed(other)),
        }
        Ok(Dispatch::Consumed)
    }

    fn set_initial_view(&mut self, state: State, ctx: &mut Context<'_>) {
        let mode = Mode::for_state(state);
        if self.mode != Some(mode) {
            debug!("Clock screen mode {}", mode);
            self.mode = Some(mode);
            self.view = match mode {
                Mode::Clock => View::Clock,
                Mode::Info => View::Date,
                Mode::Radio => View::Radio,
            };
        }

        let widgets = &mut *ctx.widgets;
        let canvas = ctx.display.canvas();
        widgets.time.set_blink(false);
        widgets.weekday.set_blink(false);
        widgets.time.bind(Point::zero(), canvas);
        widgets.alarm_days.bind(Point::new(0, 9), canvas);
        widgets.weekday.bind(Point::new(6, 9), canvas);
        widgets.bottom_text.bind(Point::new(1, 9), canvas);
        widgets.radio.bind(Point::new(0, 9), canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::Alarm;
    use crate::platform::Band;
    use crate::station::Station;
    use crate::ui::screens::harness::Rig;

    fn entered(state: State, rig: &mut Rig) -> ClockScreen {
        let mut screen = ClockScreen::new();
        screen.set_initial_view(state, &mut rig.ctx());
        screen
    }

    fn ok(screen: &mut ClockScreen, rig: &mut Rig) {
        assert_eq!(screen.send_event(Event::Ok, &mut rig.ctx()), Ok(Dispatch::Consumed));
    }

    #[test]
    fn ok_cycles_alarm_views() {
        let mut rig = Rig::new();
        let mut screen = entered(State::Clock, &mut rig);
        assert_eq!(screen.view(), View::Clock);
        for i in 0..MAX_ALARMS {
            ok(&mut screen, &mut rig);
            assert_eq!(screen.view(), View::Alarm(i));
        }
        ok(&mut screen, &mut rig);
        assert_eq!(screen.view(), View::Clock);
    }

    #[test]
    fn info_toggles_date_and_temperature() {
        let mut rig = Rig::new();
        let mut screen = entered(State::Info, &mut rig);
        screen.show(&mut rig.ctx());
        assert_eq!(rig.widgets.bottom_text.text(), "3/1/2024");
        ok(&mut screen, &mut rig);
        screen.show(&mut rig.ctx());
        assert_eq!(rig.widgets.bottom_text.text(), "21'C");
        ok(&mut screen, &mut rig);
        assert_eq!(screen.view(), View::Date);
    }

    #[test]
    fn same_mode_keeps_sub_view() {
        let mut rig = Rig::new();
        let mut screen = entered(State::Clock, &mut rig);
        ok(&mut screen, &mut rig);
        screen.set_initial_view(State::Clock, &mut rig.ctx());
        assert_eq!(screen.view(), View::Alarm(0));

        screen.set_initial_view(State::Info, &mut rig.ctx());
        screen.set_initial_view(State::Clock, &mut rig.ctx());
        assert_eq!(screen.view(), View::Clock);
    }

    #[test]
    fn alarm_view_shows_alarm_time_without_tick() {
        let mut rig = Rig::new();
        rig.alarms.set(1, Alarm::new(6, 45, 0b11)).unwrap();
        let mut screen = entered(State::Clock, &mut rig);
        ok(&mut screen, &mut rig);
        ok(&mut screen, &mut rig);
        screen.show(&mut rig.ctx());
        assert_eq!(rig.widgets.time.time(), (6, 45));
        assert!(!rig.sink.frame.get_bit(11, 0));
        assert!(!rig.sink.frame.get_bit(12, 0));
        assert_eq!(rig.widgets.alarm_days.get(), Some(0b11));
    }

    #[test]
    fn radio_ok_switches_on_then_cycles() {
        let mut rig = Rig::new();
        rig.stations.set(0, Station::new(988)).unwrap();
        rig.stations.set(1, Station::new(1012)).unwrap();
        let mut screen = entered(State::Radio, &mut rig);

        ok(&mut screen, &mut rig);
        assert!(rig.fsm.has_attribute(Attributes::RADIO_ON));
        assert!(!rig.fsm.has_attribute(Attributes::SLEEP_ON));
        assert_eq!(rig.tuner.frequency, Some((Band::Fm, 9880)));
        screen.show(&mut rig.ctx());
        assert_eq!(rig.widgets.radio.message(), "98.8");

        ok(&mut screen, &mut rig);
        assert_eq!(rig.radio.station(), 1);
        assert_eq!(rig.tuner.frequency, Some((Band::Fm, 10120)));
    }

    #[test]
    fn sleep_off_toggles_radio_with_timer() {
        let mut rig = Rig::new();
        let mut screen = entered(State::Clock, &mut rig);
        let result = screen.send_event(Event::SleepOff, &mut rig.ctx());
        assert_eq!(result, Ok(Dispatch::Consumed));
        assert!(rig.fsm.has_attribute(Attributes::RADIO_ON));
        assert!(rig.fsm.has_attribute(Attributes::SLEEP_ON));
        assert!(rig.radio.sleep().is_armed());

        screen.send_event(Event::SleepOff, &mut rig.ctx()).unwrap();
        assert!(!rig.fsm.has_attribute(Attributes::RADIO_ON));
        assert!(!rig.fsm.has_attribute(Attributes::SLEEP_ON));
        assert!(rig.tuner.muted);
    }

    #[test]
    fn toggle_display_and_navigation_passthrough() {
        let mut rig = Rig::new();
        let mut screen = entered(State::Clock, &mut rig);
        let result = screen.send_event(Event::ToggleDisplay, &mut rig.ctx());
        assert_eq!(result, Ok(Dispatch::Consumed));
        assert!(!rig.display.is_enabled());
        for event in [Event::Up, Event::Down] {
            assert_eq!(screen.send_event(event, &mut rig.ctx()), Ok(Dispatch::Unconsumed(event)));
        }
    }

    #[test]
    fn widgets_stay_in_their_rows() {
        let mut rig = Rig::new();
        let mut screen = entered(State::Clock, &mut rig);
        screen.show(&mut rig.ctx());
        let top = Rectangle::new(Point::zero(), Size::new(24, 9));
        let all = Rectangle::new(Point::zero(), Size::new(24, 16));
        assert!(rig.sink.frame.count_lit(&top) > 0);
        // Wednesday label sits in the lower half.
        assert!(rig.sink.frame.count_lit(&all) > rig.sink.frame.count_lit(&top));
    }
}
