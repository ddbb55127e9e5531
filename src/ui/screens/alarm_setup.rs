//! Alarm editor.
//!
//! Walks the four slots in order. Each slot has three fields: hour,
//! minute and a weekday picker, with the slot's day matrix drawn beside
//! the picker. Confirming the picker on a weekday toggles that day and
//! re-opens the same slot on the picker, so any number of days can be
//! flipped before moving on. Confirming it on "ok" saves the slot and
//! opens the next one; after the last slot the edit finishes.

use embedded_graphics::prelude::*;

use crate::config::MAX_ALARMS;
use crate::error::Error;
use crate::state_machine::State;
use crate::ui::screens::{Context, Screen, SetupScreen};
use crate::ui::widgets::{Widget, WidgetId};
use crate::ui::{Dispatch, Event};

const FIELDS: [WidgetId; 3] = [WidgetId::Hour, WidgetId::Minute, WidgetId::Weekday];

/// Index of the weekday picker in `FIELDS`.
const DAY_FIELD: usize = 2;

pub struct AlarmSetup {
    setup: SetupScreen,
    slot: usize,
}

impl AlarmSetup {
    pub const fn new() -> Self {
        Self {
            setup: SetupScreen::new(),
            slot: 0,
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn is_editing(&self) -> bool {
        self.setup.is_started()
    }

    /// Seed the fields from the cached record of the current slot.
    fn load_slot(&self, ctx: &mut Context<'_>) {
        let alarm = ctx.alarms.get(self.slot).copied().unwrap_or_default();
        let widgets = &mut *ctx.widgets;
        widgets.hour.set(alarm.hour as u16);
        widgets.minute.set(alarm.minute as u16);
        widgets.alarm_days.load(ctx.alarms);
        widgets.alarm_days.set_current(Some(self.slot));
        widgets.weekday.reset();
    }

    fn reopen(&mut self, start: usize, ctx: &mut Context<'_>) {
        self.load_slot(ctx);
        self.setup.restart(start);
        self.setup.add_widgets(&FIELDS);
    }
}

impl Default for AlarmSetup {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for AlarmSetup {
    fn show(&mut self, ctx: &mut Context<'_>) {
        // Read-only, so drawn outside the edit list.
        ctx.widgets.alarm_days.draw(ctx.display.canvas());
        self.setup.show(ctx);
    }

    fn send_event(&mut self, event: Event, ctx: &mut Context<'_>) -> Result<Dispatch, Error> {
        let result = self.setup.send_event(event, ctx.widgets);
        if result != Dispatch::Unconsumed(Event::Ok) {
            return Ok(result);
        }

        let toggled = ctx.widgets.weekday.weekday();
        let mut alarm = ctx.alarms.get(self.slot).copied().unwrap_or_default();
        alarm.set_at(
            ctx.widgets.hour.value() as u8,
            ctx.widgets.minute.value() as u8,
            alarm.days,
        );
        if let Some(day) = toggled {
            alarm.toggle_day(day);
        }
        ctx.alarms.set(self.slot, alarm)?;

        if toggled.is_some() {
            debug!("Alarm {} days now {=u8:b}", self.slot, alarm.days);
            self.reopen(DAY_FIELD, ctx);
            return Ok(Dispatch::Consumed);
        }

        ctx.alarms.save(&mut *ctx.store, self.slot)?;
        info!("Alarm {} saved", self.slot);
        self.slot += 1;
        if self.slot == MAX_ALARMS {
            self.slot = 0;
            self.setup.finish();
            return Ok(result);
        }
        self.reopen(0, ctx);
        Ok(Dispatch::Consumed)
    }

    fn set_initial_view(&mut self, _state: State, ctx: &mut Context<'_>) {
        if !self.setup.begin(0) {
            return;
        }
        self.slot = 0;
        self.load_slot(ctx);

        let widgets = &mut *ctx.widgets;
        let canvas = ctx.display.canvas();
        widgets.hour.bind(Point::new(0, 1), canvas);
        widgets.minute.bind(Point::new(13, 1), canvas);
        widgets.alarm_days.bind(Point::new(0, 9), canvas);
        widgets.weekday.bind(Point::new(6, 9), canvas);
        self.setup.add_widgets(&FIELDS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::Alarm;
    use crate::storage::Record;
    use crate::ui::screens::harness::Rig;

    fn press(screen: &mut AlarmSetup, rig: &mut Rig, event: Event) -> Dispatch {
        screen.send_event(event, &mut rig.ctx()).unwrap()
    }

    #[test]
    fn plain_walk_saves_every_slot() {
        let mut rig = Rig::new();
        rig.alarms.set(1, Alarm::new(6, 30, 0b11111)).unwrap();
        let mut screen = AlarmSetup::new();
        screen.set_initial_view(State::AlarmSetup, &mut rig.ctx());

        for slot in 0..MAX_ALARMS {
            assert_eq!(screen.slot(), slot);
            assert_eq!(press(&mut screen, &mut rig, Event::Ok), Dispatch::Consumed);
            assert_eq!(press(&mut screen, &mut rig, Event::Ok), Dispatch::Consumed);
            let last = press(&mut screen, &mut rig, Event::Ok);
            if slot + 1 < MAX_ALARMS {
                assert_eq!(last, Dispatch::Consumed);
            } else {
                assert_eq!(last, Dispatch::Unconsumed(Event::Ok));
            }
        }
        assert!(!screen.is_editing());
        assert_eq!(Alarm::load(&mut rig.store, 1).unwrap(), Alarm::new(6, 30, 0b11111));
    }

    #[test]
    fn day_toggle_reenters_same_slot_on_picker() {
        let mut rig = Rig::new();
        let mut screen = AlarmSetup::new();
        screen.set_initial_view(State::AlarmSetup, &mut rig.ctx());

        // 07:30
        for _ in 0..7 {
            press(&mut screen, &mut rig, Event::Up);
        }
        press(&mut screen, &mut rig, Event::Ok);
        for _ in 0..30 {
            press(&mut screen, &mut rig, Event::Up);
        }
        press(&mut screen, &mut rig, Event::Ok);

        // Monday
        press(&mut screen, &mut rig, Event::Up);
        assert_eq!(press(&mut screen, &mut rig, Event::Ok), Dispatch::Consumed);
        assert_eq!(screen.slot(), 0);
        assert_eq!(rig.alarms.get(0), Some(&Alarm::new(7, 30, 0b001)));
        assert_eq!(rig.widgets.weekday.get(), Some(0));
        assert_eq!(rig.widgets.alarm_days.get(), Some(0b001));

        // Wednesday
        for _ in 0..3 {
            press(&mut screen, &mut rig, Event::Up);
        }
        assert_eq!(press(&mut screen, &mut rig, Event::Ok), Dispatch::Consumed);
        assert_eq!(rig.alarms.get(0), Some(&Alarm::new(7, 30, 0b101)));
        // Nothing persisted until "ok".
        assert_eq!(Alarm::load(&mut rig.store, 0).unwrap(), Alarm::default());

        assert_eq!(press(&mut screen, &mut rig, Event::Ok), Dispatch::Consumed);
        assert_eq!(screen.slot(), 1);
        assert_eq!(Alarm::load(&mut rig.store, 0).unwrap(), Alarm::new(7, 30, 0b101));
    }

    #[test]
    fn storage_failure_surfaces() {
        let mut rig = Rig::new();
        rig.store.fail_writes(true);
        let mut screen = AlarmSetup::new();
        screen.set_initial_view(State::AlarmSetup, &mut rig.ctx());
        press(&mut screen, &mut rig, Event::Ok);
        press(&mut screen, &mut rig, Event::Ok);
        assert_eq!(
            screen.send_event(Event::Ok, &mut rig.ctx()),
            Err(Error::Storage)
        );
    }
}
