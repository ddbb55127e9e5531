//! Field-by-field edit flow shared by the setup screens.
//!
//! UP/DOWN go to the focused widget; OK moves focus to the next one. OK on
//! the last field is handed back unconsumed, which tells the owning setup
//! to commit its record. `begin` refuses to reset an edit already in
//! progress so re-entering a setup never loses half-entered values.

use heapless::Vec;

use crate::config::MAX_SETUP_WIDGETS;
use crate::error::Error;
use crate::ui::screens::Context;
use crate::ui::widgets::{WidgetId, WidgetPool};
use crate::ui::{Dispatch, Event};

#[derive(Debug, Default)]
pub struct SetupScreen {
    widgets: Vec<WidgetId, MAX_SETUP_WIDGETS>,
    current: usize,
    started: bool,
}

impl SetupScreen {
    pub const fn new() -> Self {
        Self {
            widgets: Vec::new(),
            current: 0,
            started: false,
        }
    }

    /// Append a field; tab order is insertion order.
    pub fn add_widget(&mut self, id: WidgetId) -> Result<(), Error> {
        self.widgets.push(id).map_err(|id| {
            warn!("Too many widgets, dropping {}", id);
            Error::TooManyWidgets
        })
    }

    /// Add several fields, stopping at the first overflow.
    pub fn add_widgets(&mut self, ids: &[WidgetId]) {
        for &id in ids {
            if self.add_widget(id).is_err() {
                break;
            }
        }
    }

    /// Start a new edit focused on field `start`, unless one is running.
    pub fn begin(&mut self, start: usize) -> bool {
        if self.started {
            return false;
        }
        self.restart(start);
        true
    }

    /// Start over regardless of `started`. Used by multi-record flows.
    pub fn restart(&mut self, start: usize) {
        self.widgets.clear();
        self.current = start;
        self.started = true;
    }

    pub fn finish(&mut self) {
        self.started = false;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.widgets.get(self.current).copied()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn send_event(&mut self, event: Event, pool: &mut WidgetPool) -> Dispatch {
        trace!("Setup event {} on field {}", event, self.current);
        // Any input stops blinking until the next redraw.
        for &id in &self.widgets {
            pool.widget_mut(id).set_blink(false);
        }

        match event {
            Event::Up | Event::Down => {
                if let Some(id) = self.focused() {
                    pool.widget_mut(id).send_event(event);
                }
                Dispatch::Consumed
            }
            Event::Ok => {
                self.current += 1;
                if self.current < self.widgets.len() {
                    Dispatch::Consumed
                } else {
                    Dispatch::Unconsumed(event)
                }
            }
            other => Dispatch::Unconsumed(other),
        }
    }

    /// Draw every field, flush, then mark the focused one for blinking.
    pub fn show(&mut self, ctx: &mut Context<'_>) {
        if self.widgets.is_empty() {
            debug!("No widgets added to the setup");
        }
        for &id in &self.widgets {
            ctx.widgets.widget_mut(id).draw(ctx.display.canvas());
        }
        ctx.refresh();
        if let Some(id) = self.focused() {
            ctx.widgets.widget_mut(id).set_blink(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screens::harness::Rig;
    use crate::ui::widgets::{Widget, WidgetFlags};

    const FIELDS: [WidgetId; 4] = [WidgetId::Day, WidgetId::Month, WidgetId::Year, WidgetId::Tune];

    #[test]
    fn ok_consumed_until_last_field() {
        for n in 1..=MAX_SETUP_WIDGETS {
            let mut pool = WidgetPool::new();
            let mut setup = SetupScreen::new();
            assert!(setup.begin(0));
            setup.add_widgets(&FIELDS[..n]);
            for _ in 0..n - 1 {
                assert_eq!(setup.send_event(Event::Ok, &mut pool), Dispatch::Consumed);
            }
            assert_eq!(setup.send_event(Event::Ok, &mut pool), Dispatch::Unconsumed(Event::Ok));
        }
    }

    #[test]
    fn overflow_is_reported_and_dropped() {
        let mut setup = SetupScreen::new();
        setup.begin(0);
        setup.add_widgets(&FIELDS);
        assert_eq!(setup.add_widget(WidgetId::Hour), Err(Error::TooManyWidgets));
        assert_eq!(setup.len(), MAX_SETUP_WIDGETS);
    }

    #[test]
    fn begin_is_guarded_restart_is_not() {
        let mut setup = SetupScreen::new();
        assert!(setup.begin(0));
        setup.add_widgets(&[WidgetId::Hour, WidgetId::Minute]);
        setup.send_event(Event::Ok, &mut WidgetPool::new());
        assert!(!setup.begin(0));
        assert_eq!(setup.current(), 1);
        assert_eq!(setup.len(), 2);

        setup.restart(2);
        assert_eq!(setup.current(), 2);
        assert!(setup.is_empty());
        setup.finish();
        assert!(!setup.is_started());
        assert!(setup.begin(0));
    }

    #[test]
    fn up_down_go_to_focused_widget() {
        let mut pool = WidgetPool::new();
        pool.hour.set(10);
        pool.minute.set(10);
        let mut setup = SetupScreen::new();
        setup.begin(1);
        setup.add_widgets(&[WidgetId::Hour, WidgetId::Minute]);
        assert_eq!(setup.send_event(Event::Up, &mut pool), Dispatch::Consumed);
        assert_eq!(setup.send_event(Event::Up, &mut pool), Dispatch::Consumed);
        assert_eq!(setup.send_event(Event::Down, &mut pool), Dispatch::Consumed);
        assert_eq!(pool.hour.value(), 10);
        assert_eq!(pool.minute.value(), 11);
        assert_eq!(
            setup.send_event(Event::SleepOff, &mut pool),
            Dispatch::Unconsumed(Event::SleepOff)
        );
    }

    #[test]
    fn show_blinks_focus_and_events_stop_it() {
        let mut rig = Rig::new();
        let mut setup = SetupScreen::new();
        setup.begin(0);
        setup.add_widgets(&[WidgetId::Hour, WidgetId::Minute]);
        setup.show(&mut rig.ctx());
        assert!(rig.widgets.hour.frame().has(WidgetFlags::BLINK));
        assert!(!rig.widgets.minute.frame().has(WidgetFlags::BLINK));
        assert_eq!(rig.sink.blits, 1);

        setup.send_event(Event::Up, &mut rig.widgets);
        assert!(!rig.widgets.hour.frame().has(WidgetFlags::BLINK));
    }
}
