use embedded_graphics::prelude::*;

use crate::error::Error;
use crate::state_machine::State;
use crate::ui::screens::{Context, Screen, SetupScreen};
use crate::ui::widgets::{Widget, WidgetId};
use crate::ui::{Dispatch, Event};

/// DD MM / YYYY editor.
///
/// The day field always runs 1..=31; an impossible date is clamped to the
/// last day of the month on commit and the weekday recomputed.
pub struct DateSetup {
    setup: SetupScreen,
}

impl DateSetup {
    pub const fn new() -> Self {
        Self {
            setup: SetupScreen::new(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.setup.is_started()
    }
}

impl Default for DateSetup {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for DateSetup {
    fn show(&mut self, ctx: &mut Context<'_>) {
        self.setup.show(ctx);
    }

    fn send_event(&mut self, event: Event, ctx: &mut Context<'_>) -> Result<Dispatch, Error> {
        let result = self.setup.send_event(event, ctx.widgets);
        if result != Dispatch::Unconsumed(Event::Ok) {
            return Ok(result);
        }

        let w = &*ctx.widgets;
        let (day, month, year) = (w.day.value() as u8, w.month.value() as u8, w.year.value());
        let date = ctx.clock.now().with_date(year, month, day);
        ctx.clock.adjust(date);
        self.setup.finish();
        info!("Date set to {}/{}/{}", date.day, date.month, date.year);
        Ok(result)
    }

    fn set_initial_view(&mut self, _state: State, ctx: &mut Context<'_>) {
        if !self.setup.begin(0) {
            return;
        }
        let now = ctx.clock.now();
        let widgets = &mut *ctx.widgets;
        let canvas = ctx.display.canvas();
        widgets.day.set(now.day as u16);
        widgets.month.set(now.month as u16);
        widgets.year.set(now.year);
        widgets.day.bind(Point::new(0, 1), canvas);
        widgets.month.bind(Point::new(13, 1), canvas);
        widgets.year.bind(Point::new(0, 9), canvas);
        self.setup.add_widgets(&[WidgetId::Day, WidgetId::Month, WidgetId::Year]);
    }
}
