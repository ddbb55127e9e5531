use embedded_graphics::prelude::*;

use crate::error::Error;
use crate::state_machine::State;
use crate::ui::screens::{Context, Screen, SetupScreen};
use crate::ui::widgets::{Widget, WidgetId};
use crate::ui::{Dispatch, Event};

/// HH:MM editor. Committing sets the clock with seconds zeroed.
pub struct TimeSetup {
    setup: SetupScreen,
}

impl TimeSetup {
    pub const fn new() -> Self {
        Self {
            setup: SetupScreen::new(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.setup.is_started()
    }
}

impl Default for TimeSetup {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for TimeSetup {
    fn show(&mut self, ctx: &mut Context<'_>) {
        self.setup.show(ctx);
    }

    fn send_event(&mut self, event: Event, ctx: &mut Context<'_>) -> Result<Dispatch, Error> {
        let result = self.setup.send_event(event, ctx.widgets);
        if result != Dispatch::Unconsumed(Event::Ok) {
            return Ok(result);
        }

        let (hour, minute) = (ctx.widgets.hour.value() as u8, ctx.widgets.minute.value() as u8);
        let now = ctx.clock.now();
        ctx.clock.adjust(now.with_time(hour, minute, 0));
        self.setup.finish();
        info!("Clock set to {}:{}", hour, minute);
        Ok(result)
    }

    fn set_initial_view(&mut self, _state: State, ctx: &mut Context<'_>) {
        if !self.setup.begin(0) {
            return;
        }
        let now = ctx.clock.now();
        let widgets = &mut *ctx.widgets;
        let canvas = ctx.display.canvas();
        widgets.hour.set(now.hour as u16);
        widgets.minute.set(now.minute as u16);
        widgets.hour.bind(Point::new(0, 1), canvas);
        widgets.minute.bind(Point::new(13, 1), canvas);
        self.setup.add_widgets(&[WidgetId::Hour, WidgetId::Minute]);
    }
}
