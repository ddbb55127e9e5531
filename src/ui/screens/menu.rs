use embedded_graphics::prelude::*;

use crate::state_machine::State;
use crate::ui::screens::{Context, Screen};
use crate::ui::widgets::Widget;

/// Live clock on top, current menu entry below. Navigation itself is
/// entirely the state machine's job, so no event is consumed here.
pub struct MenuScreen;

impl MenuScreen {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for MenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MenuScreen {
    fn show(&mut self, ctx: &mut Context<'_>) {
        let now = ctx.clock.now();
        let widgets = &mut *ctx.widgets;
        let canvas = ctx.display.canvas();

        widgets.time.set_time(now.hour, now.minute, Some(now.second));
        widgets.time.draw(canvas);
        widgets.label.set_text(ctx.fsm.label());
        widgets.label.draw(canvas);
        ctx.refresh();
    }

    fn set_initial_view(&mut self, _state: State, ctx: &mut Context<'_>) {
        let widgets = &mut *ctx.widgets;
        let canvas = ctx.display.canvas();
        widgets.time.set_blink(false);
        widgets.time.bind(Point::zero(), canvas);
        widgets.label.bind(Point::new(0, 9), canvas);
    }
}
