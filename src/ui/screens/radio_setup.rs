use embedded_graphics::prelude::*;

use crate::config::MAX_STATIONS;
use crate::error::Error;
use crate::state_machine::{Attributes, State};
use crate::station::Station;
use crate::ui::screens::{Context, Screen, SetupScreen};
use crate::ui::widgets::{Widget, WidgetId};
use crate::ui::{Dispatch, Event};

/// Preset editor: one frequency field per slot, saved on each OK.
///
/// With the radio playing, every UP/DOWN retunes to the edited value so
/// the station can be found by ear.
pub struct RadioSetup {
    setup: SetupScreen,
    slot: usize,
}

impl RadioSetup {
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

    fn load_slot(&self, ctx: &mut Context<'_>) {
        let station = ctx.stations.get(self.slot).copied().unwrap_or_default();
        ctx.widgets.tune.set(station.frequency);
    }
}

impl Default for RadioSetup {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for RadioSetup {
    fn show(&mut self, ctx: &mut Context<'_>) {
        self.setup.show(ctx);
    }

    /// Drop back from any previewed frequency to the playing preset.
    fn hide(&mut self, ctx: &mut Context<'_>) {
        if ctx.fsm.has_attribute(Attributes::RADIO_ON) {
            ctx.radio.restore(&mut *ctx.tuner, &*ctx.stations);
        }
        ctx.display.canvas().clear();
    }

    fn send_event(&mut self, event: Event, ctx: &mut Context<'_>) -> Result<Dispatch, Error> {
        let result = self.setup.send_event(event, ctx.widgets);
        if matches!(event, Event::Up | Event::Down) && ctx.fsm.has_attribute(Attributes::RADIO_ON) {
            ctx.radio.preview(&mut *ctx.tuner, ctx.widgets.tune.value());
        }
        if result != Dispatch::Unconsumed(Event::Ok) {
            return Ok(result);
        }

        let station = Station::new(ctx.widgets.tune.value());
        ctx.stations.set(self.slot, station)?;
        ctx.stations.save(&mut *ctx.store, self.slot)?;
        info!("Preset {} saved: {}", self.slot, station.frequency);

        self.slot += 1;
        if self.slot == MAX_STATIONS {
            self.slot = 0;
            self.setup.finish();
            return Ok(result);
        }
        self.load_slot(ctx);
        self.setup.restart(0);
        self.setup.add_widgets(&[WidgetId::Tune]);
        Ok(Dispatch::Consumed)
    }

    fn set_initial_view(&mut self, _state: State, ctx: &mut Context<'_>) {
        if !self.setup.begin(0) {
            return;
        }
        self.slot = 0;
        self.load_slot(ctx);
        ctx.widgets.tune.bind(Point::new(0, 1), ctx.display.canvas());
        self.setup.add_widgets(&[WidgetId::Tune]);
    }
}
