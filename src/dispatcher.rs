//! Control loop.
//!
//! `ClockRadio` owns the hardware collaborators and every piece of UI
//! state. The firmware calls two entry points on fixed periods:
//!
//! - `poll()` samples the buttons, decodes a chord into an event and
//!   routes it: active screen first, then the state machine. A state
//!   change hides the old screen and enters the new one.
//! - `tick()` runs the alarm sweep and the sleep timer, then redraws the
//!   active screen.
//!
//! Both run to completion on a single thread, so a routed event (and any
//! transition it causes) is always fully applied before the next redraw.

use crate::alarm::AlarmBank;
use crate::error::Error;
use crate::platform::{AlarmOutput, ButtonSource, Clock, DateTime, DisplaySink, NvStore, Tuner};
use crate::radio::RadioControl;
use crate::state_machine::{Attributes, State, StateMachine, TRANSITIONS};
use crate::station::StationBank;
use crate::ui::display::Display;
use crate::ui::input_logic::ButtonDecoder;
use crate::ui::screens::{Context, Screens};
use crate::ui::widgets::WidgetPool;
use crate::ui::{Dispatch, Event};

pub struct ClockRadio<C, S, D, T, B, A> {
    clock: C,
    store: S,
    sink: D,
    tuner: T,
    buttons: B,
    alarm_out: A,

    display: Display,
    widgets: WidgetPool,
    alarms: AlarmBank,
    stations: StationBank,
    fsm: StateMachine,
    radio: RadioControl,
    screens: Screens,
    decoder: ButtonDecoder,
    /// Slot that already fired during the current matching minute.
    last_fired: Option<usize>,
}

impl<C, S, D, T, B, A> ClockRadio<C, S, D, T, B, A>
where
    C: Clock,
    S: NvStore,
    D: DisplaySink,
    T: Tuner,
    B: ButtonSource,
    A: AlarmOutput,
{
    pub fn new(clock: C, store: S, sink: D, tuner: T, buttons: B, alarm_out: A) -> Self {
        Self {
            clock,
            store,
            sink,
            tuner,
            buttons,
            alarm_out,
            display: Display::new(),
            widgets: WidgetPool::new(),
            alarms: AlarmBank::new(),
            stations: StationBank::new(),
            fsm: StateMachine::new(&TRANSITIONS, State::Clock),
            radio: RadioControl::new(),
            screens: Screens::new(),
            decoder: ButtonDecoder::new(),
            last_fired: None,
        }
    }

    /// Split borrow: the screens on one side, everything they may touch
    /// on the other.
    fn parts(&mut self) -> (&mut Screens, Context<'_>) {
        let ctx = Context {
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
        };
        (&mut self.screens, ctx)
    }

    /// Load records, bring up the panel and tuner, draw the first screen.
    ///
    /// A store that cannot be read leaves the default records in place.
    pub fn start(&mut self) {
        if let Err(e) = self.alarms.load_all(&mut self.store) {
            error!("Failed to load alarms: {}", e);
        }
        if let Err(e) = self.stations.load_all(&mut self.store) {
            error!("Failed to load stations: {}", e);
        }
        self.display.init(&mut self.sink);
        self.radio.init(&mut self.tuner);
        self.alarm_out.set_alarm(false);

        let state = self.fsm.state();
        let (screens, mut ctx) = self.parts();
        let screen = screens.for_state(state);
        screen.set_initial_view(state, &mut ctx);
        screen.show(&mut ctx);
        info!("Clock radio started");
    }

    /// Route one event through the active screen and the state machine.
    pub fn handle_event(&mut self, event: Event) -> Result<Dispatch, Error> {
        if event == Event::SleepOff && self.fsm.has_attribute(Attributes::ALARM_ON) {
            self.silence();
        }

        let state = self.fsm.state();
        let (screens, mut ctx) = self.parts();
        let dispatch = screens
            .for_state(state)
            .send_event(event, &mut ctx)?
            .or_else(|event| ctx.fsm.send(event));
        if !dispatch.is_consumed() {
            trace!("Event {} unhandled in {}", event, state);
        }

        let next = ctx.fsm.state();
        if next != state {
            debug!("State {} -> {}", state, next);
            screens.for_state(state).hide(&mut ctx);
            let screen = screens.for_state(next);
            screen.set_initial_view(next, &mut ctx);
            screen.show(&mut ctx);
        }
        Ok(dispatch)
    }

    /// Sample the buttons once. Returns the routing result when a chord
    /// was released.
    pub fn poll(&mut self) -> Result<Option<Dispatch>, Error> {
        let sample = self.buttons.poll();
        match self.decoder.update(sample) {
            Some(event) => {
                trace!("Button event {}", event);
                self.handle_event(event).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Periodic housekeeping and redraw.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.sweep(&now);
        self.radio.tick(&mut self.fsm, &mut self.tuner, now.minute);

        let state = self.fsm.state();
        let (screens, mut ctx) = self.parts();
        screens.for_state(state).show(&mut ctx);
    }

    /// Fire the first matching alarm, once per matching minute.
    pub fn sweep(&mut self, now: &DateTime) -> Option<usize> {
        let Some(slot) = self.alarms.evaluate(now) else {
            self.last_fired = None;
            return None;
        };
        if self.last_fired == Some(slot) {
            return None;
        }

        info!("Alarm {} at {}:{}", slot, now.hour, now.minute);
        self.last_fired = Some(slot);
        self.fsm.set_attribute(Attributes::ALARM_ON);
        self.alarm_out.set_alarm(true);
        // A ringing alarm outlives any sleep countdown.
        self.radio.cancel_sleep(&mut self.fsm);
        if !self.fsm.has_attribute(Attributes::RADIO_ON) {
            self.radio
                .switch_on(&mut self.fsm, &mut self.tuner, &self.stations);
        }
        Some(slot)
    }

    fn silence(&mut self) {
        info!("Alarm silenced");
        self.fsm.clear_attribute(Attributes::ALARM_ON);
        self.alarm_out.set_alarm(false);
    }

    pub fn state(&self) -> State {
        self.fsm.state()
    }

    pub fn attributes(&self) -> Attributes {
        self.fsm.attributes()
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn alarms(&self) -> &AlarmBank {
        &self.alarms
    }

    pub fn stations(&self) -> &StationBank {
        &self.stations
    }

    pub fn radio(&self) -> &RadioControl {
        &self.radio
    }

    pub fn widgets(&self) -> &WidgetPool {
        &self.widgets
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn tuner(&self) -> &T {
        &self.tuner
    }

    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }

    pub fn alarm_output(&self) -> &A {
        &self.alarm_out
    }
}
