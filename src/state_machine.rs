//! Menu state machine.
//!
//! Tracks where the user is in the menu tree. Transitions come from a
//! fixed table indexed by `[state][event]`; an empty cell means the state
//! does not react to that event and the event stays live for whoever
//! routes it next. Cross-cutting modes (radio playing, alarm ringing,
//! sleep timer running) are kept in an attribute mask that screens and
//! the dispatcher manage. The machine itself never touches it.

use crate::ui::{Dispatch, Event};

/// Every menu position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Clock = 0,
    Menu,
    SetTime,
    TimeSetup,
    SetDate,
    DateSetup,
    SetAlarms,
    AlarmSetup,
    Radio,
    SetRadio,
    RadioSetup,
    Exit,
    RadioOn,
    Info,
}

impl State {
    pub const COUNT: usize = 14;

    pub const ALL: [State; State::COUNT] = [
        State::Clock,
        State::Menu,
        State::SetTime,
        State::TimeSetup,
        State::SetDate,
        State::DateSetup,
        State::SetAlarms,
        State::AlarmSetup,
        State::Radio,
        State::SetRadio,
        State::RadioSetup,
        State::Exit,
        State::RadioOn,
        State::Info,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short menu caption.
    pub const fn label(self) -> &'static str {
        match self {
            State::Clock => "Clock",
            State::Menu => "Menu",
            State::SetTime => "Time",
            State::SetDate => "Date",
            State::SetAlarms => "Alarms",
            State::AlarmSetup => "AlrmSet",
            State::Radio | State::SetRadio => "Radio",
            State::RadioSetup => "RdioSet",
            State::Exit => "Exit",
            State::RadioOn => "On",
            State::Info => "Info",
            State::TimeSetup | State::DateSetup => "",
        }
    }
}

/// Cross-cutting mode flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attributes(u8);

impl Attributes {
    pub const NONE: Attributes = Attributes(0);
    pub const RADIO_ON: Attributes = Attributes(1);
    pub const ALARM_ON: Attributes = Attributes(2);
    pub const SLEEP_ON: Attributes = Attributes(4);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Attributes) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Target state per `[state][Up, Down, Ok]`, `None` = no transition.
pub type TransitionTable = [[Option<State>; 3]; State::COUNT];

use State::*;

pub static TRANSITIONS: TransitionTable = [
    /* Clock      */ [Some(Radio), Some(Info), None],
    /* Menu       */ [Some(Info), Some(Radio), Some(SetTime)],
    /* SetTime    */ [Some(SetRadio), Some(SetDate), Some(TimeSetup)],
    /* TimeSetup  */ [None, None, Some(Clock)],
    /* SetDate    */ [Some(SetTime), Some(SetAlarms), Some(DateSetup)],
    /* DateSetup  */ [None, None, Some(Clock)],
    /* SetAlarms  */ [Some(SetDate), Some(SetRadio), Some(AlarmSetup)],
    /* AlarmSetup */ [None, None, Some(Clock)],
    /* Radio      */ [Some(Menu), Some(Clock), Some(RadioOn)],
    /* SetRadio   */ [Some(SetAlarms), Some(Exit), Some(RadioSetup)],
    /* RadioSetup */ [None, None, Some(Radio)],
    /* Exit       */ [Some(SetRadio), Some(SetTime), Some(Clock)],
    /* RadioOn    */ [Some(Radio), Some(Radio), Some(Radio)],
    /* Info       */ [Some(Clock), Some(Menu), None],
];

pub struct StateMachine {
    table: &'static TransitionTable,
    state: State,
    attributes: Attributes,
}

impl StateMachine {
    pub const fn new(table: &'static TransitionTable, initial: State) -> Self {
        Self {
            table,
            state: initial,
            attributes: Attributes::NONE,
        }
    }

    /// Offer an event. Consumed input is passed through untouched.
    pub fn send_event(&mut self, dispatch: Dispatch) -> Dispatch {
        let event = match dispatch {
            Dispatch::Consumed => return Dispatch::Consumed,
            Dispatch::Unconsumed(event) => event,
        };
        let Some(column) = event.column() else {
            return dispatch;
        };
        match self.table[self.state.index()][column] {
            Some(next) => {
                debug!("FSM {} -> {}", self.state.label(), next.label());
                self.state = next;
                Dispatch::Consumed
            }
            None => dispatch,
        }
    }

    pub fn send(&mut self, event: Event) -> Dispatch {
        self.send_event(Dispatch::Unconsumed(event))
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn label(&self) -> &'static str {
        self.state.label()
    }

    pub fn set_attribute(&mut self, attr: Attributes) {
        self.attributes.0 |= attr.0;
    }

    pub fn clear_attribute(&mut self, attr: Attributes) {
        self.attributes.0 &= !attr.0;
    }

    pub fn has_attribute(&self, attr: Attributes) -> bool {
        self.attributes.contains(attr)
    }

    pub fn attributes(&self) -> Attributes {
        self.attributes
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new(&TRANSITIONS, State::Clock)
    }
}
