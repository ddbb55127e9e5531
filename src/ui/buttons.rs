//! GPIO button sampling.
//!
//! Three physical buttons:
//!   - UP   - next field value / previous menu entry
//!   - DOWN - previous field value / next menu entry
//!   - OK   - confirm, advance, cycle views
//!
//! The control loop samples them every `POLL_PERIOD_MS`; that period is
//! longer than contact bounce, so no extra debouncing is needed before the
//! chord decoder.

use embedded_hal::digital::InputPin;

use crate::platform::ButtonSource;
use crate::ui::Buttons;

pub struct PinButtons<U, D, O> {
    up: U,
    down: D,
    ok: O,
    active_low: bool,
}

impl<U, D, O> PinButtons<U, D, O>
where
    U: InputPin,
    D: InputPin,
    O: InputPin,
{
    pub fn new(up: U, down: D, ok: O, active_low: bool) -> Self {
        Self {
            up,
            down,
            ok,
            active_low,
        }
    }
}

/// A read error counts as "not pressed".
fn pressed<P: InputPin>(pin: &mut P, active_low: bool) -> bool {
    let level = if active_low { pin.is_low() } else { pin.is_high() };
    level.unwrap_or(false)
}

impl<U, D, O> ButtonSource for PinButtons<U, D, O>
where
    U: InputPin,
    D: InputPin,
    O: InputPin,
{
    fn poll(&mut self) -> Buttons {
        let mut state = Buttons::NONE;
        if pressed(&mut self.up, self.active_low) {
            state = state | Buttons::UP;
        }
        if pressed(&mut self.down, self.active_low) {
            state = state | Buttons::DOWN;
        }
        if pressed(&mut self.ok, self.active_low) {
            state = state | Buttons::OK;
        }
        state
    }
}
