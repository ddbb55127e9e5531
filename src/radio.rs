//! FM radio control and the sleep timer.
//!
//! `RadioControl` keeps the tuner in step with the `RADIO_ON` attribute:
//! switching on tunes preset 0 and unmutes, switching off mutes and stops
//! any running sleep countdown.

use crate::config::{DEFAULT_VOLUME, MAX_STATIONS, SLEEP_MINUTES, TUNE_MAX, TUNE_MIN};
use crate::platform::{Band, Tuner};
use crate::state_machine::{Attributes, StateMachine};
use crate::station::StationBank;

/// Minutes-left countdown, advanced on wall-clock minute changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SleepTimer {
    remaining: Option<u8>,
    last_minute: Option<u8>,
}

impl SleepTimer {
    pub const fn new() -> Self {
        Self {
            remaining: None,
            last_minute: None,
        }
    }

    pub fn arm(&mut self, minutes: u8, now_minute: u8) {
        self.remaining = Some(minutes);
        self.last_minute = Some(now_minute);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
        self.last_minute = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<u8> {
        self.remaining
    }

    /// Feed the current minute. Returns `true` once, when the countdown
    /// reaches zero.
    pub fn on_tick(&mut self, minute: u8) -> bool {
        let Some(left) = self.remaining else {
            return false;
        };
        if self.last_minute == Some(minute) {
            return false;
        }
        self.last_minute = Some(minute);
        let left = left.saturating_sub(1);
        if left == 0 {
            self.cancel();
            return true;
        }
        self.remaining = Some(left);
        false
    }
}

pub struct RadioControl {
    station: usize,
    frequency: u16,
    sleep: SleepTimer,
}

impl RadioControl {
    pub const fn new() -> Self {
        Self {
            station: 0,
            frequency: TUNE_MIN,
            sleep: SleepTimer::new(),
        }
    }

    /// Start muted at the default volume.
    pub fn init(&mut self, tuner: &mut dyn Tuner) {
        tuner.set_mute(true);
        tuner.set_volume(DEFAULT_VOLUME);
    }

    fn tune(&mut self, tuner: &mut dyn Tuner, frequency: u16) {
        self.frequency = frequency.clamp(TUNE_MIN, TUNE_MAX);
        tuner.set_frequency(Band::Fm, self.frequency * 10);
    }

    fn tune_station(&mut self, tuner: &mut dyn Tuner, stations: &StationBank, slot: usize) {
        self.station = slot;
        let frequency = stations.get(slot).map_or(TUNE_MIN, |s| s.frequency);
        self.tune(tuner, frequency);
    }

    pub fn switch_on(&mut self, fsm: &mut StateMachine, tuner: &mut dyn Tuner, stations: &StationBank) {
        fsm.set_attribute(Attributes::RADIO_ON);
        self.tune_station(tuner, stations, 0);
        tuner.set_mute(false);
        info!("Radio on, {} x100kHz", self.frequency);
    }

    /// Switch on with a sleep countdown running.
    pub fn switch_on_sleep(
        &mut self,
        fsm: &mut StateMachine,
        tuner: &mut dyn Tuner,
        stations: &StationBank,
        now_minute: u8,
    ) {
        self.switch_on(fsm, tuner, stations);
        self.sleep.arm(SLEEP_MINUTES, now_minute);
        fsm.set_attribute(Attributes::SLEEP_ON);
    }

    pub fn switch_off(&mut self, fsm: &mut StateMachine, tuner: &mut dyn Tuner) {
        fsm.clear_attribute(Attributes::RADIO_ON);
        fsm.clear_attribute(Attributes::SLEEP_ON);
        self.sleep.cancel();
        tuner.set_mute(true);
        info!("Radio off");
    }

    /// Cycle to the next preset.
    pub fn next_station(&mut self, tuner: &mut dyn Tuner, stations: &StationBank) {
        let next = (self.station + 1) % MAX_STATIONS;
        self.tune_station(tuner, stations, next);
    }

    /// Tune a frequency without touching the presets.
    pub fn preview(&mut self, tuner: &mut dyn Tuner, frequency: u16) {
        self.tune(tuner, frequency);
    }

    /// Return from a preview to the current preset.
    pub fn restore(&mut self, tuner: &mut dyn Tuner, stations: &StationBank) {
        self.tune_station(tuner, stations, self.station);
    }

    /// Stop the sleep countdown and leave the radio playing.
    pub fn cancel_sleep(&mut self, fsm: &mut StateMachine) {
        if self.sleep.is_armed() {
            debug!("Sleep timer cancelled");
        }
        self.sleep.cancel();
        fsm.clear_attribute(Attributes::SLEEP_ON);
    }

    /// Advance the sleep timer; switches off when it runs out.
    pub fn tick(&mut self, fsm: &mut StateMachine, tuner: &mut dyn Tuner, minute: u8) {
        if self.sleep.on_tick(minute) {
            info!("Sleep timer expired");
            self.switch_off(fsm, tuner);
        }
    }

    pub fn frequency(&self) -> u16 {
        self.frequency
    }

    pub fn station(&self) -> usize {
        self.station
    }

    pub fn sleep(&self) -> &SleepTimer {
        &self.sleep
    }
}

impl Default for RadioControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::FakeTuner;
    use crate::station::Station;

    fn presets() -> StationBank {
        let mut bank = StationBank::new();
        for (slot, f) in [988u16, 1012, 875, 1045].into_iter().enumerate() {
            bank.set(slot, Station::new(f)).unwrap();
        }
        bank
    }

    #[test]
    fn init_mutes_and_sets_volume() {
        let mut tuner = FakeTuner::default();
        RadioControl::new().init(&mut tuner);
        assert!(tuner.muted);
        assert_eq!(tuner.volume, DEFAULT_VOLUME);
    }

    #[test]
    fn switch_on_tunes_first_preset() {
        let (mut radio, mut fsm, mut tuner) = (RadioControl::new(), StateMachine::default(), FakeTuner::default());
        radio.switch_on(&mut fsm, &mut tuner, &presets());
        assert!(fsm.has_attribute(Attributes::RADIO_ON));
        assert!(!tuner.muted);
        assert_eq!(tuner.frequency, Some((Band::Fm, 9880)));
        assert_eq!(radio.station(), 0);

        radio.switch_off(&mut fsm, &mut tuner);
        assert!(!fsm.has_attribute(Attributes::RADIO_ON));
        assert!(tuner.muted);
    }

    #[test]
    fn next_station_wraps() {
        let (mut radio, mut fsm, mut tuner) = (RadioControl::new(), StateMachine::default(), FakeTuner::default());
        let bank = presets();
        radio.switch_on(&mut fsm, &mut tuner, &bank);
        for _ in 0..3 {
            radio.next_station(&mut tuner, &bank);
        }
        assert_eq!(radio.station(), 3);
        assert_eq!(radio.frequency(), 1045);
        radio.next_station(&mut tuner, &bank);
        assert_eq!(radio.station(), 0);
        assert_eq!(tuner.frequency, Some((Band::Fm, 9880)));
    }

    #[test]
    fn preview_clamps_to_band() {
        let mut radio = RadioControl::new();
        let mut tuner = FakeTuner::default();
        radio.preview(&mut tuner, 1200);
        assert_eq!(radio.frequency(), TUNE_MAX);
        assert_eq!(tuner.frequency, Some((Band::Fm, 10800)));
    }

    #[test]
    fn sleep_timer_counts_minute_changes() {
        let mut timer = SleepTimer::new();
        timer.arm(2, 10);
        assert!(!timer.on_tick(10));
        assert!(!timer.on_tick(11));
        assert_eq!(timer.remaining(), Some(1));
        assert!(!timer.on_tick(11));
        assert!(timer.on_tick(12));
        assert!(!timer.is_armed());
        assert!(!timer.on_tick(13));
    }

    #[test]
    fn sleep_expiry_switches_radio_off() {
        let (mut radio, mut fsm, mut tuner) = (RadioControl::new(), StateMachine::default(), FakeTuner::default());
        radio.switch_on_sleep(&mut fsm, &mut tuner, &presets(), 0);
        assert!(fsm.has_attribute(Attributes::SLEEP_ON));
        for minute in 1..SLEEP_MINUTES {
            radio.tick(&mut fsm, &mut tuner, minute);
            assert!(fsm.has_attribute(Attributes::RADIO_ON));
        }
        radio.tick(&mut fsm, &mut tuner, SLEEP_MINUTES);
        assert!(!fsm.has_attribute(Attributes::RADIO_ON));
        assert!(!fsm.has_attribute(Attributes::SLEEP_ON));
        assert!(tuner.muted);
    }

    #[test]
    fn switch_off_cancels_sleep() {
        let (mut radio, mut fsm, mut tuner) = (RadioControl::new(), StateMachine::default(), FakeTuner::default());
        radio.switch_on_sleep(&mut fsm, &mut tuner, &presets(), 0);
        radio.switch_off(&mut fsm, &mut tuner);
        assert!(!radio.sleep().is_armed());
    }

    #[test]
    fn cancelled_sleep_keeps_playing() {
        let (mut radio, mut fsm, mut tuner) = (RadioControl::new(), StateMachine::default(), FakeTuner::default());
        radio.switch_on_sleep(&mut fsm, &mut tuner, &presets(), 0);
        radio.cancel_sleep(&mut fsm);
        assert!(!fsm.has_attribute(Attributes::SLEEP_ON));
        for minute in 1..=2 * SLEEP_MINUTES {
            radio.tick(&mut fsm, &mut tuner, minute % 60);
        }
        assert!(fsm.has_attribute(Attributes::RADIO_ON));
        assert!(!tuner.muted);
    }

    #[test]
    fn restore_returns_to_preset_after_preview() {
        let (mut radio, mut fsm, mut tuner) = (RadioControl::new(), StateMachine::default(), FakeTuner::default());
        let bank = presets();
        radio.switch_on(&mut fsm, &mut tuner, &bank);
        radio.next_station(&mut tuner, &bank);
        radio.preview(&mut tuner, 1077);
        assert_eq!(radio.frequency(), 1077);

        radio.restore(&mut tuner, &bank);
        assert_eq!(radio.station(), 1);
        assert_eq!(radio.frequency(), 1012);
        assert_eq!(tuner.frequency, Some((Band::Fm, 10120)));
    }
}
