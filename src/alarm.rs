//! Alarm records and the alarm sweep.

use crate::config::{ALARM_RECORD_SIZE, BASE_ALARMS_NVM, MAX_ALARMS};
use crate::platform::{DateTime, Weekday};
use crate::storage::{Record, RecordBank};

/// Mask of all seven weekday bits.
pub const ALL_DAYS: u8 = 0x7F;

/// One alarm slot: a time of day plus the weekdays it rings on.
///
/// Bit `i` of `days` enables weekday `i`, Monday = bit 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alarm {
    pub hour: u8,
    pub minute: u8,
    pub days: u8,
}

impl Alarm {
    pub const fn new(hour: u8, minute: u8, days: u8) -> Self {
        Self { hour, minute, days }
    }

    pub fn set_at(&mut self, hour: u8, minute: u8, days: u8) {
        self.hour = hour;
        self.minute = minute;
        self.days = days;
    }

    pub fn get_at(&self) -> (u8, u8, u8) {
        (self.hour, self.minute, self.days)
    }

    pub fn is_enabled(&self, day: Weekday) -> bool {
        self.days & (1 << day.index()) != 0
    }

    pub fn toggle_day(&mut self, day: Weekday) {
        self.days ^= 1 << day.index();
    }

    /// True when the alarm rings at `now` (to the minute).
    pub fn check(&self, now: &DateTime) -> bool {
        now.hour == self.hour && now.minute == self.minute && self.is_enabled(now.weekday)
    }
}

impl Record for Alarm {
    const BASE: u32 = BASE_ALARMS_NVM;
    const SIZE: usize = ALARM_RECORD_SIZE as usize;
    const SLOTS: usize = MAX_ALARMS;

    fn encode(&self, buf: &mut [u8]) {
        buf[0] = self.hour;
        buf[1] = self.minute;
        buf[2] = self.days;
    }

    fn decode(data: &[u8]) -> Self {
        let (hour, minute, days) = (data[0], data[1], data[2]);
        if hour > 23 || minute > 59 || days > ALL_DAYS {
            // Blank or torn record.
            return Self::default();
        }
        Self { hour, minute, days }
    }
}

/// The four alarm slots.
pub type AlarmBank = RecordBank<Alarm, MAX_ALARMS>;

impl RecordBank<Alarm, MAX_ALARMS> {
    /// Index of the first alarm ringing at `now`, lowest slot first.
    pub fn evaluate(&self, now: &DateTime) -> Option<usize> {
        self.iter().position(|alarm| alarm.check(now))
    }

    /// Day mask of every slot, in slot order.
    pub fn day_masks(&self) -> [u8; MAX_ALARMS] {
        let mut masks = [0u8; MAX_ALARMS];
        for (mask, alarm) in masks.iter_mut().zip(self.iter()) {
            *mask = alarm.days;
        }
        masks
    }
}
