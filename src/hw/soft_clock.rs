//! Wall clock kept in software on top of the embassy uptime timer.
//!
//! Time is an anchor date plus the seconds elapsed since it was set.
//! There is no battery-backed RTC, so the clock restarts from
//! `BOOT_TIME` after a reset until the user sets it.

use embassy_time::Instant;

use clock_radio::platform::{Clock, DateTime};

pub struct SoftClock {
    anchor: DateTime,
    since: Instant,
    /// Tenths of °C, refreshed by the main loop from the TEMP sensor.
    temperature: i16,
}

impl SoftClock {
    pub fn new(anchor: DateTime) -> Self {
        Self {
            anchor,
            since: Instant::now(),
            temperature: 0,
        }
    }

    pub fn set_temperature(&mut self, tenths: i16) {
        self.temperature = tenths;
    }
}

impl Clock for SoftClock {
    fn now(&mut self) -> DateTime {
        let elapsed = self.since.elapsed().as_secs();
        self.anchor.plus_seconds(elapsed as u32)
    }

    fn adjust(&mut self, time: DateTime) {
        self.anchor = time;
        self.since = Instant::now();
    }

    fn temperature(&mut self) -> i16 {
        self.temperature
    }
}
