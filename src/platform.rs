//! Interfaces to the hardware around the control core.
//!
//! The core never talks to chips directly. The RTC, the byte store, the
//! LED matrix, the FM tuner, the buttons and the alarm line are reached
//! through the small traits below; the firmware binary wires them to real
//! peripherals and the tests wire them to in-memory fakes.

use embedded_hal::digital::OutputPin;
use embedded_storage::Storage;

use crate::error::Error;
use crate::ui::bitmap::Bitmap;
use crate::ui::Buttons;

/// Day of the week, Monday first.
///
/// The index doubles as the bit position in an alarm's day mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl Weekday {
    /// All days in mask order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Bit index, Monday = 0.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Human numbering, Monday = 1 .. Sunday = 7.
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Gregorian weekday of a date (Sakamoto's method).
    pub fn from_date(year: u16, month: u8, day: u8) -> Self {
        const OFFSETS: [u32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
        let month = month.clamp(1, 12);
        let y = u32::from(if month < 3 { year.saturating_sub(1) } else { year });
        let sunday_based =
            (y + y / 4 - y / 100 + y / 400 + OFFSETS[month as usize - 1] + day as u32) % 7;
        // 0 = Sunday in Sakamoto's table.
        Self::ALL[((sunday_based + 6) % 7) as usize]
    }
}

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Calendar date and wall-clock time as kept by the RTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub weekday: Weekday,
}

impl DateTime {
    /// Build a normalised date-time.
    ///
    /// Out-of-range fields are clamped (a 31st of February becomes the
    /// last day of February) and the weekday is derived from the date.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        let month = month.clamp(1, 12);
        let day = day.clamp(1, days_in_month(year, month));
        Self {
            year,
            month,
            day,
            hour: hour.min(23),
            minute: minute.min(59),
            second: second.min(59),
            weekday: Weekday::from_date(year, month, day),
        }
    }

    /// Same date, different time of day.
    pub fn with_time(&self, hour: u8, minute: u8, second: u8) -> Self {
        Self::new(self.year, self.month, self.day, hour, minute, second)
    }

    /// Same time of day, different date.
    pub fn with_date(&self, year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, self.hour, self.minute, self.second)
    }

    /// Advance by `secs` seconds, rolling over days, months and years.
    pub fn plus_seconds(&self, secs: u32) -> Self {
        // Normalise hand-built values first.
        let start = Self::new(self.year, self.month, self.day, self.hour, self.minute, self.second);
        let of_day = start.hour as u32 * 3600 + start.minute as u32 * 60 + start.second as u32;
        let of_day = of_day as u64 + secs as u64;
        let mut days = (of_day / 86_400) as u32;
        let rem = (of_day % 86_400) as u32;

        let (mut year, mut month, mut day) = (start.year, start.month, start.day);
        while days > 0 {
            let left_in_month = days_in_month(year, month).saturating_sub(day) as u32;
            if days <= left_in_month {
                day += days as u8;
                break;
            }
            days -= left_in_month + 1;
            day = 1;
            if month == 12 {
                month = 1;
                year = year.saturating_add(1);
            } else {
                month += 1;
            }
        }

        Self::new(
            year,
            month,
            day,
            (rem / 3600) as u8,
            (rem % 3600 / 60) as u8,
            (rem % 60) as u8,
        )
    }
}

/// Real-time clock with an on-board temperature sensor.
pub trait Clock {
    fn now(&mut self) -> DateTime;

    /// Set the clock.
    fn adjust(&mut self, time: DateTime);

    /// Ambient temperature in tenths of a degree Celsius.
    fn temperature(&mut self) -> i16;
}

/// Byte-addressable non-volatile store (EEPROM or emulated).
pub trait NvStore {
    fn read_byte(&mut self, offset: u32) -> Result<u8, Error>;
    fn write_byte(&mut self, offset: u32, value: u8) -> Result<(), Error>;
}

impl<S: Storage> NvStore for S {
    fn read_byte(&mut self, offset: u32) -> Result<u8, Error> {
        let mut buf = [0u8; 1];
        self.read(offset, &mut buf).map_err(|_| Error::Storage)?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, offset: u32, value: u8) -> Result<(), Error> {
        self.write(offset, &[value]).map_err(|_| Error::Storage)
    }
}

/// Output side of the LED matrix.
pub trait DisplaySink {
    /// Blank the physical panel.
    fn clear(&mut self);

    /// Push a full frame.
    fn blit(&mut self, bitmap: &Bitmap);

    fn set_power(&mut self, on: bool);

    /// Brightness level, 0 (dimmest) to 15 (brightest).
    fn set_brightness(&mut self, level: u8);
}

/// Tuner band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    /// FM broadcast, frequencies in 10 kHz units.
    Fm,
}

/// FM receiver chip.
pub trait Tuner {
    fn set_frequency(&mut self, band: Band, value: u16);
    fn set_mute(&mut self, mute: bool);
    fn set_volume(&mut self, level: u8);
}

/// Source of raw (already debounced) button state.
pub trait ButtonSource {
    fn poll(&mut self) -> Buttons;
}

/// Line that drives the alarm buzzer/LED.
pub trait AlarmOutput {
    fn set_alarm(&mut self, on: bool);
}

impl<P: OutputPin> AlarmOutput for P {
    fn set_alarm(&mut self, on: bool) {
        let result = if on { self.set_high() } else { self.set_low() };
        if result.is_err() {
            warn!("Alarm line write failed");
        }
    }
}
