//! Application-wide constants and compile-time configuration.
//!
//! Matrix geometry, record layout in non-volatile memory, tuner band and
//! firmware pin assignments live here so they can be tuned in one place.

// LED matrix

/// Width of the LED matrix (pixels).
pub const MATRIX_WIDTH: u32 = 24;

/// Height of the LED matrix (pixels).
pub const MATRIX_HEIGHT: u32 = 16;

/// Bytes needed for one bit-packed frame.
pub const MATRIX_BYTES: usize = (MATRIX_WIDTH * MATRIX_HEIGHT / 8) as usize;

/// Horizontal advance of one glyph: 5 px font column data + 1 px spacing.
pub const GLYPH_WIDTH: u32 = 6;

/// Glyph height (pixels).
pub const GLYPH_HEIGHT: u32 = 8;

/// Default matrix brightness (0 = dimmest, 15 = brightest).
pub const DEFAULT_BRIGHTNESS: u8 = 0;

/// Longest string a `Text` widget holds.
pub const TEXT_CAPACITY: usize = 16;

// Screens

/// Maximum widgets a setup screen can cycle through.
pub const MAX_SETUP_WIDGETS: usize = 4;

// Alarms

/// Number of alarm slots.
pub const MAX_ALARMS: usize = 4;

/// First NVM byte of the alarm table.
pub const BASE_ALARMS_NVM: u32 = 0;

/// Bytes per alarm record: hour, minute, day mask.
pub const ALARM_RECORD_SIZE: u32 = 3;

// Radio presets

/// Number of radio preset slots.
pub const MAX_STATIONS: usize = 4;

/// First NVM byte of the preset table.
pub const BASE_STATIONS_NVM: u32 = 12;

/// Bytes per preset record: big-endian frequency.
pub const STATION_RECORD_SIZE: u32 = 2;

/// Lowest tunable FM frequency, 100 kHz units (76.0 MHz).
pub const TUNE_MIN: u16 = 760;

/// Highest tunable FM frequency, 100 kHz units (108.0 MHz).
pub const TUNE_MAX: u16 = 1080;

/// Tuner volume applied at start-up (0..=15).
pub const DEFAULT_VOLUME: u8 = 8;

/// Minutes the radio keeps playing after SLEEP is pressed.
pub const SLEEP_MINUTES: u8 = 59;

// Date setup

/// Earliest year accepted by the date setup.
pub const YEAR_MIN: u16 = 2000;

/// Latest year accepted by the date setup.
pub const YEAR_MAX: u16 = 2099;

// Control loop timing (firmware)

/// Button sampling period (ms).
pub const POLL_PERIOD_MS: u64 = 50;

/// Redraw period (ms). Also the blink half-period.
pub const REDRAW_PERIOD_MS: u64 = 500;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button UP      → P0.11
//   Button DOWN    → P0.12
//   Button OK      → P0.24
//   OLED SDA/SCL   → P0.26 / P0.27 (TWIM0)
//   Tuner SDA/SCL  → P0.30 / P0.31 (TWIM1)
//   Alarm buzzer   → P0.13

/// Buttons pull the line low when pressed.
pub const BUTTONS_ACTIVE_LOW: bool = true;

// Flash-backed NVM (firmware)

/// Flash page index where the byte store starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 252;

/// Number of flash pages reserved for the byte store.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;
