//! Clock radio firmware for the nRF52840.
//!
//! Hardware:
//! - 3 push buttons (UP, DOWN, OK), active low
//! - SSD1306 128×64 OLED on TWIM0, showing the 24×16 matrix scaled up
//! - RDA5807M FM tuner on TWIM1
//! - Alarm buzzer on a GPIO
//! - Presets and alarms in the last pages of internal flash
//!
//! One loop drives everything: buttons are sampled every
//! `POLL_PERIOD_MS`, and every `REDRAW_PERIOD_MS` the alarm sweep runs
//! and the active screen redraws.

#![no_std]
#![no_main]

mod hw;

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::temp::{self, Temp};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Ticker};
use embedded_storage::nor_flash::RmwNorFlashStorage;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use clock_radio::config::{BUTTONS_ACTIVE_LOW, POLL_PERIOD_MS, REDRAW_PERIOD_MS};
use clock_radio::platform::DateTime;
use clock_radio::ui::buttons::PinButtons;
use clock_radio::ClockRadio;

use hw::nvm::{FlashWindow, FLASH_PAGE_SIZE};
use hw::oled::OledSink;
use hw::soft_clock::SoftClock;
use hw::tuner::Rda5807;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SPIM1_SPIS1_TWIM1_TWIS1_SPI1_TWI1 => twim::InterruptHandler<peripherals::TWISPI1>;
    TEMP => temp::InterruptHandler;
});

/// Where the software clock starts after a reset.
const BOOT_TIME: (u16, u8, u8) = (2024, 1, 1);

/// Polls per redraw.
const POLLS_PER_REDRAW: u64 = REDRAW_PERIOD_MS / POLL_PERIOD_MS;

static FLASH_BUFFER: StaticCell<[u8; FLASH_PAGE_SIZE as usize]> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("clock-radio starting");

    let p = embassy_nrf::init(Default::default());

    // ── Buttons ──────────────────────────────────────────────────────────
    let buttons = PinButtons::new(
        Input::new(p.P0_11, Pull::Up),
        Input::new(p.P0_12, Pull::Up),
        Input::new(p.P0_24, Pull::Up),
        BUTTONS_ACTIVE_LOW,
    );
    let buzzer = Output::new(p.P0_13, Level::Low, OutputDrive::Standard);

    // ── I²C peripherals ──────────────────────────────────────────────────
    let oled_bus = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let tuner_bus = Twim::new(p.TWISPI1, Irqs, p.P0_30, p.P0_31, twim::Config::default());

    // ── Flash-backed byte store ──────────────────────────────────────────
    let buffer = FLASH_BUFFER.init([0; FLASH_PAGE_SIZE as usize]);
    let store = FlashWindow::new(RmwNorFlashStorage::new(Nvmc::new(p.NVMC), buffer));

    let mut temp = Temp::new(p.TEMP, Irqs);
    let (year, month, day) = BOOT_TIME;
    let clock = SoftClock::new(DateTime::new(year, month, day, 0, 0, 0));

    let mut app = ClockRadio::new(
        clock,
        store,
        OledSink::new(oled_bus),
        Rda5807::new(tuner_bus),
        buttons,
        buzzer,
    );
    app.start();

    let mut ticker = Ticker::every(Duration::from_millis(POLL_PERIOD_MS));
    let mut polls: u64 = 0;
    loop {
        ticker.next().await;

        if let Err(e) = app.poll() {
            error!("Event handling failed: {}", e);
        }

        polls += 1;
        if polls % POLLS_PER_REDRAW == 0 {
            // Quarter degrees to tenths.
            let quarters = temp.read().await.to_bits();
            app.clock_mut().set_temperature((quarters * 10 / 4) as i16);
            app.tick();
        }
    }
}
