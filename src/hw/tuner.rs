//! RDA5807M FM receiver over I²C.
//!
//! The chip takes sequential 16-bit register writes starting at 0x02, so
//! a shadow of registers 0x02..=0x05 is kept and rewritten as a block.

use defmt::{debug, warn};
use embedded_hal::i2c::I2c;

use clock_radio::platform::{Band, Tuner};

/// Sequential-access address.
const ADDRESS: u8 = 0x10;

// Register 0x02
const DHIZ: u16 = 1 << 15;
const DMUTE: u16 = 1 << 14;
const BASS: u16 = 1 << 12;
const NEW_METHOD: u16 = 1 << 2;
const ENABLE: u16 = 1 << 0;

// Register 0x03
const TUNE: u16 = 1 << 4;
/// 76-108 MHz, 100 kHz spacing.
const BAND_WORLD: u16 = 0b10 << 2;
const CHANNEL_SHIFT: u16 = 6;
/// Band floor in tuner units (10 kHz).
const BAND_FLOOR: u16 = 7600;

// Register 0x05
const INT_MODE: u16 = 1 << 15;
const SEEK_THRESHOLD: u16 = 0b1000 << 8;
const LNA_DEFAULT: u16 = 0b10 << 6;
const VOLUME_MASK: u16 = 0x000F;

pub struct Rda5807<I2C> {
    i2c: I2C,
    regs: [u16; 4],
}

impl<I2C: I2c> Rda5807<I2C> {
    pub fn new(i2c: I2C) -> Self {
        let mut tuner = Self {
            i2c,
            regs: [
                DHIZ | BASS | NEW_METHOD | ENABLE,
                BAND_WORLD,
                0,
                INT_MODE | SEEK_THRESHOLD | LNA_DEFAULT,
            ],
        };
        tuner.write();
        tuner
    }

    fn write(&mut self) {
        let mut buf = [0u8; 8];
        for (chunk, reg) in buf.chunks_exact_mut(2).zip(self.regs) {
            chunk.copy_from_slice(&reg.to_be_bytes());
        }
        if self.i2c.write(ADDRESS, &buf).is_err() {
            warn!("Tuner write failed");
        }
        // TUNE self-clears in the chip; drop it from the shadow.
        self.regs[1] &= !TUNE;
    }
}

impl<I2C: I2c> Tuner for Rda5807<I2C> {
    fn set_frequency(&mut self, band: Band, value: u16) {
        let Band::Fm = band;
        let channel = value.saturating_sub(BAND_FLOOR) / 10;
        self.regs[1] = channel << CHANNEL_SHIFT | TUNE | BAND_WORLD;
        debug!("Tuning channel {}", channel);
        self.write();
    }

    fn set_mute(&mut self, mute: bool) {
        if mute {
            self.regs[0] &= !DMUTE;
        } else {
            self.regs[0] |= DMUTE;
        }
        self.write();
    }

    fn set_volume(&mut self, level: u8) {
        self.regs[3] = (self.regs[3] & !VOLUME_MASK) | (level as u16 & VOLUME_MASK);
        self.write();
    }
}
