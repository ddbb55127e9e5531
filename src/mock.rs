//! In-memory collaborators for unit tests.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_storage::{ReadStorage, Storage};

use crate::platform::{Band, Clock, DateTime, DisplaySink, Tuner};
use crate::ui::bitmap::Bitmap;

pub const STORE_SIZE: usize = 32;

#[derive(Debug)]
pub struct StoreFault;

/// Byte store backed by a RAM array.
pub struct MemStore {
    bytes: [u8; STORE_SIZE],
    fail_writes: bool,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            bytes: [0; STORE_SIZE],
            fail_writes: false,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl ReadStorage for MemStore {
    type Error = StoreFault;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        let src = self.bytes.get(start..start + bytes.len()).ok_or(StoreFault)?;
        bytes.copy_from_slice(src);
        Ok(())
    }

    fn capacity(&self) -> usize {
        STORE_SIZE
    }
}

impl Storage for MemStore {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(StoreFault);
        }
        let start = offset as usize;
        let dst = self.bytes.get_mut(start..start + bytes.len()).ok_or(StoreFault)?;
        dst.copy_from_slice(bytes);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeTuner {
    pub frequency: Option<(Band, u16)>,
    pub muted: bool,
    pub volume: u8,
}

impl Tuner for FakeTuner {
    fn set_frequency(&mut self, band: Band, value: u16) {
        self.frequency = Some((band, value));
    }

    fn set_mute(&mut self, mute: bool) {
        self.muted = mute;
    }

    fn set_volume(&mut self, level: u8) {
        self.volume = level;
    }
}

pub struct FakeClock {
    pub now: DateTime,
    pub temperature: i16,
}

impl FakeClock {
    pub fn at(now: DateTime) -> Self {
        Self {
            now,
            temperature: 215,
        }
    }
}

impl Clock for FakeClock {
    fn now(&mut self) -> DateTime {
        self.now
    }

    fn adjust(&mut self, time: DateTime) {
        self.now = time;
    }

    fn temperature(&mut self) -> i16 {
        self.temperature
    }
}

/// Display sink that keeps the last frame pushed.
#[derive(Default)]
pub struct FakeSink {
    pub frame: Bitmap,
    pub blits: usize,
    pub powered: bool,
    pub brightness: u8,
}

impl DisplaySink for FakeSink {
    fn clear(&mut self) {
        self.frame.clear();
    }

    fn blit(&mut self, bitmap: &Bitmap) {
        self.frame = bitmap.clone();
        self.blits += 1;
    }

    fn set_power(&mut self, on: bool) {
        self.powered = on;
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }
}

#[derive(Default)]
pub struct FakePin {
    pub high: bool,
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}
