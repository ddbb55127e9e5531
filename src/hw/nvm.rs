//! Byte store on a window of internal flash.
//!
//! `RmwNorFlashStorage` turns the NVMC's page-erase flash into plain
//! read/write storage; `FlashWindow` shifts offsets so record byte 0 lands
//! on the first reserved page. The core sees it as an `NvStore` through
//! the blanket impl for `embedded_storage::Storage`.

use embedded_storage::{ReadStorage, Storage};

use clock_radio::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};

/// nRF52840 flash page size.
pub const FLASH_PAGE_SIZE: u32 = 4096;

const WINDOW_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;
const WINDOW_LEN: u32 = STORAGE_FLASH_PAGE_COUNT * FLASH_PAGE_SIZE;

pub struct FlashWindow<S> {
    inner: S,
}

impl<S> FlashWindow<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[derive(Debug)]
pub enum WindowError<E> {
    OutOfBounds,
    Flash(E),
}

impl<S: ReadStorage> ReadStorage for FlashWindow<S> {
    type Error = WindowError<S::Error>;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        if offset + bytes.len() as u32 > WINDOW_LEN {
            return Err(WindowError::OutOfBounds);
        }
        self.inner
            .read(WINDOW_START + offset, bytes)
            .map_err(WindowError::Flash)
    }

    fn capacity(&self) -> usize {
        WINDOW_LEN as usize
    }
}

impl<S: Storage> Storage for FlashWindow<S> {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if offset + bytes.len() as u32 > WINDOW_LEN {
            return Err(WindowError::OutOfBounds);
        }
        self.inner
            .write(WINDOW_START + offset, bytes)
            .map_err(WindowError::Flash)
    }
}
