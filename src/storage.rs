//! Persistent storage for alarm and radio preset records.
//!
//! Records live at fixed offsets in a small byte-addressable store (an
//! external EEPROM, or a window of internal flash on the nRF52840):
//!
//! ```text
//!   0 .. 12   4 × alarm   [hour][minute][days]
//!  12 .. 20   4 × preset  [freq_hi][freq_lo]
//! ```
//!
//! Each record is encoded into a stack buffer and written byte by byte.
//! Writes are not transactional; a power cut mid-save can leave a record
//! half-written, which `decode` then sanitises on the next load.

use crate::error::Error;
use crate::platform::NvStore;

/// Largest encoded record (bytes).
const MAX_RECORD_SIZE: usize = 4;

/// A fixed-size value type stored in a table of slots.
pub trait Record: Copy + Default {
    /// Offset of slot 0.
    const BASE: u32;
    /// Encoded size of one slot.
    const SIZE: usize;
    /// Number of slots in the table.
    const SLOTS: usize;

    /// Serialize into `buf[..SIZE]`.
    fn encode(&self, buf: &mut [u8]);

    /// Deserialize from `data[..SIZE]`. Garbage (e.g. erased flash) yields
    /// a sane default rather than an error.
    fn decode(data: &[u8]) -> Self;

    /// Byte offset of a slot.
    fn offset(slot: usize) -> Result<u32, Error> {
        if slot >= Self::SLOTS {
            return Err(Error::InvalidSlot);
        }
        Ok(Self::BASE + (slot * Self::SIZE) as u32)
    }

    fn load(store: &mut dyn NvStore, slot: usize) -> Result<Self, Error> {
        let base = Self::offset(slot)?;
        let mut buf = [0u8; MAX_RECORD_SIZE];
        for (i, byte) in buf[..Self::SIZE].iter_mut().enumerate() {
            *byte = store.read_byte(base + i as u32)?;
        }
        Ok(Self::decode(&buf[..Self::SIZE]))
    }

    fn save(&self, store: &mut dyn NvStore, slot: usize) -> Result<(), Error> {
        let base = Self::offset(slot)?;
        let mut buf = [0u8; MAX_RECORD_SIZE];
        self.encode(&mut buf[..Self::SIZE]);
        for (i, byte) in buf[..Self::SIZE].iter().enumerate() {
            store.write_byte(base + i as u32, *byte)?;
        }
        Ok(())
    }
}

/// In-memory copy of a record table, synced with the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordBank<R: Record, const N: usize> {
    records: [R; N],
}

impl<R: Record, const N: usize> RecordBank<R, N> {
    pub fn new() -> Self {
        Self {
            records: [R::default(); N],
        }
    }

    /// Replace the cache with the stored table.
    pub fn load_all(&mut self, store: &mut dyn NvStore) -> Result<(), Error> {
        for slot in 0..N {
            self.records[slot] = R::load(store, slot)?;
        }
        debug!("Loaded {} records from NVM", N);
        Ok(())
    }

    /// Persist one slot from the cache.
    pub fn save(&self, store: &mut dyn NvStore, slot: usize) -> Result<(), Error> {
        let record = self.records.get(slot).ok_or(Error::InvalidSlot)?;
        record.save(store, slot)?;
        debug!("Saved record slot {}", slot);
        Ok(())
    }

    pub fn get(&self, slot: usize) -> Option<&R> {
        self.records.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut R> {
        self.records.get_mut(slot)
    }

    /// Overwrite one slot in the cache (not persisted).
    pub fn set(&mut self, slot: usize, record: R) -> Result<(), Error> {
        let entry = self.records.get_mut(slot).ok_or(Error::InvalidSlot)?;
        *entry = record;
        Ok(())
    }

    pub fn iter(&self) -> core::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<R: Record, const N: usize> Default for RecordBank<R, N> {
    fn default() -> Self {
        Self::new()
    }
}
