//! Radio preset records.

use crate::config::{BASE_STATIONS_NVM, MAX_STATIONS, STATION_RECORD_SIZE, TUNE_MAX, TUNE_MIN};
use crate::storage::{Record, RecordBank};

/// A preset frequency in 100 kHz units (988 = 98.8 MHz).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Station {
    pub frequency: u16,
}

impl Station {
    pub const fn new(frequency: u16) -> Self {
        Self { frequency }
    }

    /// Frequency in tuner units (10 kHz), band-limited.
    pub fn tuner_value(&self) -> u16 {
        self.frequency.clamp(TUNE_MIN, TUNE_MAX) * 10
    }
}

impl Default for Station {
    fn default() -> Self {
        Self::new(TUNE_MIN)
    }
}

impl Record for Station {
    const BASE: u32 = BASE_STATIONS_NVM;
    const SIZE: usize = STATION_RECORD_SIZE as usize;
    const SLOTS: usize = MAX_STATIONS;

    fn encode(&self, buf: &mut [u8]) {
        buf[..2].copy_from_slice(&self.frequency.to_be_bytes());
    }

    fn decode(data: &[u8]) -> Self {
        let frequency = u16::from_be_bytes([data[0], data[1]]);
        if !(TUNE_MIN..=TUNE_MAX).contains(&frequency) {
            return Self::default();
        }
        Self { frequency }
    }
}

/// The four radio presets.
pub type StationBank = RecordBank<Station, MAX_STATIONS>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MemStore;
    use crate::platform::NvStore;

    #[test]
    fn persistence_roundtrip_988() {
        let mut store = MemStore::new();
        Station::new(988).save(&mut store, 0).unwrap();
        assert_eq!(&store.bytes()[12..14], &[0x03, 0xDC]);

        let mut bank = StationBank::new();
        bank.load_all(&mut store).unwrap();
        assert_eq!(bank.get(0).map(|s| s.frequency), Some(988));
    }

    #[test]
    fn slots_are_two_bytes_apart() {
        let mut store = MemStore::new();
        Station::new(1045).save(&mut store, 3).unwrap();
        assert_eq!(&store.bytes()[18..20], &1045u16.to_be_bytes());
        assert_eq!(Station::load(&mut store, 3).unwrap().frequency, 1045);
    }

    #[test]
    fn erased_record_decodes_to_band_start() {
        assert_eq!(Station::decode(&[0xFF, 0xFF]).frequency, TUNE_MIN);
    }

    #[test]
    fn torn_record_decodes_to_band_start() {
        // High byte written, low byte still erased.
        assert_eq!(Station::decode(&[0x04, 0xFF]).frequency, TUNE_MIN);
        // 0x03FF lands inside the band and is kept as-is.
        assert_eq!(Station::decode(&[0x03, 0xFF]).frequency, 1023);
        for hi in 0..=u8::MAX {
            for lo in 0..=u8::MAX {
                let frequency = u16::from_be_bytes([hi, lo]);
                let decoded = Station::decode(&[hi, lo]).frequency;
                if (TUNE_MIN..=TUNE_MAX).contains(&frequency) {
                    assert_eq!(decoded, frequency);
                } else {
                    assert_eq!(decoded, TUNE_MIN);
                }
            }
        }
    }

    #[test]
    fn torn_slot_leaves_neighbours_intact() {
        let mut store = MemStore::new();
        for slot in 0..MAX_STATIONS {
            Station::new(1012).save(&mut store, slot).unwrap();
        }
        // Saving 105.0 MHz to slot 2 interrupted between its two bytes.
        store.write_byte(16, 0x04).unwrap();
        store.write_byte(17, 0xFF).unwrap();

        let mut bank = StationBank::new();
        bank.load_all(&mut store).unwrap();
        assert_eq!(bank.get(2), Some(&Station::default()));
        for slot in [0, 1, 3] {
            assert_eq!(bank.get(slot).map(|s| s.frequency), Some(1012));
        }
    }

    #[test]
    fn tuner_units() {
        assert_eq!(Station::new(988).tuner_value(), 9880);
        assert_eq!(Station::new(2000).tuner_value(), TUNE_MAX * 10);
    }
}
