//! Flash-backed EEPROM image for RP2040
//!
//! The 1 KiB settings image is stored as a single item in a
//! sequential-storage map in the last 64KB of flash, so repeated saves are
//! wear-levelled across the partition.

use embassy_futures::block_on;
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

use marquee_hal::{EepromBacking, StorageKey, StoreError, EEPROM_SIZE};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const CONFIG_PARTITION_SIZE: usize = 64 * 1024;
pub const CONFIG_PARTITION_START: usize = FLASH_SIZE - CONFIG_PARTITION_SIZE;

/// Flash range for the config partition
pub const CONFIG_RANGE: core::ops::Range<u32> =
    (CONFIG_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch space for one map item: key, length header and the image
const ITEM_BUFFER_SIZE: usize = EEPROM_SIZE + 64;

/// EEPROM image persisted in the flash key-value partition
///
/// The map operations are async; they are driven to completion in place
/// because settings saves run inside the synchronous control loop.
pub struct FlashEeprom<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> FlashEeprom<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

impl<'d> EepromBacking for FlashEeprom<'d> {
    fn load(&mut self, image: &mut [u8]) -> Result<bool, StoreError> {
        let mut buffer = [0u8; ITEM_BUFFER_SIZE];
        let key = StorageKey::EepromImage;

        let result = block_on(map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            CONFIG_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &key,
        ));

        match result {
            Ok(Some(data)) if data.len() == image.len() => {
                image.copy_from_slice(data);
                Ok(true)
            }
            Ok(Some(data)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Stored image is {} bytes, expected {}", data.len(), image.len());
                #[cfg(not(feature = "defmt"))]
                let _ = data;
                Err(StoreError::Corrupted)
            }
            Ok(None) => Ok(false),
            Err(_) => Err(StoreError::Storage),
        }
    }

    fn persist(&mut self, image: &[u8]) -> Result<(), StoreError> {
        let mut buffer = [0u8; ITEM_BUFFER_SIZE];

        block_on(map::store_item(
            &mut self.flash,
            CONFIG_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &StorageKey::EepromImage,
            &image,
        ))
        .map_err(|e| match e {
            sequential_storage::Error::FullStorage => StoreError::Full,
            sequential_storage::Error::Storage { .. } => StoreError::Flash,
            _ => StoreError::Storage,
        })
    }
}
