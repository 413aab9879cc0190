//! EEPROM-style storage abstractions
//!
//! The banner settings live at fixed byte offsets, so the storage contract is
//! deliberately tiny: read a byte, write a byte, commit. Implementations
//! decide how a commit reaches durable memory.

/// Size of the emulated EEPROM region in bytes
pub const EEPROM_SIZE: usize = 1024;

/// Storage keys for data kept in the flash key-value partition
///
/// The EEPROM image is stored as a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Full EEPROM image (EEPROM_SIZE bytes)
    EepromImage = 0,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::EepromImage),
            _ => None,
        }
    }
}

/// Errors from persistent storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Low-level flash operation failed
    Flash,
    /// Key-value storage layer failed
    Storage,
    /// Persisted image has an unexpected size
    Corrupted,
    /// Storage is full
    Full,
    /// The durable copy could not be read back, so a commit would clobber it
    Unsynced,
}

/// Byte-addressable persistent store
///
/// Reads and writes operate on a working copy; nothing is durable until
/// [`ByteStore::commit`] returns `Ok`. There is no atomicity across a
/// sequence of writes: a reset between writes and commit loses all of them,
/// and a failure inside commit may leave the durable copy partially updated.
pub trait ByteStore {
    /// Number of addressable bytes
    fn capacity(&self) -> usize;

    /// Read the byte at `addr`
    ///
    /// Addresses at or beyond [`ByteStore::capacity`] read as 0.
    fn read(&self, addr: usize) -> u8;

    /// Write `value` at `addr`
    ///
    /// Writes at or beyond [`ByteStore::capacity`] are dropped.
    fn write(&mut self, addr: usize, value: u8);

    /// Make all writes since the last commit durable
    fn commit(&mut self) -> Result<(), StoreError>;
}

impl<T: ByteStore + ?Sized> ByteStore for &mut T {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read(&self, addr: usize) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: usize, value: u8) {
        (**self).write(addr, value)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        (**self).commit()
    }
}

/// Durable medium behind a RAM-mirrored EEPROM image
///
/// Chip HALs implement this for their flash; the mirror itself lives in
/// `marquee-drivers`.
pub trait EepromBacking {
    /// Fill `image` from durable memory
    ///
    /// Returns `Ok(false)` if nothing has been persisted yet, in which case
    /// `image` is left untouched.
    fn load(&mut self, image: &mut [u8]) -> Result<bool, StoreError>;

    /// Persist the full `image`
    fn persist(&mut self, image: &[u8]) -> Result<(), StoreError>;
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match StorageKey::from_u8(buffer[0]) {
            Some(key) => Ok((key, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_roundtrip() {
        let key = StorageKey::EepromImage;
        assert_eq!(StorageKey::from_u8(key.as_u8()), Some(key));
        assert_eq!(StorageKey::from_u8(1), None);
    }
}
