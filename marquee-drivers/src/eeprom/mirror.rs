//! RAM-mirrored EEPROM
//!
//! The whole image lives in RAM. Reads and writes hit the mirror; a commit
//! hands the full image to the backing, and only if something changed.
//!
//! If the backing could not be read, the mirror is not known to match it and
//! commits are refused until a reload succeeds. A stored image of the wrong
//! size is unusable either way and may be overwritten.

use marquee_hal::{ByteStore, EepromBacking, StoreError};

/// Byte store emulated over a durable backing
pub struct MirroredEeprom<B, const N: usize> {
    backing: B,
    image: [u8; N],
    dirty: bool,
    synced: bool,
}

impl<B: EepromBacking, const N: usize> MirroredEeprom<B, N> {
    /// Load the persisted image, or start from all zeros if there is none
    pub fn open(backing: B) -> Result<Self, StoreError> {
        let mut eeprom = Self::blank(backing);
        eeprom.reload()?;
        Ok(eeprom)
    }

    /// Start from all zeros without reading the backing
    pub fn blank(backing: B) -> Self {
        Self {
            backing,
            image: [0u8; N],
            dirty: false,
            synced: true,
        }
    }

    /// Replace the mirror with the persisted image
    ///
    /// Uncommitted writes are discarded. On error, or if nothing has been
    /// persisted, the mirror is all zeros.
    pub fn reload(&mut self) -> Result<bool, StoreError> {
        self.dirty = false;
        let result = self.backing.load(&mut self.image);
        if !matches!(result, Ok(true)) {
            self.image.fill(0);
        }
        self.synced = matches!(result, Ok(_) | Err(StoreError::Corrupted));
        result
    }

    /// False after a reload that could not read the backing
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// True if the mirror holds writes not yet committed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn image(&self) -> &[u8; N] {
        &self.image
    }

    pub fn backing(&self) -> &B {
        &self.backing
    }
}

impl<B: EepromBacking, const N: usize> ByteStore for MirroredEeprom<B, N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read(&self, addr: usize) -> u8 {
        self.image.get(addr).copied().unwrap_or(0)
    }

    fn write(&mut self, addr: usize, value: u8) {
        if let Some(byte) = self.image.get_mut(addr) {
            if *byte != value {
                *byte = value;
                self.dirty = true;
            }
        }
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        if !self.synced {
            return Err(StoreError::Unsynced);
        }
        self.backing.persist(&self.image)?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::config::{ConfigError, ConfigStore, DisplayConfig, Line, Rgb};

    #[derive(Default)]
    struct MockBacking {
        stored: Option<Vec<u8>>,
        persists: usize,
        fail: bool,
        fail_load: bool,
    }

    impl EepromBacking for MockBacking {
        fn load(&mut self, image: &mut [u8]) -> Result<bool, StoreError> {
            if self.fail || self.fail_load {
                return Err(StoreError::Flash);
            }
            match &self.stored {
                Some(bytes) if bytes.len() == image.len() => {
                    image.copy_from_slice(bytes);
                    Ok(true)
                }
                Some(_) => Err(StoreError::Corrupted),
                None => Ok(false),
            }
        }

        fn persist(&mut self, image: &[u8]) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Flash);
            }
            self.stored = Some(image.to_vec());
            self.persists += 1;
            Ok(())
        }
    }

    #[test]
    fn test_missing_image_opens_as_zeros() {
        let eeprom: MirroredEeprom<_, 16> = MirroredEeprom::open(MockBacking::default()).unwrap();
        assert!(eeprom.image().iter().all(|&b| b == 0));
        assert!(!eeprom.is_dirty());
    }

    #[test]
    fn test_open_loads_persisted_image() {
        let backing = MockBacking {
            stored: Some((0..8).collect()),
            ..Default::default()
        };
        let eeprom: MirroredEeprom<_, 8> = MirroredEeprom::open(backing).unwrap();
        assert_eq!(eeprom.read(5), 5);
        assert_eq!(eeprom.read(8), 0);
    }

    #[test]
    fn test_open_surfaces_backing_errors() {
        let backing = MockBacking {
            stored: Some(vec![1; 3]),
            ..Default::default()
        };
        let result: Result<MirroredEeprom<_, 8>, _> = MirroredEeprom::open(backing);
        assert!(matches!(result, Err(StoreError::Corrupted)));
    }

    #[test]
    fn test_failed_reload_leaves_zeros() {
        let mut eeprom: MirroredEeprom<_, 8> = MirroredEeprom::blank(MockBacking {
            stored: Some(vec![9; 8]),
            ..Default::default()
        });
        assert_eq!(eeprom.reload(), Ok(true));
        assert_eq!(eeprom.read(0), 9);

        eeprom.backing.stored = Some(vec![9; 3]);
        assert_eq!(eeprom.reload(), Err(StoreError::Corrupted));
        assert!(eeprom.image().iter().all(|&b| b == 0));
        assert!(eeprom.is_synced());
    }

    #[test]
    fn test_unreadable_backing_is_never_overwritten() {
        let mut eeprom: MirroredEeprom<_, 4> = MirroredEeprom::blank(MockBacking {
            stored: Some(vec![1, 2, 3, 4]),
            fail_load: true,
            ..Default::default()
        });
        assert_eq!(eeprom.reload(), Err(StoreError::Flash));
        assert!(!eeprom.is_synced());

        eeprom.write(0, 9);
        assert_eq!(eeprom.commit(), Err(StoreError::Unsynced));
        assert_eq!(eeprom.backing().persists, 0);
        assert_eq!(eeprom.backing().stored.as_deref(), Some(&[1, 2, 3, 4][..]));

        // A later successful read re-enables commits
        eeprom.backing.fail_load = false;
        assert_eq!(eeprom.reload(), Ok(true));
        eeprom.write(0, 9);
        eeprom.commit().unwrap();
        assert_eq!(eeprom.backing().stored.as_deref(), Some(&[9, 2, 3, 4][..]));
    }

    #[test]
    fn test_unchanged_write_stays_clean() {
        let mut eeprom: MirroredEeprom<_, 8> = MirroredEeprom::blank(MockBacking::default());
        eeprom.write(3, 0);
        assert!(!eeprom.is_dirty());

        eeprom.commit().unwrap();
        assert_eq!(eeprom.backing().persists, 0);
    }

    #[test]
    fn test_commit_persists_once() {
        let mut eeprom: MirroredEeprom<_, 8> = MirroredEeprom::blank(MockBacking::default());
        eeprom.write(3, 7);
        eeprom.write(100, 7);
        assert!(eeprom.is_dirty());

        eeprom.commit().unwrap();
        eeprom.commit().unwrap();
        assert_eq!(eeprom.backing().persists, 1);
        assert_eq!(eeprom.backing().stored.as_deref(), Some(&[0, 0, 0, 7, 0, 0, 0, 0][..]));
        assert!(!eeprom.is_dirty());
    }

    #[test]
    fn test_failed_commit_stays_dirty() {
        let mut eeprom: MirroredEeprom<_, 8> = MirroredEeprom::blank(MockBacking {
            fail: true,
            ..Default::default()
        });
        eeprom.write(0, 1);
        assert_eq!(eeprom.commit(), Err(StoreError::Flash));
        assert!(eeprom.is_dirty());
    }

    #[test]
    fn test_read_error_at_boot_keeps_saved_settings() {
        let mut config = DisplayConfig::default();
        *config.line_mut(0).unwrap() = Line::new(b"USER TEXT", Rgb::RED);
        let mut store = ConfigStore::new(MirroredEeprom::<_, 1024>::blank(MockBacking::default()));
        store.save(&config).unwrap();

        let mut eeprom = store.into_inner();
        eeprom.backing.fail_load = true;
        assert_eq!(eeprom.reload(), Err(StoreError::Flash));

        let mut store = ConfigStore::new(eeprom);
        let loaded = store.load();
        assert!(loaded.seeded_defaults);
        assert_eq!(loaded.seed_error, Some(ConfigError::Store(StoreError::Unsynced)));

        // Flash still holds the user's text
        let mut eeprom = store.into_inner();
        assert_eq!(eeprom.backing().persists, 1);
        eeprom.backing.fail_load = false;
        assert_eq!(eeprom.reload(), Ok(true));
        let loaded = ConfigStore::new(eeprom).load();
        assert!(!loaded.seeded_defaults);
        assert_eq!(loaded.config.lines()[0].text(), b"USER TEXT");
    }
}
