//! Test doubles shared by the unit tests

use core::cell::Cell;

use marquee_hal::{ByteStore, StoreError, EEPROM_SIZE};

use crate::config::Rgb;
use crate::panel::PanelGeometry;
use crate::traits::{Clock, DisplayDriver, DisplayError};

/// Frame buffer that records driver calls
pub struct MockDisplay {
    pub pixels: Vec<Rgb>,
    pub brightness: u8,
    pub brightness_log: Vec<u8>,
    pub shows: usize,
    pub clears: usize,
    pub fail_show: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb::BLACK; PanelGeometry::DEFAULT.pixel_count()],
            brightness: 255,
            brightness_log: Vec::new(),
            shows: 0,
            clears: 0,
            fail_show: false,
        }
    }

    pub fn pixel(&self, index: usize) -> Rgb {
        self.pixels[index]
    }

    pub fn lit_indices(&self) -> Vec<usize> {
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, color)| !color.is_black())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn lit_colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels.iter().copied().filter(|color| !color.is_black())
    }
}

impl DisplayDriver for MockDisplay {
    fn clear(&mut self) {
        self.clears += 1;
        self.pixels.fill(Rgb::BLACK);
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
        self.brightness_log.push(level);
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        if self.fail_show {
            return Err(DisplayError::Communication);
        }
        self.shows += 1;
        Ok(())
    }
}

/// In-memory EEPROM that counts commits
#[derive(Clone)]
pub struct MemStore {
    pub bytes: Vec<u8>,
    pub commits: usize,
    pub fail_commit: bool,
}

impl MemStore {
    pub fn new() -> Self {
        Self::filled(0)
    }

    pub fn filled(value: u8) -> Self {
        Self {
            bytes: vec![value; EEPROM_SIZE],
            commits: 0,
            fail_commit: false,
        }
    }
}

impl ByteStore for MemStore {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, addr: usize) -> u8 {
        self.bytes.get(addr).copied().unwrap_or(0)
    }

    fn write(&mut self, addr: usize, value: u8) {
        if let Some(byte) = self.bytes.get_mut(addr) {
            *byte = value;
        }
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if self.fail_commit {
            return Err(StoreError::Flash);
        }
        self.commits += 1;
        Ok(())
    }
}

/// Clock advanced by hand
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
