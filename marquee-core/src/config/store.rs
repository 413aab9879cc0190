//! Fixed-layout settings persistence
//!
//! Encodes [`DisplayConfig`] and [`Credentials`] at the offsets in
//! [`super::layout`]. Line records are packed: each is a length byte
//! followed by that many text bytes, and the next record starts right after.

use marquee_hal::{ByteStore, StoreError};

use super::layout::*;
use super::types::{
    Credentials, DisplayConfig, Rgb, DEFAULT_BRIGHTNESS, DEFAULT_SCROLL_DELAY_MS,
    MAX_PASSWORD_LEN, MAX_SSID_LEN, MAX_TEXT_LEN,
};

/// Stored scroll delays above this are treated as garbage
const MAX_STORED_SCROLL_DELAY_MS: u16 = 1000;

/// Errors from the settings store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Backing store failed to commit
    Store(StoreError),
}

impl From<StoreError> for ConfigError {
    fn from(e: StoreError) -> Self {
        ConfigError::Store(e)
    }
}

/// Result of loading the settings image
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Loaded {
    pub config: DisplayConfig,
    /// The store had no text; factory lines were seeded
    pub seeded_defaults: bool,
    /// Writing the seeded lines back failed; they exist in memory only
    pub seed_error: Option<ConfigError>,
    /// The primary color was black; line colors were replaced in memory
    pub regenerated_colors: bool,
}

/// Settings store over a byte-addressable backing
pub struct ConfigStore<S: ByteStore> {
    store: S,
}

impl<S: ByteStore> ConfigStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Decode the display settings
    ///
    /// An image with no line text is treated as uninitialized: the factory
    /// lines are seeded and persisted before returning. If that commit
    /// fails the seeded lines are still returned, with the error in
    /// [`Loaded::seed_error`]. A black primary color then replaces every
    /// line color with the fallback rotation, in memory only.
    pub fn load(&mut self) -> Loaded {
        let mut config = DisplayConfig::default();

        config.brightness = match self.store.read(BRIGHTNESS_ADDR) {
            0 => DEFAULT_BRIGHTNESS,
            level => level,
        };

        let mut cursor = LINES_ADDR;
        let mut text = [0u8; MAX_TEXT_LEN];
        for line in config.lines_mut() {
            let len = usize::from(self.store.read(cursor));
            cursor += 1;

            // Oversized lengths keep the head; the cursor still walks the full record
            let kept = len.min(MAX_TEXT_LEN);
            for (i, byte) in text[..kept].iter_mut().enumerate() {
                *byte = self.store.read(cursor + i);
            }
            line.set_text(&text[..kept]);
            cursor += len;
        }

        for (index, line) in config.lines_mut().iter_mut().enumerate() {
            line.color = self.read_rgb(COLOR_ADDR + index * 3);
        }

        let delay = decode_scroll_delay(
            self.store.read(SPEED_ADDR),
            self.store.read(SPEED_HIGH_ADDR),
        );
        config.set_scroll_delay_ms(delay);

        let seeded_defaults = !config.has_text();
        let mut seed_error = None;
        if seeded_defaults {
            config.seed_default_lines();
            seed_error = self.save(&config).err();
        }

        let regenerated_colors = config.lines()[0].color.is_black();
        if regenerated_colors {
            config.apply_color_rotation();
        }

        Loaded {
            config,
            seeded_defaults,
            seed_error,
            regenerated_colors,
        }
    }

    /// Persist the display settings with a single commit
    ///
    /// Writes the settings block, then the color block, then the scroll
    /// delay. Nothing is durable until the commit at the end.
    pub fn save(&mut self, config: &DisplayConfig) -> Result<(), ConfigError> {
        let lines = config.lines();

        self.write_rgb(SETTINGS_ADDR, lines[0].color);
        self.store.write(BRIGHTNESS_ADDR, config.brightness);

        let mut cursor = LINES_ADDR;
        for line in lines {
            let text = line.text();
            self.store.write(cursor, text.len() as u8);
            cursor += 1;
            self.write_bytes(cursor, text);
            cursor += text.len();
        }

        for (index, line) in lines.iter().enumerate() {
            self.write_rgb(COLOR_ADDR + index * 3, line.color);
        }

        let [low, high] = config.scroll_delay_ms().to_le_bytes();
        self.store.write(SPEED_ADDR, low);
        self.store.write(SPEED_HIGH_ADDR, high);

        self.store.commit()?;
        Ok(())
    }

    /// Decode stored Wi-Fi credentials
    ///
    /// Returns `None` unless the configured flag is set and the SSID length
    /// is 1..=31. The password length is clamped to 63.
    pub fn load_credentials(&self) -> Option<Credentials> {
        if self.store.read(WIFI_FLAG_ADDR) != WIFI_CONFIGURED {
            return None;
        }

        let ssid_len = usize::from(self.store.read(WIFI_SSID_ADDR));
        if !(1..=MAX_SSID_LEN).contains(&ssid_len) {
            return None;
        }
        let pass_len = usize::from(self.store.read(WIFI_PASS_ADDR)).min(MAX_PASSWORD_LEN);

        let mut ssid = [0u8; MAX_SSID_LEN];
        let mut password = [0u8; MAX_PASSWORD_LEN];
        self.read_bytes(WIFI_SSID_ADDR + 1, &mut ssid[..ssid_len]);
        self.read_bytes(WIFI_PASS_ADDR + 1, &mut password[..pass_len]);

        Some(Credentials::new(&ssid[..ssid_len], &password[..pass_len]))
    }

    /// Persist Wi-Fi credentials and mark them valid
    pub fn save_credentials(&mut self, credentials: &Credentials) -> Result<(), ConfigError> {
        let ssid = credentials.ssid();
        let password = credentials.password();

        self.store.write(WIFI_FLAG_ADDR, WIFI_CONFIGURED);
        self.store.write(WIFI_SSID_ADDR, ssid.len() as u8);
        self.write_bytes(WIFI_SSID_ADDR + 1, ssid);
        self.store.write(WIFI_PASS_ADDR, password.len() as u8);
        self.write_bytes(WIFI_PASS_ADDR + 1, password);

        self.store.commit()?;
        Ok(())
    }

    fn read_rgb(&self, addr: usize) -> Rgb {
        Rgb::new(
            self.store.read(addr),
            self.store.read(addr + 1),
            self.store.read(addr + 2),
        )
    }

    fn write_rgb(&mut self, addr: usize, color: Rgb) {
        self.store.write(addr, color.r);
        self.store.write(addr + 1, color.g);
        self.store.write(addr + 2, color.b);
    }

    fn read_bytes(&self, addr: usize, out: &mut [u8]) {
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = self.store.read(addr + i);
        }
    }

    fn write_bytes(&mut self, addr: usize, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.store.write(addr + i, byte);
        }
    }
}

/// Decode the two scroll delay bytes
///
/// A high byte of 0xFF means only the low byte is meaningful. Zero or
/// anything above 1000 falls back to the default; the rest is clamped to
/// 50..=500 by the caller.
fn decode_scroll_delay(low: u8, high: u8) -> u16 {
    let raw = if high == LEGACY_SPEED_MARKER {
        u16::from(low)
    } else {
        u16::from_le_bytes([low, high])
    };

    if raw == 0 || raw > MAX_STORED_SCROLL_DELAY_MS {
        DEFAULT_SCROLL_DELAY_MS
    } else {
        raw
    }
}
