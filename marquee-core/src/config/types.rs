//! Banner configuration types
//!
//! The in-memory view of everything the settings store persists. Field
//! ranges are enforced at the mutation points (settings updates and store
//! loading); the types themselves only enforce capacity.

use heapless::Vec;

/// Number of configurable lines
pub const NUM_LINES: usize = 10;

/// Maximum bytes of text per line
pub const MAX_TEXT_LEN: usize = 64;

/// Maximum SSID length in bytes
pub const MAX_SSID_LEN: usize = 31;

/// Maximum password length in bytes
pub const MAX_PASSWORD_LEN: usize = 63;

/// Brightness used when the stored value is 0
pub const DEFAULT_BRIGHTNESS: u8 = 60;

/// Scroll delay used when the stored value is invalid
pub const DEFAULT_SCROLL_DELAY_MS: u16 = 150;

/// Fastest allowed scroll delay
pub const MIN_SCROLL_DELAY_MS: u16 = 50;

/// Slowest allowed scroll delay
pub const MAX_SCROLL_DELAY_MS: u16 = 500;

/// Line text storage
pub type LineText = Vec<u8, MAX_TEXT_LEN>;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Fallback palette: red, green, blue repeating by line index
    pub const fn rotation(index: usize) -> Self {
        match index % 3 {
            0 => Self::new(255, 0, 0),
            1 => Self::new(0, 255, 0),
            _ => Self::new(0, 0, 255),
        }
    }
}

/// One line of banner text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Line {
    text: LineText,
    pub color: Rgb,
}

impl Line {
    pub fn new(text: &[u8], color: Rgb) -> Self {
        let mut line = Self {
            text: Vec::new(),
            color,
        };
        line.set_text(text);
        line
    }

    /// Raw text bytes
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Replace the text
    ///
    /// Input is cut at the first NUL byte and then at [`MAX_TEXT_LEN`] bytes.
    /// The cut is byte-wise and may split a multi-byte character; the
    /// decoder skips the orphaned bytes.
    pub fn set_text(&mut self, text: &[u8]) {
        let end = text
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(text.len())
            .min(MAX_TEXT_LEN);
        self.text.clear();
        // Cannot fail: `end` is bounded by the capacity
        let _ = self.text.extend_from_slice(&text[..end]);
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Everything the banner shows, as loaded from the settings store
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Target brightness (0 = dark)
    pub brightness: u8,
    scroll_delay_ms: u16,
    lines: [Line; NUM_LINES],
}

impl DisplayConfig {
    /// Scroll delay in milliseconds, always within 50..=500
    pub fn scroll_delay_ms(&self) -> u16 {
        self.scroll_delay_ms
    }

    /// Set the scroll delay, clamped to 50..=500
    pub fn set_scroll_delay_ms(&mut self, delay_ms: u16) {
        self.scroll_delay_ms = delay_ms.clamp(MIN_SCROLL_DELAY_MS, MAX_SCROLL_DELAY_MS);
    }

    pub fn lines(&self) -> &[Line; NUM_LINES] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut [Line; NUM_LINES] {
        &mut self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    /// True if at least one line has text
    pub fn has_text(&self) -> bool {
        self.lines.iter().any(|line| !line.is_empty())
    }

    /// Replace the text of the first lines with the factory set
    ///
    /// Colors and the remaining lines are left alone.
    pub fn seed_default_lines(&mut self) {
        for (line, text) in self.lines.iter_mut().zip(DEFAULT_LINES) {
            line.set_text(text.as_bytes());
        }
    }

    /// Give every line its fallback rotation color
    pub fn apply_color_rotation(&mut self) {
        for (index, line) in self.lines.iter_mut().enumerate() {
            line.color = Rgb::rotation(index);
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            scroll_delay_ms: DEFAULT_SCROLL_DELAY_MS,
            lines: core::array::from_fn(|_| Line::default()),
        }
    }
}

/// Factory text written to an empty store
pub const DEFAULT_LINES: [&str; 5] = [
    "0123456789",
    "АБВГДЕЖЗИЙ",
    "КЛМН ОПРСТУ",
    "ФХЦЧШЩЪЫЬЭ",
    "Ю Я Ё",
];

/// Wi-Fi credentials handed to the network bridge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Credentials {
    ssid: Vec<u8, MAX_SSID_LEN>,
    password: Vec<u8, MAX_PASSWORD_LEN>,
}

impl Credentials {
    /// Build credentials, truncating SSID to 31 and password to 63 bytes
    pub fn new(ssid: &[u8], password: &[u8]) -> Self {
        let ssid_len = ssid.len().min(MAX_SSID_LEN);
        let password_len = password.len().min(MAX_PASSWORD_LEN);

        let mut credentials = Self {
            ssid: Vec::new(),
            password: Vec::new(),
        };
        let _ = credentials.ssid.extend_from_slice(&ssid[..ssid_len]);
        let _ = credentials
            .password
            .extend_from_slice(&password[..password_len]);
        credentials
    }

    pub fn ssid(&self) -> &[u8] {
        &self.ssid
    }

    pub fn password(&self) -> &[u8] {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DisplayConfig::default();
        assert_eq!(config.brightness, 60);
        assert_eq!(config.scroll_delay_ms(), 150);
        assert!(!config.has_text());
    }

    #[test]
    fn test_scroll_delay_is_clamped() {
        let mut config = DisplayConfig::default();
        config.set_scroll_delay_ms(10);
        assert_eq!(config.scroll_delay_ms(), 50);
        config.set_scroll_delay_ms(900);
        assert_eq!(config.scroll_delay_ms(), 500);
        config.set_scroll_delay_ms(275);
        assert_eq!(config.scroll_delay_ms(), 275);
    }

    #[test]
    fn test_line_text_truncates() {
        let long = [b'x'; 80];
        let line = Line::new(&long, Rgb::RED);
        assert_eq!(line.text().len(), MAX_TEXT_LEN);

        let line = Line::new(b"AB\0CD", Rgb::RED);
        assert_eq!(line.text(), b"AB");
    }

    #[test]
    fn test_color_rotation() {
        let mut config = DisplayConfig::default();
        config.apply_color_rotation();
        assert_eq!(config.lines()[0].color, Rgb::new(255, 0, 0));
        assert_eq!(config.lines()[1].color, Rgb::new(0, 255, 0));
        assert_eq!(config.lines()[2].color, Rgb::new(0, 0, 255));
        assert_eq!(config.lines()[9].color, Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_seed_default_lines() {
        let mut config = DisplayConfig::default();
        config.seed_default_lines();
        assert!(config.has_text());
        assert_eq!(config.lines()[0].text(), b"0123456789");
        assert_eq!(config.lines()[4].text(), "Ю Я Ё".as_bytes());
        assert!(config.lines()[5].is_empty());
        assert!(DEFAULT_LINES.iter().all(|text| text.len() <= MAX_TEXT_LEN));
    }

    #[test]
    fn test_credentials_truncate() {
        let credentials = Credentials::new(&[b's'; 40], &[b'p'; 70]);
        assert_eq!(credentials.ssid().len(), MAX_SSID_LEN);
        assert_eq!(credentials.password().len(), MAX_PASSWORD_LEN);
    }
}
