//! Byte offsets of the persistent settings image
//!
//! These addresses are shared with stores written by earlier firmware and
//! must not move.

use super::types::{MAX_PASSWORD_LEN, MAX_SSID_LEN, MAX_TEXT_LEN, NUM_LINES};

/// Wi-Fi configured flag
pub const WIFI_FLAG_ADDR: usize = 0;

/// Value of the flag byte when credentials are valid
pub const WIFI_CONFIGURED: u8 = 1;

/// SSID length byte, followed by up to 31 bytes
pub const WIFI_SSID_ADDR: usize = 1;

/// Password length byte, followed by up to 63 bytes
pub const WIFI_PASS_ADDR: usize = WIFI_SSID_ADDR + 1 + MAX_SSID_LEN;

/// Start of the settings block: primary RGB
pub const SETTINGS_ADDR: usize = WIFI_PASS_ADDR + 1 + MAX_PASSWORD_LEN;

/// Global brightness
pub const BRIGHTNESS_ADDR: usize = SETTINGS_ADDR + 3;

/// Packed line records: length byte then text, back to back
pub const LINES_ADDR: usize = BRIGHTNESS_ADDR + 1;

/// One RGB triple per line
pub const COLOR_ADDR: usize = LINES_ADDR + NUM_LINES * (1 + MAX_TEXT_LEN);

/// Scroll delay, low byte
pub const SPEED_ADDR: usize = COLOR_ADDR + NUM_LINES * 3;

/// Scroll delay, high byte (0xFF means only the low byte was ever written)
pub const SPEED_HIGH_ADDR: usize = SPEED_ADDR + 1;

/// High byte value marking a single-byte scroll delay
pub const LEGACY_SPEED_MARKER: u8 = 0xFF;

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_hal::EEPROM_SIZE;

    #[test]
    fn test_fixed_offsets() {
        assert_eq!(WIFI_PASS_ADDR, 33);
        assert_eq!(SETTINGS_ADDR, 97);
        assert_eq!(BRIGHTNESS_ADDR, 100);
        assert_eq!(LINES_ADDR, 101);
        assert_eq!(COLOR_ADDR, 751);
        assert_eq!(SPEED_ADDR, 781);
        assert!(SPEED_HIGH_ADDR < EEPROM_SIZE);
    }
}
