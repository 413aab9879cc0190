//! Configuration-update surface
//!
//! Updates arrive as `application/x-www-form-urlencoded` query strings
//! relayed by the network bridge. Every parameter is optional; unknown keys
//! are ignored.
//!
//! | Key | Effect |
//! |-----|--------|
//! | `brightness` | Target brightness, clamped to 0..=255 |
//! | `speed` | Scroll delay in ms, clamped to 50..=500 |
//! | `line1`..`line10` | Line text, truncated to 64 bytes |
//! | `r1`..`r10`, `g1`.., `b1`.. | Line color channel, clamped to 0..=255 |

use heapless::Vec;
use percent_encoding::percent_decode;

use super::types::{
    Credentials, DisplayConfig, LineText, MAX_PASSWORD_LEN, MAX_SCROLL_DELAY_MS, MAX_SSID_LEN,
    MIN_SCROLL_DELAY_MS, NUM_LINES,
};

/// Longest key we recognize
const MAX_KEY_LEN: usize = 16;

/// Decoded bytes kept for an integer value
const MAX_NUMBER_LEN: usize = 24;

#[derive(Clone, Copy)]
enum LineField {
    Text,
    Red,
    Green,
    Blue,
}

/// Requested changes to one line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineUpdate {
    pub text: Option<LineText>,
    pub r: Option<i64>,
    pub g: Option<i64>,
    pub b: Option<i64>,
}

impl LineUpdate {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.r.is_none() && self.g.is_none() && self.b.is_none()
    }
}

/// A set of optional display setting changes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsUpdate {
    pub brightness: Option<i64>,
    pub speed: Option<i64>,
    pub lines: [LineUpdate; NUM_LINES],
}

impl SettingsUpdate {
    /// Parse an update from a query string
    pub fn from_query(query: &[u8]) -> Self {
        let mut update = Self::default();

        for (key, value) in pairs(query) {
            let Some(key) = decode::<MAX_KEY_LEN>(key) else {
                continue;
            };

            match key.as_slice() {
                b"brightness" => update.brightness = Some(parse_number(value)),
                b"speed" => update.speed = Some(parse_number(value)),
                key => update.apply_line_key(key, value),
            }
        }

        update
    }

    fn apply_line_key(&mut self, key: &[u8], value: &[u8]) {
        let (field, index) = match key {
            [b'l', b'i', b'n', b'e', index @ ..] => (LineField::Text, index),
            [b'r', index @ ..] => (LineField::Red, index),
            [b'g', index @ ..] => (LineField::Green, index),
            [b'b', index @ ..] => (LineField::Blue, index),
            _ => return,
        };

        let Some(line) = line_number(index).and_then(|n| self.lines.get_mut(n - 1)) else {
            return;
        };

        match field {
            LineField::Text => line.text = Some(decode_truncated(value)),
            LineField::Red => line.r = Some(parse_number(value)),
            LineField::Green => line.g = Some(parse_number(value)),
            LineField::Blue => line.b = Some(parse_number(value)),
        }
    }

    /// True if no recognized parameter was present
    pub fn is_empty(&self) -> bool {
        self.brightness.is_none() && self.speed.is_none() && self.lines.iter().all(LineUpdate::is_empty)
    }

    /// Write the requested changes into `config`, clamping each value
    pub fn apply(&self, config: &mut DisplayConfig) {
        if let Some(brightness) = self.brightness {
            config.brightness = clamp_channel(brightness);
        }

        if let Some(speed) = self.speed {
            let delay = speed.clamp(i64::from(MIN_SCROLL_DELAY_MS), i64::from(MAX_SCROLL_DELAY_MS));
            config.set_scroll_delay_ms(delay as u16);
        }

        for (line, update) in config.lines_mut().iter_mut().zip(&self.lines) {
            if let Some(text) = &update.text {
                line.set_text(text);
            }
            if let Some(r) = update.r {
                line.color.r = clamp_channel(r);
            }
            if let Some(g) = update.g {
                line.color.g = clamp_channel(g);
            }
            if let Some(b) = update.b {
                line.color.b = clamp_channel(b);
            }
        }
    }
}

/// Parse new Wi-Fi credentials from a query string
///
/// Both `ssid` and `pass` must be present. Values are truncated to the
/// stored lengths.
pub fn credentials_from_query(query: &[u8]) -> Option<Credentials> {
    let mut ssid: Option<Vec<u8, MAX_SSID_LEN>> = None;
    let mut password: Option<Vec<u8, MAX_PASSWORD_LEN>> = None;

    for (key, value) in pairs(query) {
        match decode::<MAX_KEY_LEN>(key).as_deref() {
            Some(b"ssid") => ssid = Some(decode_truncated(value)),
            Some(b"pass") => password = Some(decode_truncated(value)),
            _ => {}
        }
    }

    Some(Credentials::new(&ssid?, &password?))
}

fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

/// Split `a=1&b=2` into raw key/value pairs
fn pairs(query: &[u8]) -> impl Iterator<Item = (&[u8], &[u8])> {
    query
        .split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.iter().position(|&b| b == b'=') {
            Some(eq) => (&pair[..eq], &pair[eq + 1..]),
            None => (pair, &[][..]),
        })
}

/// `1`..=`10` with no sign, padding or leading zero
fn line_number(digits: &[u8]) -> Option<usize> {
    match digits {
        [d @ b'1'..=b'9'] => Some(usize::from(d - b'0')),
        b"10" => Some(10),
        _ => None,
    }
}

/// Decoded bytes of a form-encoded component
///
/// `+` is a space and `%XX` a byte; a `%` not followed by two hex digits is
/// kept literally.
fn decoded_bytes(raw: &[u8]) -> impl Iterator<Item = u8> + '_ {
    raw.split(|&b| b == b'+')
        .enumerate()
        .flat_map(|(i, piece)| {
            let space = (i > 0).then_some(b' ');
            space.into_iter().chain(percent_decode(piece))
        })
}

/// Decode, or `None` if the result does not fit
fn decode<const N: usize>(raw: &[u8]) -> Option<Vec<u8, N>> {
    let mut out = Vec::new();
    for b in decoded_bytes(raw) {
        out.push(b).ok()?;
    }
    Some(out)
}

/// Decode, dropping whatever does not fit
fn decode_truncated<const N: usize>(raw: &[u8]) -> Vec<u8, N> {
    decoded_bytes(raw).take(N).collect()
}

fn parse_number(raw: &[u8]) -> i64 {
    parse_int(&decode_truncated::<MAX_NUMBER_LEN>(raw))
}

/// Integer parse with C `atol` rules
///
/// Leading whitespace and one sign are accepted, parsing stops at the first
/// non-digit, and no digits gives 0. Overflow saturates.
pub fn parse_int(text: &[u8]) -> i64 {
    let mut rest = text;
    while let [b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c, tail @ ..] = rest {
        rest = tail;
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    for &b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}
