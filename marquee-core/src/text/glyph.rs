//! Byte string to glyph decoding
//!
//! A cursor walks the text one decode step at a time. Each step yields at
//! most one glyph and consumes one or two bytes; bytes that are neither
//! printable ASCII nor part of a known Cyrillic pair are skipped and take no
//! space on the canvas.

use super::font::{FontTable, LATIN_FIRST, LATIN_LAST};

/// Canvas columns taken by every decoded glyph (5 bitmap + 1 spacing)
pub const GLYPH_ADVANCE: i32 = 6;

/// Lead byte of Cyrillic А..Я / Ё
const LEAD_UPPER: u8 = 0xD0;

/// Lead byte of the lowercase forms that share uppercase art
const LEAD_LOWER: u8 = 0xD1;

/// A reference into one of the font tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    pub table: FontTable,
    pub index: u8,
}

impl Glyph {
    pub const fn latin(index: u8) -> Self {
        Self {
            table: FontTable::Latin,
            index,
        }
    }

    pub const fn cyrillic(index: u8) -> Self {
        Self {
            table: FontTable::Cyrillic,
            index,
        }
    }
}

/// Result of one decode step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decoded {
    /// Glyph found at the cursor, if any
    pub glyph: Option<Glyph>,
    /// Bytes consumed by this step (0 only at end of input)
    pub consumed: usize,
}

/// Map a two-byte sequence onto the Cyrillic table
pub fn cyrillic_index(lead: u8, cont: u8) -> Option<u8> {
    match (lead, cont) {
        (LEAD_UPPER, 0x90..=0xA9) => Some(cont - 0x90),
        (LEAD_UPPER, 0xAD..=0xAF) => Some(cont - 0xAD + 26),
        (LEAD_UPPER, 0x81) => Some(29), // Ё
        (LEAD_UPPER, 0xAA) => Some(30), // Ъ
        (LEAD_UPPER, 0xAC) => Some(31), // Ь
        (LEAD_LOWER, 0x91) => Some(29), // ё
        (LEAD_LOWER, 0x8C) => Some(31), // ь
        _ => None,
    }
}

/// Decode the glyph starting at `pos`
pub fn decode_at(text: &[u8], pos: usize) -> Decoded {
    let Some(&byte) = text.get(pos) else {
        return Decoded {
            glyph: None,
            consumed: 0,
        };
    };

    if let Some(&cont) = text.get(pos + 1) {
        if let Some(index) = cyrillic_index(byte, cont) {
            return Decoded {
                glyph: Some(Glyph::cyrillic(index)),
                consumed: 2,
            };
        }
    }

    let glyph = (LATIN_FIRST..=LATIN_LAST)
        .contains(&byte)
        .then(|| Glyph::latin(byte - LATIN_FIRST));

    Decoded { glyph, consumed: 1 }
}

/// Iterator over the glyphs of a byte string
#[derive(Debug, Clone)]
pub struct Glyphs<'a> {
    text: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Glyphs<'a> {
    type Item = Glyph;

    fn next(&mut self) -> Option<Glyph> {
        while self.pos < self.text.len() {
            let step = decode_at(self.text, self.pos);
            self.pos += step.consumed;
            if step.glyph.is_some() {
                return step.glyph;
            }
        }
        None
    }
}

/// Decode `text` left to right, skipping unrecognized bytes
pub fn glyphs(text: &[u8]) -> Glyphs<'_> {
    Glyphs { text, pos: 0 }
}

/// Number of glyphs `text` decodes to
pub fn glyph_count(text: &[u8]) -> usize {
    glyphs(text).count()
}

/// Canvas width of `text` in columns
pub fn text_width(text: &[u8]) -> i32 {
    GLYPH_ADVANCE * glyph_count(text) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ascii_maps_by_offset() {
        let step = decode_at(b"A", 0);
        assert_eq!(step.glyph, Some(Glyph::latin(33)));
        assert_eq!(step.consumed, 1);

        assert_eq!(decode_at(b" ", 0).glyph, Some(Glyph::latin(0)));
        assert_eq!(decode_at(b"~", 0).glyph, Some(Glyph::latin(94)));
    }

    #[test]
    fn test_cyrillic_capital_a() {
        let step = decode_at(&[0xD0, 0x90], 0);
        assert_eq!(step.glyph, Some(Glyph::cyrillic(0)));
        assert_eq!(step.consumed, 2);
    }

    #[test]
    fn test_yo_lowercase_shares_uppercase_glyph() {
        let upper = decode_at(&[0xD0, 0x81], 0);
        let lower = decode_at(&[0xD1, 0x91], 0);
        assert_eq!(upper.glyph, lower.glyph);
        assert_eq!(lower.consumed, 2);
    }

    #[test]
    fn test_special_cased_letters() {
        assert_eq!(cyrillic_index(0xD0, 0xAA), Some(30)); // Ъ
        assert_eq!(cyrillic_index(0xD0, 0xAC), Some(31)); // Ь
        assert_eq!(cyrillic_index(0xD1, 0x8C), Some(31)); // ь
        assert_eq!(cyrillic_index(0xD0, 0xAF), Some(28)); // Я
        assert_eq!(cyrillic_index(0xD0, 0xAB), None); // Ы
    }

    #[test]
    fn test_every_cyrillic_index_fits_table() {
        for lead in [0xD0u8, 0xD1] {
            for cont in 0x80u8..=0xBF {
                if let Some(index) = cyrillic_index(lead, cont) {
                    assert!(FontTable::Cyrillic.bitmap(index).is_some());
                }
            }
        }
    }

    #[test]
    fn test_unrecognized_bytes_are_skipped() {
        // Control byte, lone lead byte at the end, high byte
        let text = [b'A', 0x07, b'B', 0xFF, 0xD0];
        let decoded: Vec<Glyph> = glyphs(&text).collect();
        assert_eq!(decoded, [Glyph::latin(33), Glyph::latin(34)]);
        assert_eq!(text_width(&text), 12);
    }

    #[test]
    fn test_unknown_pair_skips_one_byte_at_a_time() {
        // Ы is not in the table: lead and continuation are skipped separately
        let step = decode_at(&[0xD0, 0xAB], 0);
        assert_eq!(step.glyph, None);
        assert_eq!(step.consumed, 1);
        assert_eq!(glyph_count(&[0xD0, 0xAB, b'!']), 1);
    }

    #[test]
    fn test_mixed_text_width() {
        let text = "AБ 1".as_bytes();
        assert_eq!(glyph_count(text), 4);
        assert_eq!(text_width(text), 24);
    }

    #[test]
    fn test_end_of_input() {
        let step = decode_at(b"", 0);
        assert_eq!(step.consumed, 0);
        assert_eq!(step.glyph, None);
        assert_eq!(text_width(b""), 0);
    }

    proptest! {
        #[test]
        fn prop_width_is_six_per_glyph(text in proptest::collection::vec(any::<u8>(), 0..64)) {
            let count = glyphs(&text).count();
            prop_assert_eq!(text_width(&text), 6 * count as i32);
            prop_assert!(count <= text.len());
        }

        #[test]
        fn prop_printable_ascii_is_one_glyph_per_byte(text in "[ -~]{0,64}") {
            prop_assert_eq!(glyph_count(text.as_bytes()), text.len());
        }
    }
}
