//! 5x8 bitmap font tables
//!
//! Each glyph is five column masks. Bit `r` of a column lights canvas row
//! `r`, counted from row 0 upward; the renderer copies the bit order as-is.

/// Bitmap columns per glyph
pub const GLYPH_COLUMNS: usize = 5;

/// Pixel rows per glyph cell
pub const GLYPH_ROWS: usize = 8;

/// Column masks of one glyph
pub type GlyphBitmap = [u8; GLYPH_COLUMNS];

/// First character code covered by [`LATIN`]
pub const LATIN_FIRST: u8 = 0x20;

/// Last character code covered by [`LATIN`]
pub const LATIN_LAST: u8 = 0x7E;

/// Which of the two tables a glyph index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontTable {
    /// Printable ASCII, indexed by `code - 0x20`
    Latin,
    /// Cyrillic capitals, see [`CYRILLIC`] for the ordering
    Cyrillic,
}

impl FontTable {
    /// The bitmap table backing this font
    pub fn glyphs(self) -> &'static [GlyphBitmap] {
        match self {
            FontTable::Latin => &LATIN,
            FontTable::Cyrillic => &CYRILLIC,
        }
    }

    /// Look up a glyph bitmap
    ///
    /// Returns `None` for indices past the end of the table.
    pub fn bitmap(self, index: u8) -> Option<&'static GlyphBitmap> {
        self.glyphs().get(index as usize)
    }
}

/// Printable ASCII 0x20..=0x7E
pub static LATIN: [GlyphBitmap; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x58, 0x00, 0x00], // !
    [0x00, 0x00, 0x00, 0x00, 0x00], // "
    [0x00, 0x28, 0x7E, 0x28, 0x00], // #
    [0x00, 0x24, 0x5E, 0x52, 0x00], // $
    [0x00, 0x60, 0x50, 0x23, 0x00], // %
    [0x00, 0x36, 0x49, 0x26, 0x00], // &
    [0x00, 0x40, 0x40, 0x00, 0x00], // '
    [0x00, 0x00, 0x3C, 0x40, 0x3C], // (
    [0x00, 0x00, 0x3C, 0x04, 0x3C], // )
    [0x00, 0x14, 0x3E, 0x14, 0x00], // *
    [0x00, 0x08, 0x3E, 0x08, 0x00], // +
    [0x00, 0x00, 0x00, 0x40, 0x40], // ,
    [0x00, 0x00, 0x08, 0x08, 0x00], // -
    [0x00, 0x00, 0x00, 0x00, 0x60], // .
    [0x00, 0x20, 0x10, 0x08, 0x04], // /
    [0x7E, 0x81, 0x81, 0x81, 0x7E], // 0
    [0x00, 0x84, 0x82, 0xFF, 0x80], // 1
    [0xE2, 0x91, 0x91, 0x91, 0x8E], // 2
    [0x42, 0x91, 0x91, 0x91, 0x6E], // 3
    [0x0F, 0x10, 0x10, 0x10, 0xFF], // 4
    [0x4E, 0x91, 0x91, 0x91, 0x61], // 5
    [0x7E, 0x91, 0x91, 0x91, 0x62], // 6
    [0x06, 0x01, 0x01, 0x01, 0xFF], // 7
    [0x76, 0x89, 0x89, 0x89, 0x76], // 8
    [0x46, 0x89, 0x89, 0x89, 0x7E], // 9
    [0x00, 0x00, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];

/// Cyrillic capitals
///
/// Ordered А..Щ, then Э Ю Я, then Ё Ъ Ь. Ы has no glyph.
pub static CYRILLIC: [GlyphBitmap; 32] = [
    [0xFE, 0x21, 0x21, 0x21, 0xFE], // А
    [0xFF, 0x89, 0x89, 0x89, 0x71], // Б
    [0xFF, 0x89, 0x89, 0x89, 0x76], // В
    [0xFF, 0x01, 0x01, 0x01, 0x03], // Г
    [0xC0, 0x3E, 0x21, 0x3F, 0xC0], // Д
    [0xFF, 0x91, 0x91, 0x91, 0x81], // Е
    [0xE3, 0x14, 0xFF, 0x14, 0xE3], // Ж
    [0x42, 0x89, 0x89, 0x89, 0x76], // З
    [0xFF, 0x30, 0x18, 0x06, 0xFF], // И
    [0xFE, 0x60, 0x31, 0x18, 0xFE], // Й
    [0xFF, 0x08, 0x08, 0x14, 0xE3], // К
    [0xFC, 0x02, 0x01, 0x01, 0xFF], // Л
    [0xFF, 0x0E, 0x70, 0x0E, 0xFF], // М
    [0xFF, 0x10, 0x10, 0x10, 0xFF], // Н
    [0x7E, 0x81, 0x81, 0x81, 0x7E], // О
    [0xFF, 0x01, 0x01, 0x01, 0xFF], // П
    [0xFF, 0x11, 0x11, 0x11, 0x0E], // Р
    [0x7E, 0x81, 0x81, 0x81, 0xC3], // С
    [0x03, 0x01, 0xFF, 0x01, 0x03], // Т
    [0x47, 0x88, 0x88, 0x88, 0xFF], // У
    [0x1E, 0x21, 0xFF, 0x21, 0x1E], // Ф
    [0xC7, 0x28, 0x10, 0x28, 0xC7], // Х
    [0x7F, 0x40, 0x40, 0x7F, 0xC0], // Ц
    [0x0F, 0x10, 0x10, 0x10, 0xFF], // Ч
    [0xFF, 0x80, 0xFF, 0x80, 0xFF], // Ш
    [0x7F, 0x40, 0x7F, 0x40, 0xFF], // Щ
    [0x42, 0x91, 0x91, 0x91, 0xFF], // Э
    [0xFF, 0x10, 0x7E, 0x81, 0x7E], // Ю
    [0xFE, 0x93, 0x92, 0x93, 0x82], // Я
    [0xE6, 0x19, 0x09, 0x09, 0xFF], // Ё
    [0x01, 0xFF, 0x88, 0x88, 0x70], // Ъ
    [0xFF, 0x88, 0x88, 0x88, 0x70], // Ь
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_covers_printable_ascii() {
        assert_eq!(LATIN.len(), (LATIN_LAST - LATIN_FIRST + 1) as usize);
        assert_eq!(FontTable::Latin.bitmap(b'A' - LATIN_FIRST), Some(&LATIN[33]));
    }

    #[test]
    fn test_out_of_range_index_has_no_bitmap() {
        assert!(FontTable::Cyrillic.bitmap(31).is_some());
        assert_eq!(FontTable::Cyrillic.bitmap(32), None);
        assert_eq!(FontTable::Latin.bitmap(95), None);
    }
}
