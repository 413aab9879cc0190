//! Text decoding and font data
//!
//! Line text is kept as raw bytes. Decoding never goes through a host string
//! type: printable ASCII maps straight into the Latin table and a fixed set
//! of two-byte UTF-8 sequences maps into the Cyrillic table.

pub mod font;
pub mod glyph;

pub use font::{FontTable, GlyphBitmap, GLYPH_COLUMNS, GLYPH_ROWS};
pub use glyph::{decode_at, glyph_count, glyphs, text_width, Decoded, Glyph, Glyphs, GLYPH_ADVANCE};
