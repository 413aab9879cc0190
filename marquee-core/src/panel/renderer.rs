//! Frame composition
//!
//! A frame is composed from scratch every time: clear, draw each glyph of
//! the active line at its scrolled position, present once. Pixels that land
//! outside the canvas are dropped.

use crate::config::{Line, Rgb};
use crate::text::{glyphs, Glyph, GLYPH_ADVANCE, GLYPH_ROWS};
use crate::traits::{DisplayDriver, DisplayError};

use super::geometry::PanelGeometry;

/// Delay between steps of the startup sweep
pub const SWEEP_STEP_MS: u64 = 80;

/// Draws text lines onto the tile chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameRenderer {
    geometry: PanelGeometry,
}

impl FrameRenderer {
    pub const fn new(geometry: PanelGeometry) -> Self {
        Self { geometry }
    }

    pub const fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    /// Compose and present one frame of `line` scrolled by `offset` columns
    pub fn render<D: DisplayDriver>(
        &self,
        display: &mut D,
        line: &Line,
        offset: i32,
    ) -> Result<(), DisplayError> {
        self.compose(display, line.text(), line.color, offset);
        display.show()
    }

    /// Compose a frame into the driver buffer without presenting it
    ///
    /// The first glyph starts at canvas column `-offset`.
    pub fn compose<D: DisplayDriver>(&self, display: &mut D, text: &[u8], color: Rgb, offset: i32) {
        display.clear();

        let mut x = -offset;
        for glyph in glyphs(text) {
            if x >= self.geometry.canvas_width() {
                break;
            }
            self.draw_glyph(display, glyph, x, color);
            x += GLYPH_ADVANCE;
        }
    }

    fn draw_glyph<D: DisplayDriver>(&self, display: &mut D, glyph: Glyph, x: i32, color: Rgb) {
        let Some(bitmap) = glyph.table.bitmap(glyph.index) else {
            return;
        };

        for (col, bits) in bitmap.iter().enumerate() {
            for row in 0..GLYPH_ROWS {
                if bits & (1 << row) == 0 {
                    continue;
                }
                if let Some(index) = self.geometry.physical_index(x + col as i32, row as i32) {
                    display.set_pixel(index, color);
                }
            }
        }
    }

    /// Row lit by the startup sweep
    pub const fn sweep_row(&self) -> i32 {
        self.geometry.canvas_height() / 2 - 1
    }

    /// One step of the startup sweep: a single white pixel at `column`
    ///
    /// Columns outside the canvas present a blank frame.
    pub fn render_sweep<D: DisplayDriver>(
        &self,
        display: &mut D,
        column: i32,
    ) -> Result<(), DisplayError> {
        display.clear();
        if let Some(index) = self.geometry.physical_index(column, self.sweep_row()) {
            display.set_pixel(index, Rgb::WHITE);
        }
        display.show()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDisplay;

    fn renderer() -> FrameRenderer {
        FrameRenderer::new(PanelGeometry::DEFAULT)
    }

    #[test]
    fn test_render_presents_once() {
        let mut display = MockDisplay::new();
        let line = Line::new(b"AB", Rgb::RED);
        renderer().render(&mut display, &line, 0).unwrap();

        assert_eq!(display.shows, 1);
        assert_eq!(display.clears, 1);
    }

    #[test]
    fn test_glyph_bits_land_on_canvas_rows() {
        let mut display = MockDisplay::new();
        // '!' is [0x00, 0x00, 0x58, 0x00, 0x00]: column 2, rows 3, 4 and 6
        renderer().compose(&mut display, b"!", Rgb::RED, 0);

        let geometry = PanelGeometry::DEFAULT;
        let lit: Vec<usize> = display.lit_indices();
        let expected: Vec<usize> = [3, 4, 6]
            .iter()
            .map(|&row| geometry.physical_index(2, row).unwrap())
            .collect();
        assert_eq!(lit, expected);
        assert!(display.lit_colors().all(|color| color == Rgb::RED));
    }

    #[test]
    fn test_offset_shifts_text_left() {
        let mut at_zero = MockDisplay::new();
        let mut shifted = MockDisplay::new();
        renderer().compose(&mut at_zero, b"!", Rgb::RED, 0);
        renderer().compose(&mut shifted, b"!", Rgb::RED, -10);

        let geometry = PanelGeometry::DEFAULT;
        // Column 2 moved to column 12
        assert!(shifted
            .lit_indices()
            .contains(&geometry.physical_index(12, 3).unwrap()));
        assert_eq!(at_zero.lit_indices().len(), shifted.lit_indices().len());
    }

    #[test]
    fn test_offscreen_text_draws_nothing() {
        let mut display = MockDisplay::new();
        renderer().compose(&mut display, b"HELLO", Rgb::RED, -40);
        assert!(display.lit_indices().is_empty());

        renderer().compose(&mut display, b"HELLO", Rgb::RED, 30);
        assert!(display.lit_indices().is_empty());
    }

    #[test]
    fn test_partially_visible_glyph_is_clipped() {
        let mut display = MockDisplay::new();
        // Glyph columns 3 and 4 of 'H' remain, at canvas columns 0 and 1
        renderer().compose(&mut display, b"H", Rgb::WHITE, 3);
        let lit = display.lit_indices();
        assert!(!lit.is_empty());
        let geometry = PanelGeometry::DEFAULT;
        for x in 2..40 {
            for y in 0..8 {
                let index = geometry.physical_index(x, y).unwrap();
                assert!(!lit.contains(&index));
            }
        }
    }

    #[test]
    fn test_cyrillic_renders() {
        let mut display = MockDisplay::new();
        renderer().compose(&mut display, "Ж".as_bytes(), Rgb::RED, 0);
        assert!(!display.lit_indices().is_empty());
    }

    #[test]
    fn test_sweep_lights_single_pixel() {
        let mut display = MockDisplay::new();
        let renderer = renderer();
        renderer.render_sweep(&mut display, 5).unwrap();

        let geometry = PanelGeometry::DEFAULT;
        assert_eq!(
            display.lit_indices(),
            [geometry.physical_index(5, 3).unwrap()]
        );
        assert_eq!(display.pixel(geometry.physical_index(5, 3).unwrap()), Rgb::WHITE);

        renderer.render_sweep(&mut display, 40).unwrap();
        assert!(display.lit_indices().is_empty());
        assert_eq!(display.shows, 2);
    }
}
