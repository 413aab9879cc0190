//! Tile chain geometry and canvas-to-strip addressing
//!
//! Tiles are wired in one linear chain, left to right, and every tile walks
//! its pixels row-major. There is no serpentine correction.
//!
//! ```text
//!   tile 0          tile 1          tile 2
//! ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │ 0  1 .. 7│ -> │64 65 ..71│ -> │128 ..    │
//! │ 8  9 ..15│    │72 ..     │    │          │
//! │  ..      │    │  ..      │    │          │
//! └──────────┘    └──────────┘    └──────────┘
//! ```

/// Shape of the tile chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    tile_width: u16,
    tile_height: u16,
    tile_count: u16,
}

impl PanelGeometry {
    /// Five 8x8 tiles, 40x8 canvas
    pub const DEFAULT: Self = Self::new(8, 8, 5);

    pub const fn new(tile_width: u16, tile_height: u16, tile_count: u16) -> Self {
        Self {
            tile_width,
            tile_height,
            tile_count,
        }
    }

    pub const fn tile_width(&self) -> u16 {
        self.tile_width
    }

    pub const fn tile_height(&self) -> u16 {
        self.tile_height
    }

    pub const fn tile_count(&self) -> u16 {
        self.tile_count
    }

    /// Canvas width in columns (all tiles)
    pub const fn canvas_width(&self) -> i32 {
        self.tile_width as i32 * self.tile_count as i32
    }

    /// Canvas height in rows (one tile)
    pub const fn canvas_height(&self) -> i32 {
        self.tile_height as i32
    }

    /// Pixels per tile
    pub const fn tile_pixels(&self) -> usize {
        self.tile_width as usize * self.tile_height as usize
    }

    /// Pixels in the whole chain
    pub const fn pixel_count(&self) -> usize {
        self.tile_pixels() * self.tile_count as usize
    }

    /// Map canvas `(x, y)` to a physical strip index
    ///
    /// Returns `None` outside the canvas; callers drop those pixels.
    pub fn physical_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.canvas_width() || y >= self.canvas_height() {
            return None;
        }

        let (x, y) = (x as usize, y as usize);
        let width = self.tile_width as usize;
        let tile = x / width;
        let local_x = x % width;

        Some(tile * self.tile_pixels() + y * width + local_x)
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_dimensions() {
        let geometry = PanelGeometry::DEFAULT;
        assert_eq!(geometry.canvas_width(), 40);
        assert_eq!(geometry.canvas_height(), 8);
        assert_eq!(geometry.pixel_count(), 320);
    }

    #[test]
    fn test_row_major_within_tile() {
        let geometry = PanelGeometry::DEFAULT;
        assert_eq!(geometry.physical_index(0, 0), Some(0));
        assert_eq!(geometry.physical_index(7, 0), Some(7));
        assert_eq!(geometry.physical_index(0, 1), Some(8));
        assert_eq!(geometry.physical_index(7, 7), Some(63));
    }

    #[test]
    fn test_next_tile_starts_new_block() {
        let geometry = PanelGeometry::DEFAULT;
        assert_eq!(geometry.physical_index(8, 0), Some(64));
        assert_eq!(geometry.physical_index(9, 3), Some(64 + 3 * 8 + 1));
        assert_eq!(geometry.physical_index(39, 7), Some(319));
    }

    #[test]
    fn test_out_of_bounds_is_dropped() {
        let geometry = PanelGeometry::DEFAULT;
        assert_eq!(geometry.physical_index(-1, 0), None);
        assert_eq!(geometry.physical_index(40, 0), None);
        assert_eq!(geometry.physical_index(0, -1), None);
        assert_eq!(geometry.physical_index(0, 8), None);
    }

    proptest! {
        #[test]
        fn prop_mapping_is_injective_and_in_range(
            tile_size in 1u16..=16,
            tile_count in 1u16..=8,
        ) {
            let geometry = PanelGeometry::new(tile_size, tile_size, tile_count);
            let mut seen = vec![false; geometry.pixel_count()];

            for y in 0..geometry.canvas_height() {
                for x in 0..geometry.canvas_width() {
                    let index = geometry.physical_index(x, y);
                    prop_assert!(index.is_some());
                    let index = index.unwrap();
                    prop_assert!(index < geometry.pixel_count());
                    prop_assert!(!seen[index], "collision at ({}, {})", x, y);
                    seen[index] = true;
                }
            }
            prop_assert!(seen.iter().all(|&hit| hit));
        }
    }
}
