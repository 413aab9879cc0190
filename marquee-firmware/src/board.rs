//! Board constants compiled from panel.toml

use marquee_core::panel::PanelGeometry;

include!(concat!(env!("OUT_DIR"), "/panel_config.rs"));

pub const GEOMETRY: PanelGeometry = PanelGeometry::new(TILE_WIDTH, TILE_HEIGHT, TILE_COUNT);

/// Pixels on the whole chain
pub const PIXEL_COUNT: usize = GEOMETRY.pixel_count();
