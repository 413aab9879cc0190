//! Canvas geometry and frame composition
//!
//! The canvas is the logical pixel grid spanning every tile of the chain.
//! Rendering happens in canvas coordinates; the geometry maps each canvas
//! pixel onto its position in the physical strip.

pub mod geometry;
pub mod renderer;

pub use geometry::PanelGeometry;
pub use renderer::{FrameRenderer, SWEEP_STEP_MS};
