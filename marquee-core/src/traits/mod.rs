//! Hardware abstraction traits
//!
//! These traits define the interface between the banner logic
//! and hardware-specific implementations.

pub mod clock;
pub mod display;

pub use clock::Clock;
pub use display::{DisplayDriver, DisplayError};
