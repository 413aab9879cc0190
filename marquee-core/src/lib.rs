//! Board-agnostic core logic for the banner firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Text decoding and the two 5x8 font tables
//! - Mapping canvas coordinates onto the tile-chained pixel strip
//! - Frame composition
//! - The scroll/fade animation state machine
//! - The fixed-layout settings store and the settings update surface
//! - Display and clock abstraction traits

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod banner;
pub mod config;
pub mod panel;
pub mod state;
pub mod text;
pub mod traits;

#[cfg(test)]
mod testing;

pub use banner::{Banner, BannerError, BootReport};
