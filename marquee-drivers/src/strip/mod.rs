//! Addressable LED strip drivers

pub mod ws2812;

pub use ws2812::LedStrip;
