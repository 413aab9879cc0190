//! Driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in marquee-core and marquee-hal:
//!
//! - LED strip output over any `smart-leds` writer
//! - RAM-mirrored EEPROM emulation over a durable backing

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod eeprom;
pub mod strip;

pub use eeprom::MirroredEeprom;
pub use strip::LedStrip;
