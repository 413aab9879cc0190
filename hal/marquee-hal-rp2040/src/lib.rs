//! RP2040-specific HAL for the banner firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `marquee-hal` and `marquee-core` traits:
//!
//! - Flash-backed EEPROM image (implements `marquee_hal::EepromBacking`)
//! - WS2812 strip writer on a transmit-only SPI bus
//! - Millisecond clock on the embassy time driver

#![no_std]

pub mod clock;
pub mod flash;
pub mod strip;

pub use clock::EmbassyClock;
pub use flash::FlashEeprom;
pub use strip::{new_strip_writer, StripWriter};
