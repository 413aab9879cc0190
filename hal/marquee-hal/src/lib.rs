//! Marquee Hardware Abstraction Layer
//!
//! This crate defines the storage abstraction shared by the banner core and
//! the chip-specific HALs. The banner keeps its settings in a small
//! byte-addressable store laid out like a classic EEPROM; where that store
//! actually lives (RAM image mirrored to flash, real EEPROM, a test buffer)
//! is up to the implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  marquee-core (ConfigStore layout)      │
//! └─────────────────────────────────────────┘
//!                     │  ByteStore
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  marquee-drivers (MirroredEeprom)       │
//! └─────────────────────────────────────────┘
//!                     │  EepromBacking
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  marquee-hal-rp2040 (flash partition)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`eeprom::ByteStore`] - Byte-addressable persistent store
//! - [`eeprom::EepromBacking`] - Durable medium behind a mirrored image

#![no_std]
#![deny(unsafe_code)]

pub mod eeprom;

// Re-export key traits at crate root for convenience
pub use eeprom::{ByteStore, EepromBacking, StorageKey, StoreError, EEPROM_SIZE};
