//! EEPROM emulation

pub mod mirror;

pub use mirror::MirroredEeprom;
