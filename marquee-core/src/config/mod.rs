//! Configuration types
//!
//! Display settings, their fixed-offset persistent encoding, and the
//! named-parameter update surface.

pub mod layout;
pub mod store;
pub mod types;
pub mod update;

pub use store::{ConfigError, ConfigStore, Loaded};
pub use types::*;
pub use update::{credentials_from_query, LineUpdate, SettingsUpdate};
