//! Bridge Link Protocol
//!
//! This crate defines the UART protocol between the network bridge (which
//! owns Wi-Fi bootstrap and the HTTP surface) and the panel controller
//! (which owns the display and the settings store).
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ SEQ │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 1B  │ 0–248B      │ 1B       │
//! └───────┴────────┴──────┴─────┴─────────────┴──────────┘
//! ```
//!
//! The bridge sends requests; the panel answers each with exactly one reply
//! carrying the same sequence number.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{
    BridgeRequest, LineReport, NackReason, PanelReply, StatusReport, MAX_ADDRESS_LEN,
};
