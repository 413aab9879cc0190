//! Inter-task communication channels
//!
//! Link frames travel between the UART tasks and the control loop over
//! embassy-sync channels. The control loop never awaits a request; it drains
//! whatever has arrived once per iteration.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use marquee_protocol::Frame;

/// Requests waiting for the control loop
const REQUEST_CHANNEL_SIZE: usize = 4;

/// Replies waiting for the UART
const REPLY_CHANNEL_SIZE: usize = 4;

/// Frames received from the bridge
pub static REQUEST_CHANNEL: Channel<CriticalSectionRawMutex, Frame, REQUEST_CHANNEL_SIZE> =
    Channel::new();

/// Encoded replies for the bridge
pub static REPLY_CHANNEL: Channel<CriticalSectionRawMutex, Frame, REPLY_CHANNEL_SIZE> =
    Channel::new();
