//! Message types for the bridge link
//!
//! Message types are divided into two categories:
//! - Bridge → Panel: settings and credential updates, link state, queries
//! - Panel → Bridge: acknowledgements and postcard-encoded reports

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: Bridge → Panel
pub const MSG_SETTINGS: u8 = 0x01;
pub const MSG_CREDENTIALS: u8 = 0x02;
pub const MSG_LINK_STATUS: u8 = 0x03;
pub const MSG_QUERY_STATUS: u8 = 0x04;
pub const MSG_QUERY_LINE: u8 = 0x05;
pub const MSG_PING: u8 = 0x06;

// Message type IDs: Panel → Bridge
pub const MSG_ACK: u8 = 0x20;
pub const MSG_NACK: u8 = 0x21;
pub const MSG_STATUS: u8 = 0x22;
pub const MSG_LINE: u8 = 0x23;
pub const MSG_PONG: u8 = 0x24;
pub const MSG_RESTARTING: u8 = 0x2F;

/// Longest network address string the bridge reports
pub const MAX_ADDRESS_LEN: usize = 39;

/// Longest line text carried in a report
pub const MAX_REPORT_TEXT_LEN: usize = 64;

/// Requests from the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeRequest<'a> {
    /// Form-encoded display settings (`brightness`, `speed`, `line1`, `r1`, ...)
    Settings(&'a [u8]),
    /// Form-encoded Wi-Fi credentials (`ssid`, `pass`)
    Credentials(&'a [u8]),
    /// Bridge connectivity changed
    LinkStatus { connected: bool, address: &'a [u8] },
    /// Ask for a [`StatusReport`]
    QueryStatus,
    /// Ask for a [`LineReport`] of the zero-based line
    QueryLine(u8),
    /// Heartbeat request
    Ping,
}

impl<'a> BridgeRequest<'a> {
    /// Parse a request from a frame
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let payload = frame.payload.as_slice();
        match frame.msg_type {
            MSG_SETTINGS => Ok(BridgeRequest::Settings(payload)),
            MSG_CREDENTIALS => Ok(BridgeRequest::Credentials(payload)),
            MSG_LINK_STATUS => {
                let (&connected, address) =
                    payload.split_first().ok_or(FrameError::InvalidFrame)?;
                if address.len() > MAX_ADDRESS_LEN {
                    return Err(FrameError::InvalidFrame);
                }
                Ok(BridgeRequest::LinkStatus {
                    connected: connected != 0,
                    address,
                })
            }
            MSG_QUERY_STATUS => Ok(BridgeRequest::QueryStatus),
            MSG_QUERY_LINE => match payload {
                [index] => Ok(BridgeRequest::QueryLine(*index)),
                _ => Err(FrameError::InvalidFrame),
            },
            MSG_PING => Ok(BridgeRequest::Ping),
            _ => Err(FrameError::UnknownType),
        }
    }

    /// Encode this request into a frame
    pub fn to_frame(&self, seq: u8) -> Result<Frame, FrameError> {
        match self {
            BridgeRequest::Settings(query) => Frame::new(MSG_SETTINGS, seq, query),
            BridgeRequest::Credentials(query) => Frame::new(MSG_CREDENTIALS, seq, query),
            BridgeRequest::LinkStatus { connected, address } => {
                if address.len() > MAX_ADDRESS_LEN {
                    return Err(FrameError::PayloadTooLarge);
                }
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .push(u8::from(*connected))
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(address)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_LINK_STATUS, seq, &payload)
            }
            BridgeRequest::QueryStatus => Ok(Frame::empty(MSG_QUERY_STATUS, seq)),
            BridgeRequest::QueryLine(index) => Frame::new(MSG_QUERY_LINE, seq, &[*index]),
            BridgeRequest::Ping => Ok(Frame::empty(MSG_PING, seq)),
        }
    }
}

/// Why a request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum NackReason {
    /// Frame failed to parse
    Malformed = 1,
    /// Message type not recognized
    UnknownType = 2,
    /// Request carried nothing to apply
    Empty = 3,
    /// Index outside the line table
    OutOfRange = 4,
    /// Settings store failed to commit
    Storage = 5,
    /// Display failed to present
    Display = 6,
}

impl NackReason {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NackReason::Malformed),
            2 => Some(NackReason::UnknownType),
            3 => Some(NackReason::Empty),
            4 => Some(NackReason::OutOfRange),
            5 => Some(NackReason::Storage),
            6 => Some(NackReason::Display),
            _ => None,
        }
    }
}

/// Snapshot of the panel state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusReport {
    pub brightness: u8,
    pub scroll_delay_ms: u16,
    pub line_index: u8,
    /// Animation phase: 0 scrolling, 1 fade-out, 2 change-line, 3 fade-in
    pub phase: u8,
    /// Brightness currently applied by the fade
    pub level: u8,
    pub credentials_stored: bool,
    pub link_connected: bool,
    pub address: Vec<u8, MAX_ADDRESS_LEN>,
}

/// One configured line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineReport {
    pub index: u8,
    pub rgb: [u8; 3],
    pub text: Vec<u8, MAX_REPORT_TEXT_LEN>,
}

/// Replies from the panel
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelReply {
    Ack,
    Nack(NackReason),
    Status(StatusReport),
    Line(LineReport),
    Pong,
    /// Credentials were stored and the panel is about to reset
    Restarting,
}

impl PanelReply {
    /// Encode this reply into a frame echoing `seq`
    pub fn to_frame(&self, seq: u8) -> Result<Frame, FrameError> {
        let mut buffer = [0u8; MAX_PAYLOAD_SIZE];
        match self {
            PanelReply::Ack => Ok(Frame::empty(MSG_ACK, seq)),
            PanelReply::Nack(reason) => Frame::new(MSG_NACK, seq, &[*reason as u8]),
            PanelReply::Status(report) => {
                let used = postcard::to_slice(report, &mut buffer)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_STATUS, seq, used)
            }
            PanelReply::Line(report) => {
                let used = postcard::to_slice(report, &mut buffer)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_LINE, seq, used)
            }
            PanelReply::Pong => Ok(Frame::empty(MSG_PONG, seq)),
            PanelReply::Restarting => Ok(Frame::empty(MSG_RESTARTING, seq)),
        }
    }

    /// Parse a reply from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let payload = frame.payload.as_slice();
        match frame.msg_type {
            MSG_ACK => Ok(PanelReply::Ack),
            MSG_NACK => match payload {
                [reason] => NackReason::from_u8(*reason)
                    .map(PanelReply::Nack)
                    .ok_or(FrameError::InvalidFrame),
                _ => Err(FrameError::InvalidFrame),
            },
            MSG_STATUS => postcard::from_bytes(payload)
                .map(PanelReply::Status)
                .map_err(|_| FrameError::InvalidFrame),
            MSG_LINE => postcard::from_bytes(payload)
                .map(PanelReply::Line)
                .map_err(|_| FrameError::InvalidFrame),
            MSG_PONG => Ok(PanelReply::Pong),
            MSG_RESTARTING => Ok(PanelReply::Restarting),
            _ => Err(FrameError::UnknownType),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> StatusReport {
        StatusReport {
            brightness: 60,
            scroll_delay_ms: 150,
            line_index: 3,
            phase: 0,
            level: 60,
            credentials_stored: true,
            link_connected: true,
            address: Vec::from_slice(b"192.168.4.1").unwrap(),
        }
    }

    #[test]
    fn test_settings_request() {
        let frame = Frame::new(MSG_SETTINGS, 5, b"speed=200").unwrap();
        let request = BridgeRequest::from_frame(&frame).unwrap();
        assert_eq!(request, BridgeRequest::Settings(b"speed=200"));
    }

    #[test]
    fn test_link_status_request() {
        let frame = BridgeRequest::LinkStatus {
            connected: true,
            address: b"10.0.0.7",
        }
        .to_frame(1)
        .unwrap();
        assert_eq!(frame.payload[0], 1);
        assert_eq!(&frame.payload[1..], b"10.0.0.7");

        assert_eq!(
            BridgeRequest::from_frame(&frame),
            Ok(BridgeRequest::LinkStatus {
                connected: true,
                address: b"10.0.0.7",
            })
        );
    }

    #[test]
    fn test_malformed_requests() {
        assert_eq!(
            BridgeRequest::from_frame(&Frame::empty(MSG_LINK_STATUS, 0)),
            Err(FrameError::InvalidFrame)
        );
        assert_eq!(
            BridgeRequest::from_frame(&Frame::new(MSG_QUERY_LINE, 0, &[1, 2]).unwrap()),
            Err(FrameError::InvalidFrame)
        );
        assert_eq!(
            BridgeRequest::from_frame(&Frame::empty(0x7F, 0)),
            Err(FrameError::UnknownType)
        );
        let long = [b'1'; MAX_ADDRESS_LEN + 2];
        assert_eq!(
            BridgeRequest::from_frame(&Frame::new(MSG_LINK_STATUS, 0, &long).unwrap()),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_reply_echoes_seq() {
        let frame = PanelReply::Nack(NackReason::OutOfRange).to_frame(77).unwrap();
        assert_eq!(frame.seq, 77);
        assert_eq!(frame.msg_type, MSG_NACK);
        assert_eq!(frame.payload.as_slice(), &[4]);
    }

    #[test]
    fn test_status_report_decodes() {
        let reply = PanelReply::Status(status());
        let frame = reply.to_frame(3).unwrap();
        assert_eq!(frame.msg_type, MSG_STATUS);
        assert_eq!(PanelReply::from_frame(&frame), Ok(reply));
    }

    #[test]
    fn test_full_line_report_fits() {
        let reply = PanelReply::Line(LineReport {
            index: 9,
            rgb: [255, 128, 0],
            text: Vec::from_slice(&[0xD0; MAX_REPORT_TEXT_LEN]).unwrap(),
        });
        let frame = reply.to_frame(0).unwrap();
        assert!(frame.payload.len() <= MAX_PAYLOAD_SIZE);
        assert_eq!(PanelReply::from_frame(&frame), Ok(reply));
    }

    #[test]
    fn test_truncated_report_rejected() {
        let mut frame = PanelReply::Status(status()).to_frame(0).unwrap();
        frame.payload.truncate(3);
        assert_eq!(PanelReply::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_unknown_nack_reason() {
        let frame = Frame::new(MSG_NACK, 0, &[0]).unwrap();
        assert_eq!(PanelReply::from_frame(&frame), Err(FrameError::InvalidFrame));
    }
}
