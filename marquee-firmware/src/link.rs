//! Bridge request handling
//!
//! Runs inside the control loop, so every request completes (including any
//! settings save) before the next animation tick.

use defmt::*;
use heapless::Vec;

use marquee_core::config::{credentials_from_query, SettingsUpdate};
use marquee_core::state::Phase;
use marquee_core::traits::{Clock, DisplayDriver};
use marquee_core::{Banner, BannerError};
use marquee_hal::ByteStore;
use marquee_protocol::{
    BridgeRequest, Frame, FrameError, LineReport, NackReason, PanelReply, StatusReport,
    MAX_ADDRESS_LEN,
};

/// What the bridge last told us about the network
#[derive(Debug, Default)]
pub struct LinkState {
    pub connected: bool,
    pub address: Vec<u8, MAX_ADDRESS_LEN>,
}

/// Follow-up the control loop must perform after replying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Action {
    None,
    /// Reset the MCU so the bridge bootstraps the new network
    Restart,
}

/// Handle one frame from the bridge
pub fn handle_frame<D, S, C>(
    banner: &mut Banner<D, S, C>,
    link: &mut LinkState,
    frame: &Frame,
) -> (PanelReply, Action)
where
    D: DisplayDriver,
    S: ByteStore,
    C: Clock,
{
    match BridgeRequest::from_frame(frame) {
        Ok(request) => handle_request(banner, link, request),
        Err(e) => {
            warn!("Rejecting frame type={=u8:#x}: {:?}", frame.msg_type, e);
            let reason = match e {
                FrameError::UnknownType => NackReason::UnknownType,
                _ => NackReason::Malformed,
            };
            (PanelReply::Nack(reason), Action::None)
        }
    }
}

fn handle_request<D, S, C>(
    banner: &mut Banner<D, S, C>,
    link: &mut LinkState,
    request: BridgeRequest<'_>,
) -> (PanelReply, Action)
where
    D: DisplayDriver,
    S: ByteStore,
    C: Clock,
{
    match request {
        BridgeRequest::Settings(query) => {
            let update = SettingsUpdate::from_query(query);
            if update.is_empty() {
                return (PanelReply::Nack(NackReason::Empty), Action::None);
            }
            match banner.apply_settings(&update) {
                Ok(()) => {
                    info!(
                        "Settings applied: brightness={} delay={}ms",
                        banner.config().brightness,
                        banner.config().scroll_delay_ms()
                    );
                    (PanelReply::Ack, Action::None)
                }
                Err(e) => {
                    error!("Failed to save settings: {:?}", e);
                    (PanelReply::Nack(nack_for(e)), Action::None)
                }
            }
        }
        BridgeRequest::Credentials(query) => {
            let Some(credentials) = credentials_from_query(query) else {
                return (PanelReply::Nack(NackReason::Empty), Action::None);
            };
            match banner.save_credentials(&credentials) {
                Ok(()) => {
                    info!("Credentials saved for {=[u8]:a}, restarting", credentials.ssid());
                    (PanelReply::Restarting, Action::Restart)
                }
                Err(e) => {
                    error!("Failed to save credentials: {:?}", e);
                    (PanelReply::Nack(nack_for(e)), Action::None)
                }
            }
        }
        BridgeRequest::LinkStatus { connected, address } => {
            link.connected = connected;
            link.address.clear();
            // Length is bounded by the frame decoder
            let _ = link.address.extend_from_slice(address);
            info!("Bridge link: connected={} address={=[u8]:a}", connected, address);
            (PanelReply::Ack, Action::None)
        }
        BridgeRequest::QueryStatus => (PanelReply::Status(status_report(banner, link)), Action::None),
        BridgeRequest::QueryLine(index) => match banner.config().line(usize::from(index)) {
            Some(line) => {
                let mut text = Vec::new();
                let _ = text.extend_from_slice(line.text());
                let report = LineReport {
                    index,
                    rgb: [line.color.r, line.color.g, line.color.b],
                    text,
                };
                (PanelReply::Line(report), Action::None)
            }
            None => (PanelReply::Nack(NackReason::OutOfRange), Action::None),
        },
        BridgeRequest::Ping => (PanelReply::Pong, Action::None),
    }
}

fn status_report<D, S, C>(banner: &Banner<D, S, C>, link: &LinkState) -> StatusReport
where
    D: DisplayDriver,
    S: ByteStore,
    C: Clock,
{
    let config = banner.config();
    let animation = banner.animation();

    StatusReport {
        brightness: config.brightness,
        scroll_delay_ms: config.scroll_delay_ms(),
        line_index: animation.line_index() as u8,
        phase: match animation.phase() {
            Phase::Scrolling => 0,
            Phase::FadeOut => 1,
            Phase::ChangeLine => 2,
            Phase::FadeIn => 3,
        },
        level: animation.level(),
        credentials_stored: banner.credentials().is_some(),
        link_connected: link.connected,
        address: link.address.clone(),
    }
}

fn nack_for(e: BannerError) -> NackReason {
    match e {
        BannerError::Config(_) => NackReason::Storage,
        BannerError::Display(_) => NackReason::Display,
    }
}
