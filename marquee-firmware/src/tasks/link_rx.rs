//! Bridge UART receive task
//!
//! Reassembles frames from the bridge and queues them for the control loop.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use marquee_protocol::FrameParser;

use crate::channels::REQUEST_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };
        trace!("RX: {} bytes", n);

        for &byte in &buf[..n] {
            match parser.feed(byte) {
                Ok(Some(frame)) => {
                    debug!("Frame type={=u8:#x} seq={}", frame.msg_type, frame.seq);
                    if REQUEST_CHANNEL.try_send(frame).is_err() {
                        warn!("Request channel full, dropping frame");
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("Frame parse error: {:?}", e),
            }
        }
    }
}
