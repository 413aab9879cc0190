//! Bridge UART transmit task

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use marquee_protocol::MAX_FRAME_SIZE;

use crate::channels::REPLY_CHANNEL;

#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        let frame = REPLY_CHANNEL.receive().await;

        let len = match frame.encode(&mut buf) {
            Ok(len) => len,
            Err(e) => {
                warn!("Failed to encode reply: {:?}", e);
                continue;
            }
        };

        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("Failed to send reply: {:?}", e);
            continue;
        }
        if let Err(e) = tx.flush().await {
            warn!("Failed to flush reply: {:?}", e);
        }
        trace!("Reply type={=u8:#x} seq={} sent", frame.msg_type, frame.seq);
    }
}
