//! Marquee - Tiled LED Banner Firmware
//!
//! Scrolls configurable text lines across a chain of WS2812 matrix tiles.
//! Settings arrive from a Wi-Fi bridge over UART and persist in flash.
//!
//! The animation runs in a single cooperative loop: drain bridge requests,
//! evaluate one animation tick, pause for the tick's suggested delay.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use marquee_core::panel::SWEEP_STEP_MS;
use marquee_core::Banner;
use marquee_drivers::{LedStrip, MirroredEeprom};
use marquee_hal::EEPROM_SIZE;
use marquee_hal_rp2040::{new_strip_writer, EmbassyClock, FlashEeprom};

use crate::board::{GEOMETRY, LINK_BAUD_RATE, PIXEL_COUNT, STRIP_SPI_FREQUENCY_HZ};
use crate::channels::{REPLY_CHANNEL, REQUEST_CHANNEL};
use crate::link::{handle_frame, Action, LinkState};

mod board;
mod channels;
mod link;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Delay between replying `Restarting` and resetting
const RESTART_DELAY_MS: u64 = 1_000;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Marquee firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Settings image: flash partition mirrored in RAM
    let mut eeprom: MirroredEeprom<_, EEPROM_SIZE> =
        MirroredEeprom::blank(FlashEeprom::new(p.FLASH, p.DMA_CH0));
    match eeprom.reload() {
        Ok(true) => info!("Settings image loaded"),
        Ok(false) => info!("No settings image in flash"),
        Err(e) if eeprom.is_synced() => warn!("Settings image unusable, starting blank: {:?}", e),
        Err(e) => error!("Failed to read settings image, saving disabled until reboot: {:?}", e),
    }

    // LED strip on SPI0 (CLK=GPIO18, MOSI=GPIO19)
    let writer = new_strip_writer(p.SPI0, p.PIN_18, p.PIN_19, STRIP_SPI_FREQUENCY_HZ);
    let strip: LedStrip<_, PIXEL_COUNT> = LedStrip::new(writer);

    let mut banner = Banner::start(strip, eeprom, EmbassyClock, GEOMETRY);

    let report = banner.boot_report();
    match (report.seeded_defaults, report.seed_error) {
        (true, None) => warn!("Settings store was empty, default lines written"),
        (true, Some(e)) => error!("Default lines not persisted: {:?}", e),
        (false, _) => {}
    }
    if report.regenerated_colors {
        info!("Primary color unset, using color rotation");
    }
    info!(
        "Settings loaded: brightness={} delay={}ms",
        banner.config().brightness,
        banner.config().scroll_delay_ms()
    );

    // Startup sweep along the middle row
    for column in 0..GEOMETRY.canvas_width() {
        if let Err(e) = banner.sweep(column) {
            warn!("Sweep frame failed: {:?}", e);
        }
        Timer::after_millis(SWEEP_STEP_MS).await;
    }
    if let Err(e) = banner.blank() {
        warn!("Failed to clear after sweep: {:?}", e);
    }

    // Bridge link on UART0 (TX=GPIO0, RX=GPIO1)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = LINK_BAUD_RATE;

    let tx_buf = TX_BUF.init([0u8; 512]);
    let rx_buf = RX_BUF.init([0u8; 512]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    info!("Link tasks spawned");

    let mut link = LinkState::default();

    loop {
        while let Ok(frame) = REQUEST_CHANNEL.try_receive() {
            let (reply, action) = handle_frame(&mut banner, &mut link, &frame);

            match reply.to_frame(frame.seq) {
                Ok(reply) => REPLY_CHANNEL.send(reply).await,
                Err(e) => error!("Failed to encode reply: {:?}", e),
            }

            if action == Action::Restart {
                Timer::after_millis(RESTART_DELAY_MS).await;
                cortex_m::peripheral::SCB::sys_reset();
            }
        }

        let delay_ms = match banner.poll() {
            Ok(tick) => {
                if tick.transitioned() {
                    debug!("Phase {:?} -> {:?}", tick.phase, tick.next);
                }
                tick.delay_ms
            }
            Err(e) => {
                warn!("Animation tick failed: {:?}", e);
                marquee_core::state::LOOP_DELAY_MS
            }
        };

        Timer::after_millis(u64::from(delay_ms)).await;
    }
}
