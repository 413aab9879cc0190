//! WS2812 output over SPI
//!
//! The strip's data line is driven from SPI MOSI; `ws2812-spi` encodes each
//! data bit as an SPI bit pattern, so the bus must run between 2 and
//! 3.8 MHz. The clock pin is claimed but not wired to the strip.

use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, ClkPin, Config, MosiPin, Spi};
use embassy_rp::Peri;
use ws2812_spi::Ws2812;

/// Strip writer on SPI0
pub type StripWriter<'d> = Ws2812<Spi<'d, SPI0, Blocking>>;

/// Set up SPI0 for WS2812 output at `frequency` Hz
pub fn new_strip_writer<'d>(
    spi: Peri<'d, SPI0>,
    clk: Peri<'d, impl ClkPin<SPI0> + 'd>,
    mosi: Peri<'d, impl MosiPin<SPI0> + 'd>,
    frequency: u32,
) -> StripWriter<'d> {
    let mut config = Config::default();
    config.frequency = frequency;

    Ws2812::new(Spi::new_blocking_txonly(spi, clk, mosi, config))
}
