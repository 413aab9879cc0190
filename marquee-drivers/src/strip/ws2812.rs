//! WS2812 strip output
//!
//! Keeps a full frame buffer and a global brightness. The buffer is scaled
//! by the brightness on the way out, so dimming never loses the composed
//! colors.

use marquee_core::config::Rgb;
use marquee_core::traits::{DisplayDriver, DisplayError};
use smart_leds::{brightness, SmartLedsWrite, RGB8};

/// Frame-buffered LED strip over any `smart-leds` writer
pub struct LedStrip<W, const N: usize> {
    writer: W,
    pixels: [RGB8; N],
    brightness: u8,
}

impl<W, const N: usize> LedStrip<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    /// Create a strip with a black frame at full brightness
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pixels: [RGB8::default(); N],
            brightness: u8::MAX,
        }
    }

    /// Unscaled frame buffer
    pub fn pixels(&self) -> &[RGB8; N] {
        &self.pixels
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W, const N: usize> DisplayDriver for LedStrip<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn clear(&mut self) {
        self.pixels.fill(RGB8::default());
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = RGB8::new(color.r, color.g, color.b);
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        self.writer
            .write(brightness(self.pixels.iter().copied(), self.brightness))
            .map_err(|_| DisplayError::Communication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer that records the last frame
    #[derive(Default)]
    struct MockWriter {
        frames: Vec<Vec<RGB8>>,
        fail: bool,
    }

    impl SmartLedsWrite for MockWriter {
        type Error = ();
        type Color = RGB8;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            if self.fail {
                return Err(());
            }
            self.frames.push(iterator.into_iter().map(Into::into).collect());
            Ok(())
        }
    }

    #[test]
    fn test_set_pixel_and_show() {
        let mut strip: LedStrip<_, 4> = LedStrip::new(MockWriter::default());
        strip.set_pixel(2, Rgb::new(10, 20, 30));
        strip.set_pixel(9, Rgb::WHITE);
        strip.show().unwrap();

        let frame = &strip.writer().frames[0];
        assert_eq!(frame.len(), 4);
        assert_eq!(frame[2], RGB8::new(10, 20, 30));
        assert_eq!(frame[0], RGB8::default());
    }

    #[test]
    fn test_brightness_scales_output_only() {
        let mut strip: LedStrip<_, 2> = LedStrip::new(MockWriter::default());
        strip.set_pixel(0, Rgb::WHITE);

        strip.set_brightness(0);
        strip.show().unwrap();
        assert_eq!(strip.writer().frames[0][0], RGB8::default());

        strip.set_brightness(128);
        strip.show().unwrap();
        assert_eq!(strip.writer().frames[1][0], RGB8::new(128, 128, 128));

        // Buffer keeps the composed color
        assert_eq!(strip.pixels()[0], RGB8::new(255, 255, 255));
    }

    #[test]
    fn test_clear() {
        let mut strip: LedStrip<_, 2> = LedStrip::new(MockWriter::default());
        strip.set_pixel(1, Rgb::RED);
        strip.clear();
        assert!(strip.pixels().iter().all(|p| *p == RGB8::default()));
    }

    #[test]
    fn test_write_failure() {
        let mut strip: LedStrip<_, 2> = LedStrip::new(MockWriter {
            fail: true,
            ..Default::default()
        });
        assert_eq!(strip.show(), Err(DisplayError::Communication));
    }
}
