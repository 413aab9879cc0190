//! Pixel strip driver trait
//!
//! The banner draws into the driver's own frame buffer by physical pixel
//! index and asks it to present the buffer once per frame.

use crate::config::Rgb;

/// Errors that can occur while presenting a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Transfer to the strip failed
    Communication,
}

/// Trait for an addressable RGB pixel strip
///
/// `clear`, `set_pixel` and `set_brightness` only touch driver state;
/// nothing reaches the LEDs until [`DisplayDriver::show`].
pub trait DisplayDriver {
    /// Set every pixel in the frame buffer to black
    fn clear(&mut self);

    /// Set the pixel at physical `index`
    ///
    /// Indices past the end of the strip are ignored.
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Set the global brightness applied when the frame is presented
    fn set_brightness(&mut self, level: u8);

    /// Present the frame buffer on the strip
    fn show(&mut self) -> Result<(), DisplayError>;
}

impl<T: DisplayDriver + ?Sized> DisplayDriver for &mut T {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        (**self).set_pixel(index, color)
    }

    fn set_brightness(&mut self, level: u8) {
        (**self).set_brightness(level)
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        (**self).show()
    }
}
