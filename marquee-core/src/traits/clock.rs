//! Monotonic time source
//!
//! The animation runs on elapsed-time comparisons only, so a millisecond
//! counter is all it needs. Firmware backs this with the async runtime's
//! clock; tests drive it by hand.

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
