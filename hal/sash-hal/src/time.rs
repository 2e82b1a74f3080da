//! Monotonic time source

/// Monotonic millisecond clock
///
/// Timestamps are 64-bit so deadlines computed as `now + timeout` never
/// wrap within the lifetime of a device.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin (usually boot)
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
