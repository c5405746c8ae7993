// src/common/hal_traits.rs

use super::format::Level;
use core::fmt::Debug;

/// Abstraction for the busy-wait delay used between level changes.
///
/// Note: This could potentially be replaced by directly requiring
/// `embedded_hal::delay::DelayNs`; the `impl-embedded-hal` feature provides
/// `HalLine` for that pairing.
pub trait OokTimer {
    /// Busy-wait for at least the specified number of microseconds.
    ///
    /// A zero argument must return immediately.
    fn delay_us(&mut self, us: u32);
}

/// Abstraction for the single digital output that gates the RF transmitter.
pub trait OokLine {
    /// Associated error type for line failures.
    type Error: Debug;

    /// Claims the line for one transmission.
    ///
    /// Called before any level change of a frame. An error here means the
    /// hardware is absent or claimed elsewhere; the frame is not started.
    fn acquire(&mut self) -> Result<(), Self::Error>;

    /// Drives the line to `level`.
    ///
    /// Must take effect before the next [`OokTimer::delay_us`] begins. An error
    /// here is treated as a fatal fault of the in-flight frame.
    fn set_level(&mut self, level: Level) -> Result<(), Self::Error>;

    /// Gives the line back after a transmission (successful or not).
    fn release(&mut self);
}
