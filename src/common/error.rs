// src/common/error.rs

/// Rejection of a candidate timing configuration.
///
/// The previously stored configuration stays active when this is returned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The raw bit-format value names neither `HighThenLow` (0) nor `LowThenHigh` (1).
    #[error("Invalid bit format: {0}")]
    InvalidFormat(u32),
}

/// Failure to build a [`Frame`](super::frame::Frame) from a byte buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("Bit length {bit_len} exceeds buffer capacity of {capacity} bits")]
    InvalidBitLength { bit_len: usize, capacity: usize },
}

/// Errors returned by a frame transmission.
///
/// `E` is the error type of the underlying line implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TxError<E = ()>
where
    E: core::fmt::Debug,
{
    /// The requested bit length is not representable by the supplied buffer.
    /// No line activity took place.
    #[error("Bit length {bit_len} exceeds buffer capacity of {capacity} bits")]
    InvalidBitLength { bit_len: usize, capacity: usize },

    /// The line could not be acquired. No line activity took place.
    #[error("Line unavailable: {0:?}")]
    LineUnavailable(E),

    /// The line failed while a frame was in flight. Remaining bits and
    /// repetitions were abandoned and the line was forced low (best effort).
    #[error("Line fault during transmission: {0:?}")]
    LineFault(E),

    /// A transmission on this line is already in progress in the current
    /// execution context (re-entrant `send`).
    #[error("Transmitter busy")]
    Busy,
}

impl<E: core::fmt::Debug> From<FrameError> for TxError<E> {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::InvalidBitLength { bit_len, capacity } => {
                TxError::InvalidBitLength { bit_len, capacity }
            }
        }
    }
}
