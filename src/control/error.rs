// src/control/error.rs

use crate::common::error::{ConfigError, TxError};

/// Malformed control-plane input. Nothing reaches the core when this is returned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    /// Wrong number of comma-separated timing fields.
    #[error("Expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// Field `field` (zero-based) is not a valid unsigned number.
    #[error("Unable to parse field {field}")]
    InvalidNumber { field: usize },

    /// The input ended before byte `byte` (zero-based) of the frame.
    #[error("Missing \",\" before byte {byte}")]
    MissingSeparator { byte: usize },

    /// Byte `byte` does not fit in eight bits.
    #[error("Byte {byte} out of range: {value}")]
    ByteOutOfRange { byte: usize, value: u64 },

    /// The declared bit count needs more bytes than a frame may hold.
    #[error("Frame of {bytes} bytes exceeds maximum of {max}")]
    FrameTooLong { bytes: usize, max: usize },

    /// More bytes were supplied than the declared bit count needs.
    #[error("Expected {expected} bytes, found {found}")]
    ByteCountMismatch { expected: usize, found: usize },
}

/// Any failure of a control-plane request against an [`OokDevice`](super::OokDevice).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError<E = ()>
where
    E: core::fmt::Debug,
{
    #[error("Malformed request: {0}")]
    Control(#[from] ControlError),

    #[error("Configuration rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("Transmission failed: {0}")]
    Tx(#[from] TxError<E>),
}
