// src/lib.rs

#![cfg_attr(not(test), no_std)] // std only for unit tests

mod fmt;

pub mod common;
pub mod control;
pub mod transmitter;

// Re-export key types for convenience
pub use common::{BitFormat, ConfigError, ConfigStore, Frame, Level, OokLine, OokTimer, TimingConfig, TxError};
pub use control::OokDevice;
pub use transmitter::FrameTransmitter;
