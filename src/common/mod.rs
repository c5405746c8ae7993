// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod config;
pub mod error;
pub mod format;
pub mod frame;
pub mod hal_traits;
pub mod symbol;

#[cfg(any(feature = "impl-embedded-hal", test))]
pub mod hal_adapter;

#[cfg(test)]
pub(crate) mod mock;

// --- Re-export key types/traits/functions for easier access ---

// From config.rs
pub use config::{ConfigStore, RawTimingConfig, TimingConfig};

// From error.rs
pub use error::{ConfigError, FrameError, TxError};

// From format.rs
pub use format::{BitFormat, Level};

// From frame.rs
pub use frame::{Bits, Frame};

// From hal_traits.rs
pub use hal_traits::{OokLine, OokTimer};

// From symbol.rs
pub use symbol::{encode_frame, encode_repetition, Pulse, Symbol, SymbolTiming};

// --- Feature-gated re-exports ---

#[cfg(feature = "impl-embedded-hal")]
pub use hal_adapter::HalLine;
