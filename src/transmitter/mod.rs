// src/transmitter/mod.rs

pub mod sync_transmitter;

pub use sync_transmitter::FrameTransmitter;
