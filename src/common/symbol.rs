// src/common/symbol.rs

//! Symbol-to-pulse encoding.
//!
//! Every symbol (start marker, end marker, bit 0, bit 1) is two timed
//! half-pulses. One rule, parameterised by the symbol's duration pair and
//! the configured [`BitFormat`], produces all of them.

use super::config::TimingConfig;
use super::format::{BitFormat, Level};
use super::frame::Frame;

/// The four symbol kinds of a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Symbol {
    Start,
    End,
    Zero,
    One,
}

impl Symbol {
    #[inline]
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Symbol::One
        } else {
            Symbol::Zero
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Symbol {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Start => defmt::write!(f, "START"),
            Self::End => defmt::write!(f, "END"),
            Self::Zero => defmt::write!(f, "0"),
            Self::One => defmt::write!(f, "1"),
        }
    }
}

/// One level held for a duration.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Pulse {
    pub level: Level,
    pub duration_us: u32,
}

impl Pulse {
    #[inline]
    pub const fn high(duration_us: u32) -> Self {
        Pulse { level: Level::High, duration_us }
    }

    #[inline]
    pub const fn low(duration_us: u32) -> Self {
        Pulse { level: Level::Low, duration_us }
    }

    /// The zero-length low pulse that parks the line after each repetition.
    pub const IDLE: Pulse = Pulse::low(0);
}

/// High and low durations (microseconds) of one symbol kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SymbolTiming {
    pub high_us: u32,
    pub low_us: u32,
}

impl SymbolTiming {
    #[inline]
    pub const fn new(high_us: u32, low_us: u32) -> Self {
        SymbolTiming { high_us, low_us }
    }

    /// The two half-pulses of this symbol in the order `format` dictates.
    #[inline]
    pub const fn pulses(&self, format: BitFormat) -> [Pulse; 2] {
        match format {
            BitFormat::HighThenLow => [Pulse::high(self.high_us), Pulse::low(self.low_us)],
            BitFormat::LowThenHigh => [Pulse::low(self.low_us), Pulse::high(self.high_us)],
        }
    }
}

/// Pulses of a single repetition: the symbols of `frame` followed by the
/// forced idle pulse.
pub fn encode_repetition<'a>(
    config: &'a TimingConfig,
    frame: &Frame<'a>,
) -> impl Iterator<Item = Pulse> + 'a {
    frame
        .symbols()
        .flat_map(move |symbol| config.symbol_timing(symbol).pulses(config.format))
        .chain(core::iter::once(Pulse::IDLE))
}

/// The complete pulse sequence of one transmission: `config.repeat_count`
/// back-to-back repetitions of `frame`.
pub fn encode_frame<'a>(
    config: &'a TimingConfig,
    frame: &Frame<'a>,
) -> impl Iterator<Item = Pulse> + 'a {
    let frame = *frame;
    (0..config.repeat_count).flat_map(move |_| encode_repetition(config, &frame))
}
