// src/common/format.rs

use super::error::ConfigError;
use core::convert::TryFrom;

/// Logical level of the output line.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Level {
    Low,
    High,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Level {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Low => defmt::write!(f, "Low"),
            Self::High => defmt::write!(f, "High"),
        }
    }
}

/// Ordering of the two halves of every symbol.
///
/// The same ordering applies to the start marker, the end marker and both
/// data bits. The raw values (`0`, `1`) are the ones used on the control plane.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BitFormat {
    /// Drive high for the high duration, then low for the low duration.
    #[default]
    HighThenLow,
    /// Drive low for the low duration, then high for the high duration.
    LowThenHigh,
}

impl BitFormat {
    /// Raw control-plane value of this format.
    #[inline]
    pub const fn as_raw(self) -> u32 {
        match self {
            BitFormat::HighThenLow => 0,
            BitFormat::LowThenHigh => 1,
        }
    }
}

impl TryFrom<u32> for BitFormat {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BitFormat::HighThenLow),
            1 => Ok(BitFormat::LowThenHigh),
            other => Err(ConfigError::InvalidFormat(other)),
        }
    }
}

impl From<BitFormat> for u32 {
    fn from(format: BitFormat) -> u32 {
        format.as_raw()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BitFormat {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::HighThenLow => defmt::write!(f, "HL"),
            Self::LowThenHigh => defmt::write!(f, "LH"),
        }
    }
}
