// src/common/config.rs

use super::error::ConfigError;
use super::format::BitFormat;
use super::symbol::{Symbol, SymbolTiming};
use core::cell::Cell;
use core::convert::TryFrom;
use critical_section::{CriticalSection, Mutex};
use crate::fmt::{info, warning};

/// Symbol durations (microseconds), bit format and repetition count for
/// every frame sent until the next update.
///
/// Any duration is legal, zero included: a zero-length half collapses the
/// symbol to a single-level pulse. `repeat_count == 0` means frames are
/// validated but nothing is transmitted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TimingConfig {
    pub start_high: u32,
    pub start_low: u32,
    pub end_high: u32,
    pub end_low: u32,
    pub bit0_high: u32,
    pub bit0_low: u32,
    pub bit1_high: u32,
    pub bit1_low: u32,
    pub format: BitFormat,
    pub repeat_count: u32,
}

impl TimingConfig {
    /// Duration pair of one symbol kind.
    #[inline]
    pub const fn symbol_timing(&self, symbol: Symbol) -> SymbolTiming {
        match symbol {
            Symbol::Start => SymbolTiming::new(self.start_high, self.start_low),
            Symbol::End => SymbolTiming::new(self.end_high, self.end_low),
            Symbol::Zero => SymbolTiming::new(self.bit0_high, self.bit0_low),
            Symbol::One => SymbolTiming::new(self.bit1_high, self.bit1_low),
        }
    }

    /// The unvalidated record this configuration was (or could have been) built from.
    pub const fn to_raw(&self) -> RawTimingConfig {
        RawTimingConfig {
            start_high: self.start_high,
            start_low: self.start_low,
            end_high: self.end_high,
            end_low: self.end_low,
            bit0_high: self.bit0_high,
            bit0_low: self.bit0_low,
            bit1_high: self.bit1_high,
            bit1_low: self.bit1_low,
            format: self.format.as_raw(),
            repeat_count: self.repeat_count,
        }
    }
}

/// The ten configuration fields as delivered by a transport, before validation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct RawTimingConfig {
    pub start_high: u32,
    pub start_low: u32,
    pub end_high: u32,
    pub end_low: u32,
    pub bit0_high: u32,
    pub bit0_low: u32,
    pub bit1_high: u32,
    pub bit1_low: u32,
    pub format: u32,
    pub repeat_count: u32,
}

impl TryFrom<RawTimingConfig> for TimingConfig {
    type Error = ConfigError;

    fn try_from(raw: RawTimingConfig) -> Result<Self, Self::Error> {
        Ok(TimingConfig {
            start_high: raw.start_high,
            start_low: raw.start_low,
            end_high: raw.end_high,
            end_low: raw.end_low,
            bit0_high: raw.bit0_high,
            bit0_low: raw.bit0_low,
            bit1_high: raw.bit1_high,
            bit1_low: raw.bit1_low,
            format: BitFormat::try_from(raw.format)?,
            repeat_count: raw.repeat_count,
        })
    }
}

/// The currently installed [`TimingConfig`].
///
/// Writes replace the whole record and reads copy the whole record, both
/// inside a critical section, so a reader never sees fields from two
/// different updates.
pub struct ConfigStore {
    current: Mutex<Cell<TimingConfig>>,
}

impl core::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("current", &self.read())
            .finish()
    }
}

impl ConfigStore {
    pub const fn new(initial: TimingConfig) -> Self {
        ConfigStore {
            current: Mutex::new(Cell::new(initial)),
        }
    }

    /// Validates `candidate` and, on success, installs it.
    ///
    /// On error the previous configuration remains active.
    pub fn validate_and_store(&self, candidate: RawTimingConfig) -> Result<(), ConfigError> {
        match TimingConfig::try_from(candidate) {
            Ok(config) => {
                self.store(config);
                Ok(())
            }
            Err(e) => {
                warning!("timings rejected: bit format {} is invalid", candidate.format);
                Err(e)
            }
        }
    }

    /// Installs an already validated configuration.
    pub fn store(&self, config: TimingConfig) {
        critical_section::with(|cs| self.current.borrow(cs).set(config));
        info!(
            "timings installed: format {}, repeat {}",
            config.format.as_raw(),
            config.repeat_count
        );
    }

    /// Snapshot of the current configuration.
    pub fn read(&self) -> TimingConfig {
        critical_section::with(|cs| self.snapshot(cs))
    }

    /// Snapshot taken inside a critical section the caller already holds.
    pub fn snapshot(&self, cs: CriticalSection<'_>) -> TimingConfig {
        self.current.borrow(cs).get()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(TimingConfig::default())
    }
}
