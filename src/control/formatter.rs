// src/control/formatter.rs

use crate::common::config::TimingConfig;
use arrayvec::ArrayString;
use core::fmt::{self, Write};

/// Capacity of a formatted timings record: ten `u32` values, nine commas
/// and a newline fit in 110 bytes.
pub const TIMINGS_TEXT_LEN: usize = 128;

/// Formats `config` in the same ten-field layout [`parse_timings`](super::parse_timings) reads.
pub fn format_timings(config: &TimingConfig) -> Result<ArrayString<TIMINGS_TEXT_LEN>, fmt::Error> {
    let raw = config.to_raw();
    let mut text = ArrayString::new();
    writeln!(
        text,
        "{},{},{},{},{},{},{},{},{},{}",
        raw.start_high,
        raw.start_low,
        raw.end_high,
        raw.end_low,
        raw.bit0_high,
        raw.bit0_low,
        raw.bit1_high,
        raw.bit1_low,
        raw.format,
        raw.repeat_count
    )?;
    Ok(text)
}
