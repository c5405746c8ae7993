// src/control/parser.rs

use super::error::ControlError;
use crate::common::{config::RawTimingConfig, error::FrameError, frame::Frame};
use arrayvec::ArrayVec;
use core::convert::TryFrom;

/// Number of comma-separated fields in a timings record.
pub const TIMING_FIELDS: usize = 10;

/// Largest frame, in bytes, accepted on the control plane.
pub const MAX_FRAME_BYTES: usize = 256;

/// A parsed frame submission: bit count plus exactly `ceil(bit_len / 8)` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRequest {
    bit_len: usize,
    bytes: ArrayVec<u8, MAX_FRAME_BYTES>,
}

impl FrameRequest {
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Borrows the request as a [`Frame`].
    pub fn frame(&self) -> Result<Frame<'_>, FrameError> {
        Frame::new(&self.bytes, self.bit_len)
    }
}

/// Parses a timings record.
///
/// Format: `start_h,start_l,end_h,end_l,bit0_h,bit0_l,bit1_h,bit1_l,format,count`,
/// all unsigned decimal. Surrounding whitespace (e.g. a trailing newline) is ignored.
/// The bit format is not validated here.
pub fn parse_timings(input: &str) -> Result<RawTimingConfig, ControlError> {
    let input = input.trim();
    let found = input.split(',').count();
    if found != TIMING_FIELDS {
        return Err(ControlError::FieldCount {
            expected: TIMING_FIELDS,
            found,
        });
    }

    let mut values = [0u32; TIMING_FIELDS];
    for (field, (slot, text)) in values.iter_mut().zip(input.split(',')).enumerate() {
        *slot = parse_decimal(text).ok_or(ControlError::InvalidNumber { field })?;
    }

    let [start_high, start_low, end_high, end_low, bit0_high, bit0_low, bit1_high, bit1_low, format, repeat_count] =
        values;
    Ok(RawTimingConfig {
        start_high,
        start_low,
        end_high,
        end_low,
        bit0_high,
        bit0_low,
        bit1_high,
        bit1_low,
        format,
        repeat_count,
    })
}

/// Parses a frame submission.
///
/// Format: `bit_count,byte,byte,...` with exactly `ceil(bit_count / 8)` bytes.
/// Every number may be hexadecimal (`0x` prefix), octal (leading `0`) or decimal.
pub fn parse_frame(input: &str) -> Result<FrameRequest, ControlError> {
    let mut fields = input.trim().split(',');

    let bit_len = fields
        .next()
        .and_then(parse_c_number)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(ControlError::InvalidNumber { field: 0 })?;

    let expected = bit_len.div_ceil(8);
    if expected > MAX_FRAME_BYTES {
        return Err(ControlError::FrameTooLong {
            bytes: expected,
            max: MAX_FRAME_BYTES,
        });
    }

    let mut bytes = ArrayVec::new();
    for byte in 0..expected {
        let text = fields.next().ok_or(ControlError::MissingSeparator { byte })?;
        let value = parse_c_number(text).ok_or(ControlError::InvalidNumber { field: byte + 1 })?;
        let value = u8::try_from(value).map_err(|_| ControlError::ByteOutOfRange { byte, value })?;
        bytes.try_push(value).map_err(|_| ControlError::FrameTooLong {
            bytes: expected,
            max: MAX_FRAME_BYTES,
        })?;
    }

    let extra = fields.count();
    if extra > 0 {
        return Err(ControlError::ByteCountMismatch {
            expected,
            found: expected + extra,
        });
    }

    Ok(FrameRequest { bit_len, bytes })
}

/// Unsigned decimal, digits only.
fn parse_decimal(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Unsigned integer with C-style base prefix: `0x`/`0X` hex, leading `0` octal, else decimal.
fn parse_c_number(text: &str) -> Option<u64> {
    let text = text.trim();
    let (digits, radix) = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        (hex, 16)
    } else if text.len() > 1 && text.starts_with('0') {
        (&text[1..], 8)
    } else {
        (text, 10)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}
