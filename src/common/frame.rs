// src/common/frame.rs

use super::error::FrameError;
use super::symbol::Symbol;

/// A borrowed bit sequence: `bit_len` bits read most-significant-bit first
/// out of `bytes`.
///
/// The bit length is explicit because the last byte may be only partly used.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Frame<'a> {
    bytes: &'a [u8],
    bit_len: usize,
}

impl<'a> Frame<'a> {
    /// Creates a frame, checking that `bit_len` bits fit in `bytes`.
    pub fn new(bytes: &'a [u8], bit_len: usize) -> Result<Self, FrameError> {
        let capacity = bytes.len().saturating_mul(8);
        if bit_len > capacity {
            return Err(FrameError::InvalidBitLength { bit_len, capacity });
        }
        Ok(Frame { bytes, bit_len })
    }

    #[inline]
    pub const fn bit_len(&self) -> usize {
        self.bit_len
    }

    #[inline]
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Number of bytes actually carrying frame bits (`ceil(bit_len / 8)`).
    #[inline]
    pub const fn byte_count(&self) -> usize {
        self.bit_len.div_ceil(8)
    }

    /// Bit `index`, i.e. bit `7 - index % 8` of byte `index / 8`.
    ///
    /// Returns `None` past the end of the frame.
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.bit_len {
            return None;
        }
        let byte = self.bytes[index / 8];
        Some(byte & (0x80 >> (index % 8)) != 0)
    }

    /// All bits of the frame in transmission order.
    pub fn bits(&self) -> Bits<'a> {
        Bits { frame: *self, next: 0 }
    }

    /// Symbols of one repetition: start marker, one symbol per bit, end marker.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + 'a {
        core::iter::once(Symbol::Start)
            .chain(self.bits().map(Symbol::from_bit))
            .chain(core::iter::once(Symbol::End))
    }
}

/// Iterator over the bits of a [`Frame`].
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    frame: Frame<'a>,
    next: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bit = self.frame.bit(self.next)?;
        self.next += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frame.bit_len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}
