//! Bit packing and unpacking.
//!
//! Bits are stored most-significant-bit first within each byte. The final
//! byte is zero-padded on its low-order end, so a packed buffer of `n` bits
//! occupies exactly `ceil(n / 8)` bytes. The buffer itself carries no bit
//! length; callers that need exact decoding keep [`PackedBits::bit_len`].

use huffpress_core::{Error, Result};

use crate::code::Code;

/// A packed bit buffer and the number of meaningful bits in it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedBits {
    /// Packed bytes, MSB first, last byte zero-padded.
    pub bytes: Vec<u8>,
    /// Number of bits written before padding.
    pub bit_len: usize,
}

impl PackedBits {
    /// Number of padding bits in the final byte (0-7).
    pub fn padding(&self) -> usize {
        self.bytes.len() * 8 - self.bit_len
    }
}

/// MSB-first bit writer.
#[derive(Debug, Default)]
pub struct BitWriter {
    data: Vec<u8>,
    current: u8,
    filled: u8,
    bit_len: usize,
}

impl BitWriter {
    /// Create with capacity for `bits` bits.
    pub fn with_bit_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            ..Self::default()
        }
    }

    /// Append one bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.current |= (bit as u8) << (7 - self.filled);
        self.filled += 1;
        self.bit_len += 1;

        if self.filled == 8 {
            self.data.push(self.current);
            self.current = 0;
            self.filled = 0;
        }
    }

    /// Append every bit of a code, first bit first.
    #[inline]
    pub fn write_code(&mut self, code: &Code) {
        for bit in code.iter() {
            self.write_bit(bit);
        }
    }

    /// Flush the partial byte (zero-padded) and return the buffer.
    pub fn finish(mut self) -> PackedBits {
        if self.filled > 0 {
            self.data.push(self.current);
        }
        PackedBits {
            bytes: self.data,
            bit_len: self.bit_len,
        }
    }
}

/// Pack a bit sequence into bytes.
pub fn pack<I>(bits: I) -> PackedBits
where
    I: IntoIterator<Item = bool>,
{
    let bits = bits.into_iter();
    let mut writer = BitWriter::with_bit_capacity(bits.size_hint().0);
    for bit in bits {
        writer.write_bit(bit);
    }
    writer.finish()
}

/// Expand a byte buffer into its bits, padding included.
///
/// The result always has `bytes.len() * 8` entries.
pub fn unpack(bytes: &[u8]) -> Vec<bool> {
    BitReader::new(bytes).collect()
}

/// MSB-first bit reader over a byte slice.
///
/// Yields `bool` bits in the order [`BitWriter`] wrote them.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> BitReader<'a> {
    /// Read every bit of `data`, including any trailing padding.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            end: data.len() * 8,
        }
    }

    /// Read only the first `bit_len` bits of `data`.
    pub fn with_bit_len(data: &'a [u8], bit_len: usize) -> Result<Self> {
        if bit_len > data.len() * 8 {
            return Err(Error::unexpected_eof(data.len()));
        }
        Ok(Self {
            data,
            pos: 0,
            end: bit_len,
        })
    }

    /// Number of bits left.
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.end {
            return None;
        }
        let byte = self.data[self.pos / 8];
        let bit = (byte >> (7 - self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitReader<'_> {}
