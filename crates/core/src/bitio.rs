//! Bit-level cursors for fixed-width fields and variable-length codes.
//!
//! `BitWriter` appends bits to a [`BitString`]; `BitReader` consumes them in
//! the same order. Both operate MSB-first, so a value written with
//! `write_bits(0b101, 3)` is stored as the bits 1, 0, 1.
//!
//! # Padding Rules
//! - BitWriter: the packed form of the finished string pads the last byte
//!   with trailing zeros
//! - BitReader: reads only up to the exact bit length, never into padding
//!
//! # Example
//! ```
//! use huffcode_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//! let bits = writer.finish();
//! assert_eq!(bits.as_bytes(), &[0b10111000]);
//!
//! let mut reader = BitReader::new(&bits);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(2).unwrap(), 0b11);
//! assert!(reader.is_empty());
//! ```

use crate::bits::BitString;
use crate::error::{BitIoError, Result};

/// Appends bits MSB-first to a growing [`BitString`].
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bits: BitString,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self {
            bits: BitString::new(),
        }
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Write the lowest `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        for shift in (0..count).rev() {
            self.bits.push((value >> shift) & 1 == 1);
        }

        Ok(())
    }

    /// Write every bit of a code (or any other bit string).
    pub fn write_code(&mut self, code: &BitString) {
        self.bits.extend_from_bits(code);
    }

    /// Total number of bits written.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Number of bytes the packed output occupies, including padding.
    pub fn byte_len(&self) -> usize {
        self.bits.as_bytes().len()
    }

    /// Finish writing and return the bits. This consumes the writer.
    pub fn finish(self) -> BitString {
        self.bits
    }
}

/// Reads bits MSB-first from a [`BitString`].
///
/// # Invariants
/// - `position` never exceeds `bits.len()`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bits: &'a BitString,
    /// Index of the next bit to read
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new BitReader positioned at the first bit.
    pub fn new(bits: &'a BitString) -> Self {
        Self { bits, position: 0 }
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` if no bits remain.
    pub fn read_bit(&mut self) -> Result<bool> {
        let bit = self.bits.get(self.position).ok_or(BitIoError::UnexpectedEof)?;
        self.position += 1;
        Ok(bit)
    }

    /// Read up to 64 bits as an unsigned value, most significant first.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Read the next `len` bits as a bit string.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` if fewer than `len` bits remain; nothing is
    /// consumed in that case.
    pub fn read_code(&mut self, len: usize) -> Result<BitString> {
        if len > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut code = BitString::with_capacity(len);
        for _ in 0..len {
            code.push(self.read_bit()?);
        }
        Ok(code)
    }

    /// Number of unread bits.
    pub fn bits_remaining(&self) -> usize {
        self.bits.len() - self.position
    }

    /// Index of the next bit to read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// True once every bit has been read.
    pub fn is_empty(&self) -> bool {
        self.position >= self.bits.len()
    }
}
