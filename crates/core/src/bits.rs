//! Packed bit strings.
//!
//! `BitString` is the representation for both individual Huffman codes and
//! whole encoded bitstreams. Bits are packed MSB-first: bit 0 is the most
//! significant bit of byte 0.
//!
//! # Invariants
//! - `bytes.len() == len.div_ceil(8)`
//! - padding bits after `len` in the last byte are always zero, so two bit
//!   strings with the same bits compare and hash equal
//!
//! With zero padding, the derived ordering on `(bytes, len)` is plain
//! lexicographic order on the bits, where a prefix sorts before its
//! extensions.

use std::fmt;
use std::str::FromStr;

use crate::error::{BitIoError, Error, Result};

/// An ordered, growable sequence of bits with an explicit length.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    bytes: Vec<u8>,
    len: usize,
}

impl BitString {
    /// Create an empty bit string.
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            len: 0,
        }
    }

    /// Create an empty bit string with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Rebuild a bit string from packed bytes and an exact bit length.
    ///
    /// Bytes beyond `len` and padding bits in the last used byte are ignored.
    ///
    /// # Errors
    /// Returns `BitIoError::InsufficientBits` if `bytes` holds fewer than
    /// `len` bits.
    pub fn from_packed(bytes: &[u8], len: usize) -> Result<Self> {
        let available = bytes.len() * 8;
        if len > available {
            return Err(BitIoError::InsufficientBits {
                requested: len,
                available,
            }
            .into());
        }

        let mut packed = bytes[..len.div_ceil(8)].to_vec();
        let tail = len % 8;
        if tail != 0 {
            if let Some(last) = packed.last_mut() {
                *last &= 0xFFu8 << (8 - tail);
            }
        }

        Ok(Self { bytes: packed, len })
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if there are no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.len += 1;
    }

    /// Remove and return the last bit.
    pub fn pop(&mut self) -> Option<bool> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        let offset = self.len % 8;
        let mask = 0x80u8 >> offset;
        let last = self.bytes.last_mut()?;
        let bit = *last & mask != 0;
        *last &= !mask;
        if offset == 0 {
            self.bytes.pop();
        }
        Some(bit)
    }

    /// Get the bit at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Remove all bits, keeping the allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.len = 0;
    }

    /// Append every bit of `other`.
    pub fn extend_from_bits(&mut self, other: &BitString) {
        if self.len % 8 == 0 {
            // Byte aligned: padding of `other` is zero, so a plain copy works.
            self.bytes.extend_from_slice(&other.bytes);
            self.len += other.len;
            return;
        }
        for bit in other.iter() {
            self.push(bit);
        }
    }

    /// True if `prefix` is a prefix of this bit string (or equal to it).
    pub fn starts_with(&self, prefix: &BitString) -> bool {
        if prefix.len > self.len {
            return false;
        }

        let full_bytes = prefix.len / 8;
        if self.bytes[..full_bytes] != prefix.bytes[..full_bytes] {
            return false;
        }

        let tail = prefix.len % 8;
        if tail == 0 {
            return true;
        }
        let mask = 0xFFu8 << (8 - tail);
        self.bytes[full_bytes] & mask == prefix.bytes[full_bytes]
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> Bits<'_> {
        Bits {
            bits: self,
            front: 0,
            back: self.len,
        }
    }

    /// Packed bytes, MSB-first, with the final partial byte zero-padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the bit string and return its packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString(\"{}\")", self)
    }
}

impl FromStr for BitString {
    type Err = Error;

    /// Parse a string of `'0'` and `'1'` characters.
    fn from_str(s: &str) -> Result<Self> {
        let mut bits = BitString::with_capacity(s.len());
        for (position, found) in s.chars().enumerate() {
            match found {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return Err(BitIoError::InvalidBitChar { position, found }.into()),
            }
        }
        Ok(bits)
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = BitString::new();
        bits.extend(iter);
        bits
    }
}

impl Extend<bool> for BitString {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

impl<'a> IntoIterator for &'a BitString {
    type Item = bool;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the bits of a [`BitString`].
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    bits: &'a BitString,
    front: usize,
    back: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.front >= self.back {
            return None;
        }
        let bit = self.bits.get(self.front);
        self.front += 1;
        bit
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Bits<'_> {
    fn next_back(&mut self) -> Option<bool> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.bits.get(self.back)
    }
}

impl ExactSizeIterator for Bits<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_push_and_get() {
        let mut b = BitString::new();
        for &bit in &[true, false, true, true, false, false, true, false, true] {
            b.push(bit);
        }

        assert_eq!(b.len(), 9);
        assert_eq!(b.as_bytes(), &[0b10110010, 0b10000000]);
        assert_eq!(b.get(0), Some(true));
        assert_eq!(b.get(8), Some(true));
        assert_eq!(b.get(9), None);
    }

    #[test]
    fn test_pop_clears_padding() {
        let mut a = bits("101");
        assert_eq!(a.pop(), Some(true));
        assert_eq!(a, bits("10"));
        assert_eq!(a.as_bytes(), &[0b10000000]);

        let mut b = bits("100000001");
        assert_eq!(b.pop(), Some(true));
        assert_eq!(b.as_bytes().len(), 1);
        assert_eq!(b, bits("10000000"));

        let mut empty = BitString::new();
        assert_eq!(empty.pop(), None);
    }

    #[test]
    fn test_display_and_parse() {
        let b = bits("0110100111");
        assert_eq!(b.to_string(), "0110100111");
        assert_eq!(format!("{:?}", b), "BitString(\"0110100111\")");

        let err = "01x1".parse::<BitString>().unwrap_err();
        assert!(matches!(
            err,
            Error::BitIo(BitIoError::InvalidBitChar { position: 2, found: 'x' })
        ));
    }

    #[test]
    fn test_extend_aligned_and_unaligned() {
        let mut aligned = bits("11110000");
        aligned.extend_from_bits(&bits("101"));
        assert_eq!(aligned, bits("11110000101"));

        let mut unaligned = bits("1");
        unaligned.extend_from_bits(&bits("0110011"));
        assert_eq!(unaligned, bits("10110011"));
        assert_eq!(unaligned.as_bytes(), &[0b10110011]);
    }

    #[test]
    fn test_starts_with() {
        let b = bits("1011001110");
        assert!(b.starts_with(&BitString::new()));
        assert!(b.starts_with(&bits("1")));
        assert!(b.starts_with(&bits("10110011")));
        assert!(b.starts_with(&bits("101100111")));
        assert!(b.starts_with(&b));
        assert!(!b.starts_with(&bits("0")));
        assert!(!b.starts_with(&bits("101100110")));
        assert!(!b.starts_with(&bits("10110011100")));
    }

    #[test]
    fn test_from_packed_masks_padding() {
        let b = BitString::from_packed(&[0b10111111], 3).unwrap();
        assert_eq!(b, bits("101"));
        assert_eq!(b.as_bytes(), &[0b10100000]);

        let err = BitString::from_packed(&[0xFF], 9).unwrap_err();
        assert!(matches!(
            err,
            Error::BitIo(BitIoError::InsufficientBits { requested: 9, available: 8 })
        ));
    }

    #[test]
    fn test_iter_both_ends() {
        let b = bits("1100");
        assert_eq!(b.iter().len(), 4);
        assert_eq!(b.iter().rev().collect::<Vec<_>>(), vec![false, false, true, true]);

        let collected: BitString = b.iter().collect();
        assert_eq!(collected, b);
    }

    #[test]
    fn test_order_is_lexicographic_on_bits() {
        let mut all = Vec::new();
        for len in 0..=9usize {
            for value in 0..(1u32 << len) {
                all.push((0..len).rev().map(|shift| (value >> shift) & 1 == 1).collect::<BitString>());
            }
        }

        for a in &all {
            for b in &all {
                assert_eq!(a.cmp(b), a.iter().cmp(b.iter()), "{a} vs {b}");
            }
        }

        let mut sorted = vec![bits("1"), bits("0111"), bits("01"), bits("00000000"), bits("0")];
        sorted.sort();
        assert_eq!(
            sorted,
            vec![bits("0"), bits("00000000"), bits("01"), bits("0111"), bits("1")]
        );
    }

    #[test]
    fn test_equal_bits_hash_equal() {
        use std::collections::HashSet;

        let mut built = BitString::new();
        built.push(true);
        built.push(true);
        built.push(false);
        built.pop();

        let mut set = HashSet::new();
        set.insert(bits("11"));
        assert!(set.contains(&built));
    }
}
