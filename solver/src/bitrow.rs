//! Packed bit vector over GF(2).
//!
//! A [`BitRow`] stores a fixed number of boolean positions in 64-bit words,
//! least-significant bit first: position `p` lives in word `p / 64` at bit
//! `p % 64`. Addition over GF(2) is XOR, so adding two rows is a word-wise
//! XOR and costs `O(words)`.
//!
//! # Encoding
//!
//! ```text
//! bits = 70  →  2 words
//! word 0: positions  0..64
//! word 1: positions 64..70   (upper 58 bits always zero)
//! ```
//!
//! The size is fixed at creation; nothing resizes implicitly. Positions at
//! or beyond [`BitRow::len`] are never set, which keeps word-level
//! operations (XOR, popcount, parity) exact without masking the tail.
//!
//! # Example
//!
//! ```
//! use lockcube_solver::BitRow;
//!
//! let mut a = BitRow::new(70);
//! a.set(3);
//! a.set(65);
//!
//! let mut b = BitRow::new(70);
//! b.set(65);
//!
//! a ^= &b;
//! assert!(a.get(3));
//! assert!(!a.get(65));
//! assert_eq!(a.iter_ones().collect::<Vec<_>>(), vec![3]);
//! ```

use core::fmt;
use core::ops::{BitXorAssign, Range};

use crate::error::{Result, SolveError};

/// Number of bit positions per storage word.
pub const WORD_BITS: usize = u64::BITS as usize;

#[inline]
const fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

/// Fixed-length boolean vector packed into `u64` words.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BitRow {
    words: Vec<u64>,
    bits: usize,
}

impl BitRow {
    /// Allocates `ceil(bits / 64)` zero words.
    #[must_use]
    pub fn new(bits: usize) -> Self {
        Self {
            words: vec![0; words_for(bits)],
            bits,
        }
    }

    /// Builds a row whose position `i` holds `values[i]`.
    #[must_use]
    pub fn from_bools(values: &[bool]) -> Self {
        let mut row = Self::new(values.len());
        for (pos, _) in values.iter().enumerate().filter(|&(_, &v)| v) {
            row.words[pos / WORD_BITS] |= 1 << (pos % WORD_BITS);
        }
        row
    }

    /// Number of addressable bit positions.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits
    }

    /// True when the row has no positions at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of storage words.
    #[inline]
    #[must_use]
    pub fn word_len(&self) -> usize {
        self.words.len()
    }

    /// Raw storage words.
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Reads bit `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= self.len()`.
    #[inline]
    #[must_use]
    pub fn get(&self, pos: usize) -> bool {
        assert!(pos < self.bits, "bit {pos} out of range for a {}-bit row", self.bits);
        (self.words[pos / WORD_BITS] >> (pos % WORD_BITS)) & 1 == 1
    }

    /// Sets bit `pos` to 1.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= self.len()`.
    #[inline]
    pub fn set(&mut self, pos: usize) {
        assert!(pos < self.bits, "bit {pos} out of range for a {}-bit row", self.bits);
        self.words[pos / WORD_BITS] |= 1 << (pos % WORD_BITS);
    }

    /// Sets bit `pos` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= self.len()`.
    #[inline]
    pub fn set_to(&mut self, pos: usize, value: bool) {
        assert!(pos < self.bits, "bit {pos} out of range for a {}-bit row", self.bits);
        let mask = 1u64 << (pos % WORD_BITS);
        if value {
            self.words[pos / WORD_BITS] |= mask;
        } else {
            self.words[pos / WORD_BITS] &= !mask;
        }
    }

    /// Inverts bit `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= self.len()`.
    #[inline]
    pub fn flip(&mut self, pos: usize) {
        assert!(pos < self.bits, "bit {pos} out of range for a {}-bit row", self.bits);
        self.words[pos / WORD_BITS] ^= 1 << (pos % WORD_BITS);
    }

    /// Reads bit `pos`, reporting an out-of-range position as an error.
    ///
    /// # Errors
    ///
    /// [`SolveError::IndexOutOfRange`] if `pos >= self.len()`.
    pub fn checked_get(&self, pos: usize) -> Result<bool> {
        self.check_pos(pos)?;
        Ok(self.get(pos))
    }

    /// Writes bit `pos`, reporting an out-of-range position as an error.
    ///
    /// # Errors
    ///
    /// [`SolveError::IndexOutOfRange`] if `pos >= self.len()`.
    pub fn checked_set_to(&mut self, pos: usize, value: bool) -> Result<()> {
        self.check_pos(pos)?;
        self.set_to(pos, value);
        Ok(())
    }

    fn check_pos(&self, pos: usize) -> Result<()> {
        if pos < self.bits {
            Ok(())
        } else {
            Err(SolveError::IndexOutOfRange {
                index: pos,
                bound: self.bits,
            })
        }
    }

    /// Adds `other` into `self` over GF(2).
    ///
    /// # Panics
    ///
    /// Panics if the word counts differ. Mixing rows of different matrices
    /// is a programming error; use [`BitRow::checked_xor_assign`] where the
    /// shapes come from outside.
    #[inline]
    pub fn xor_assign(&mut self, other: &Self) {
        self.xor_assign_from_word(other, 0);
    }

    /// Adds `other` into `self`, touching only words `start_word..`.
    ///
    /// Callers use this when both rows are known to be zero in every word
    /// before `start_word`.
    ///
    /// # Panics
    ///
    /// Panics if the word counts differ.
    #[inline]
    pub fn xor_assign_from_word(&mut self, other: &Self, start_word: usize) {
        assert_eq!(
            self.words.len(),
            other.words.len(),
            "xor of rows with different word counts"
        );
        for (dst, src) in self
            .words
            .iter_mut()
            .zip(&other.words)
            .skip(start_word)
        {
            *dst ^= *src;
        }
    }

    /// Adds `other` into `self`, reporting a shape disagreement as an error.
    ///
    /// # Errors
    ///
    /// [`SolveError::DimensionMismatch`] if the word counts differ.
    pub fn checked_xor_assign(&mut self, other: &Self) -> Result<()> {
        if self.words.len() != other.words.len() {
            return Err(SolveError::DimensionMismatch {
                expected: self.words.len(),
                found: other.words.len(),
                axis: None,
            });
        }
        self.xor_assign(other);
        Ok(())
    }

    /// Number of set positions.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True when no position below `bit` is set.
    ///
    /// # Panics
    ///
    /// Panics if `bit > self.len()`.
    #[must_use]
    pub fn is_zero_below(&self, bit: usize) -> bool {
        assert!(bit <= self.bits, "prefix {bit} longer than a {}-bit row", self.bits);
        let full = bit / WORD_BITS;
        if self.words[..full].iter().any(|&w| w != 0) {
            return false;
        }
        let rem = bit % WORD_BITS;
        rem == 0 || self.words[full] & low_mask(rem) == 0
    }

    /// GF(2) dot product of the first `bits` positions of `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if `bits` exceeds either row's length.
    #[must_use]
    pub fn parity_and(&self, other: &Self, bits: usize) -> bool {
        assert!(
            bits <= self.bits && bits <= other.bits,
            "dot product over {bits} bits exceeds row length"
        );
        let full = bits / WORD_BITS;
        let mut acc = self.words[..full]
            .iter()
            .zip(&other.words[..full])
            .fold(0u32, |acc, (a, b)| acc ^ (a & b).count_ones());
        let rem = bits % WORD_BITS;
        if rem != 0 {
            acc ^= (self.words[full] & other.words[full] & low_mask(rem)).count_ones();
        }
        acc & 1 == 1
    }

    /// Ascending positions of every set bit.
    #[must_use]
    pub fn iter_ones(&self) -> Ones<'_> {
        self.ones_in(0..self.bits)
    }

    /// Ascending positions of the set bits inside `range`.
    #[must_use]
    pub fn ones_in(&self, range: Range<usize>) -> Ones<'_> {
        let end = range.end.min(self.bits);
        if range.start >= end {
            return Ones {
                words: &self.words,
                index: self.words.len(),
                current: 0,
                end: 0,
            };
        }
        let index = range.start / WORD_BITS;
        Ones {
            words: &self.words,
            index,
            current: self.words[index] & (!0u64 << (range.start % WORD_BITS)),
            end,
        }
    }
}

#[inline]
const fn low_mask(bits: usize) -> u64 {
    (1u64 << bits) - 1
}

impl BitXorAssign<&BitRow> for BitRow {
    fn bitxor_assign(&mut self, rhs: &BitRow) {
        self.xor_assign(rhs);
    }
}

impl fmt::Debug for BitRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BitRow(")?;
        for pos in 0..self.bits {
            f.write_str(if self.get(pos) { "1" } else { "0" })?;
        }
        f.write_str(")")
    }
}

/// Iterator over set positions, see [`BitRow::ones_in`].
#[derive(Debug, Clone)]
pub struct Ones<'a> {
    words: &'a [u64],
    index: usize,
    current: u64,
    end: usize,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let pos = self.index * WORD_BITS + self.current.trailing_zeros() as usize;
                if pos >= self.end {
                    self.current = 0;
                    self.index = self.words.len();
                    return None;
                }
                self.current &= self.current - 1;
                return Some(pos);
            }
            self.index += 1;
            if self.index >= self.words.len() || self.index * WORD_BITS >= self.end {
                return None;
            }
            self.current = self.words[self.index];
        }
    }
}
