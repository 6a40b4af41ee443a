//! Fixed-capacity bit-packed boolean container.

use std::io;
use std::mem;

use seq_core::{POISON_BIT, SeqError, Sequence, poison_enabled};

use crate::bit_ops::{
    BLOCK_BITS, Block, bit_at, bit_offset, block_index, low_mask, write_bit,
};
use crate::bit_ref::BitRef;
use crate::cursor::{BitCursor, BitCursorMut};

/// Fixed-capacity sequence of single bits packed into an inline block
/// array. Capacity is `BLOCKS * BLOCK_BITS` bits: sizing in whole blocks
/// keeps the capacity invariant identical to [`BoolVec`](crate::BoolVec)
/// instead of special-casing a trailing partial block.
///
/// No reallocation ever occurs; `push_back` at capacity fails with
/// `BadAlloc`.
#[derive(Debug, Clone)]
pub struct BoolArray<const BLOCKS: usize> {
    blocks: [Block; BLOCKS],
    len: usize,
    valid: bool,
}

impl<const BLOCKS: usize> BoolArray<BLOCKS> {
    /// Total bit capacity.
    pub const CAPACITY: usize = BLOCKS * BLOCK_BITS;

    pub fn new() -> Self {
        let mut a = BoolArray {
            blocks: [0; BLOCKS],
            len: 0,
            valid: true,
        };
        if poison_enabled() {
            a.fill_bits(0, Self::CAPACITY, POISON_BIT);
        }
        a
    }

    /// Array holding `n` bits set to `value`; `BadAlloc` when `n` exceeds
    /// the capacity.
    pub fn with_len(n: usize, value: bool) -> Result<Self, SeqError> {
        let mut a = Self::new();
        if n > Self::CAPACITY {
            a.valid = false;
            return Err(SeqError::bad_alloc());
        }
        a.len = n;
        a.fill_bits(0, n, value);
        Ok(a)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    pub fn get(&self, pos: usize) -> Result<bool, SeqError> {
        self.check()?;
        if pos >= self.len {
            return Err(SeqError::out_of_range(pos, self.len));
        }
        Ok(self.get_bit(pos))
    }

    /// Write-through proxy for bit `pos`.
    pub fn bit_mut(&mut self, pos: usize) -> Result<BitRef<'_>, SeqError> {
        self.check()?;
        if pos >= self.len {
            return Err(SeqError::out_of_range(pos, self.len));
        }
        Ok(BitRef::new(
            &mut self.blocks[block_index(pos)],
            bit_offset(pos),
        ))
    }

    pub fn front(&self) -> Result<bool, SeqError> {
        self.get(0)
    }

    pub fn back(&self) -> Result<bool, SeqError> {
        self.check()?;
        if self.len == 0 {
            return Err(SeqError::out_of_range(0, 0));
        }
        Ok(self.get_bit(self.len - 1))
    }

    pub fn set(&mut self, pos: usize) -> Result<(), SeqError> {
        self.write(pos, true)
    }

    pub fn reset(&mut self, pos: usize) -> Result<(), SeqError> {
        self.write(pos, false)
    }

    pub fn write(&mut self, pos: usize, value: bool) -> Result<(), SeqError> {
        self.check()?;
        if pos >= self.len {
            return Err(SeqError::out_of_range(pos, self.len));
        }
        self.set_bit(pos, value);
        Ok(())
    }

    pub fn flip(&mut self, pos: usize) -> Result<(), SeqError> {
        self.check()?;
        if pos >= self.len {
            return Err(SeqError::out_of_range(pos, self.len));
        }
        self.blocks[block_index(pos)] ^= 1 << bit_offset(pos);
        Ok(())
    }

    /// Appends one bit; `BadAlloc` once the fixed capacity is full.
    pub fn push_back(&mut self, value: bool) -> Result<(), SeqError> {
        self.check()?;
        if self.len >= Self::CAPACITY {
            return Err(SeqError::bad_alloc());
        }
        self.len += 1;
        self.set_bit(self.len - 1, value);
        Ok(())
    }

    /// Removes bit `pos`, shifting every later bit down by one; `false`
    /// when `pos` is out of range. Same three-phase shift as the growable
    /// form: per-bit to alignment, whole blocks with carry, per-bit tail.
    pub fn erase(&mut self, pos: usize) -> bool {
        debug_assert!(self.is_valid());
        if pos >= self.len {
            return false;
        }
        self.len -= 1;
        let len = self.len;

        let mut it = pos;
        while it % BLOCK_BITS != 0 && it != len {
            let next = self.get_bit(it + 1);
            self.set_bit(it, next);
            it += 1;
        }
        while it + BLOCK_BITS <= len {
            let b = block_index(it);
            let carry = self.blocks[b + 1] & 1;
            self.blocks[b] = (self.blocks[b] >> 1) | (carry << (BLOCK_BITS - 1));
            it += BLOCK_BITS;
        }
        while it < len {
            let next = self.get_bit(it + 1);
            self.set_bit(it, next);
            it += 1;
        }

        if poison_enabled() {
            self.set_bit(len, POISON_BIT);
        }
        true
    }

    pub fn fill_range(&mut self, begin: usize, n: usize, value: bool) -> Result<(), SeqError> {
        self.check()?;
        let end = begin
            .checked_add(n)
            .ok_or_else(|| SeqError::invalid_argument("bit range overflows usize"))?;
        if end > self.len {
            return Err(SeqError::out_of_range(end, self.len));
        }
        self.fill_bits(begin, n, value);
        Ok(())
    }

    pub fn fill(&mut self, value: bool) -> Result<(), SeqError> {
        self.fill_range(0, self.len, value)
    }

    /// Number of live bits that are set.
    ///
    /// Infallible by signature, like `erase` and `invert`: these assert
    /// validity in debug builds rather than reporting `InvalidObject`
    /// through a `Result`.
    pub fn count(&self) -> usize {
        debug_assert!(self.is_valid());
        let full = self.len / BLOCK_BITS;
        let mut total: usize = self.blocks[..full]
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum();
        let tail = self.len % BLOCK_BITS;
        if tail != 0 {
            total += (self.blocks[full] & low_mask(tail)).count_ones() as usize;
        }
        total
    }

    /// Complements every live bit, leaving unused capacity untouched.
    /// Infallible; validity is asserted in debug builds (see [`count`](Self::count)).
    pub fn invert(&mut self) {
        debug_assert!(self.is_valid());
        let full = self.len / BLOCK_BITS;
        for block in &mut self.blocks[..full] {
            *block = !*block;
        }
        let tail = self.len % BLOCK_BITS;
        if tail != 0 {
            self.blocks[full] ^= low_mask(tail);
        }
    }

    /// Grows or shrinks the logical length within the fixed capacity,
    /// filling newly exposed bits with `value`. `BadAlloc` when `n`
    /// exceeds the capacity.
    pub fn resize(&mut self, n: usize, value: bool) -> Result<(), SeqError> {
        self.check()?;
        if n > Self::CAPACITY {
            return Err(SeqError::bad_alloc());
        }
        if n > self.len {
            let start = self.len;
            self.fill_bits(start, n - start, value);
        } else if poison_enabled() {
            self.fill_bits(n, self.len - n, POISON_BIT);
        }
        self.len = n;
        Ok(())
    }

    /// Resets the length; the inline buffer is retained (and re-poisoned
    /// in debug builds).
    pub fn clear(&mut self) {
        if poison_enabled() {
            let live = self.len;
            self.fill_bits(0, live, POISON_BIT);
        }
        self.len = 0;
    }

    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(&mut self.blocks, &mut other.blocks);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.valid, &mut other.valid);
    }

    pub fn is_valid(&self) -> bool {
        self.valid && self.len <= Self::CAPACITY
    }

    pub fn iter(&self) -> BitCursor<'_> {
        BitCursor::new(&self.blocks, self.len)
    }

    pub fn cursor_mut(&mut self) -> BitCursorMut<'_> {
        BitCursorMut::new(&mut self.blocks, self.len)
    }

    /// Structured diagnostic snapshot, same shape as the growable form's.
    pub fn dump<W: io::Write>(&self, sink: &mut W) -> Result<(), SeqError> {
        writeln!(sink, "-------------------")?;
        writeln!(sink, "BoolArray<{BLOCKS}>:")?;
        writeln!(
            sink,
            "status: {}",
            if self.is_valid() { "ok" } else { "FAIL" }
        )?;
        writeln!(sink, "{{")?;
        writeln!(sink, "    size: {}", self.len)?;
        writeln!(sink, "    capacity: {}", Self::CAPACITY)?;
        writeln!(sink, "    valid flag: {}", self.valid)?;
        writeln!(sink)?;
        for i in 0..self.len {
            writeln!(sink, "    * [{i}] = {}", self.get_bit(i) as u8)?;
        }
        for i in self.len..Self::CAPACITY {
            let bit = self.get_bit(i);
            if poison_enabled() && bit != POISON_BIT {
                writeln!(sink, "      [{i}] = {}    // not poison!", bit as u8)?;
            } else {
                writeln!(sink, "      [{i}] = {}", bit as u8)?;
            }
        }
        writeln!(sink, "}}")?;
        writeln!(sink, "-------------------")?;
        Ok(())
    }

    fn get_bit(&self, pos: usize) -> bool {
        debug_assert!(pos < Self::CAPACITY);
        bit_at(self.blocks[block_index(pos)], bit_offset(pos))
    }

    fn set_bit(&mut self, pos: usize, value: bool) {
        debug_assert!(pos < Self::CAPACITY);
        write_bit(&mut self.blocks[block_index(pos)], bit_offset(pos), value);
    }

    fn fill_bits(&mut self, begin: usize, n: usize, value: bool) {
        debug_assert!(begin + n <= Self::CAPACITY);
        let end = begin + n;
        let mut it = begin;
        while it % BLOCK_BITS != 0 && it != end {
            self.set_bit(it, value);
            it += 1;
        }
        while it + BLOCK_BITS <= end {
            self.blocks[block_index(it)] = if value { !0 } else { 0 };
            it += BLOCK_BITS;
        }
        while it < end {
            self.set_bit(it, value);
            it += 1;
        }
    }

    fn check(&self) -> Result<(), SeqError> {
        if poison_enabled() && !self.is_valid() {
            return Err(SeqError::invalid_object());
        }
        Ok(())
    }
}

impl<const BLOCKS: usize> Default for BoolArray<BLOCKS> {
    fn default() -> Self {
        BoolArray::new()
    }
}

impl<const BLOCKS: usize> PartialEq for BoolArray<BLOCKS> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<const BLOCKS: usize> Eq for BoolArray<BLOCKS> {}

impl<'a, const BLOCKS: usize> IntoIterator for &'a BoolArray<BLOCKS> {
    type Item = bool;
    type IntoIter = BitCursor<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<const BLOCKS: usize> Sequence for BoolArray<BLOCKS> {
    type Item = bool;

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    fn push_back(&mut self, value: bool) -> Result<(), SeqError> {
        BoolArray::push_back(self, value)
    }

    fn erase(&mut self, pos: usize) -> bool {
        BoolArray::erase(self, pos)
    }

    fn back(&self) -> Result<bool, SeqError> {
        BoolArray::back(self)
    }

    fn clear(&mut self) {
        BoolArray::clear(self)
    }

    fn swap_with(&mut self, other: &mut Self) {
        BoolArray::swap_with(self, other)
    }

    fn is_valid(&self) -> bool {
        BoolArray::is_valid(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_whole_blocks() {
        let a = BoolArray::<3>::new();
        assert_eq!(a.capacity(), 3 * BLOCK_BITS);
        assert_eq!(a.capacity() % BLOCK_BITS, 0);
        assert!(a.is_empty());
    }

    #[test]
    fn zero_capacity_array_rejects_every_push() {
        let mut a = BoolArray::<0>::new();
        assert_eq!(a.capacity(), 0);
        for _ in 0..3 {
            assert!(matches!(a.push_back(true), Err(SeqError::BadAlloc { .. })));
        }
        assert_eq!(a.len(), 0);
        assert!(a.is_valid());
    }

    #[test]
    fn push_to_capacity_then_fail() -> Result<(), SeqError> {
        let mut a = BoolArray::<1>::new();
        for i in 0..BLOCK_BITS {
            a.push_back(i % 2 == 0)?;
        }
        assert_eq!(a.len(), BLOCK_BITS);
        assert!(matches!(a.push_back(true), Err(SeqError::BadAlloc { .. })));
        for i in 0..BLOCK_BITS {
            assert_eq!(a.get(i)?, i % 2 == 0);
        }
        Ok(())
    }

    #[test]
    fn with_len_over_capacity_fails() {
        assert!(matches!(
            BoolArray::<1>::with_len(BLOCK_BITS + 1, false),
            Err(SeqError::BadAlloc { .. })
        ));
        let a = BoolArray::<1>::with_len(BLOCK_BITS, true).unwrap();
        assert_eq!(a.count(), BLOCK_BITS);
    }

    #[test]
    fn erase_shifts_and_preserves_prefix() -> Result<(), SeqError> {
        let mut a = BoolArray::<3>::new();
        let n = 2 * BLOCK_BITS + 20;
        for i in 0..n {
            a.push_back(i % 4 == 0)?;
        }

        assert!(a.erase(70));
        assert_eq!(a.len(), n - 1);
        for i in 0..70 {
            assert_eq!(a.get(i)?, i % 4 == 0, "bit {i}");
        }
        for i in 70..n - 1 {
            assert_eq!(a.get(i)?, (i + 1) % 4 == 0, "bit {i}");
        }

        assert!(!a.erase(n));
        Ok(())
    }

    #[test]
    fn invert_and_count() -> Result<(), SeqError> {
        let mut a = BoolArray::<2>::with_len(100, false)?;
        a.set(10)?;
        a.set(99)?;
        assert_eq!(a.count(), 2);

        a.invert();
        assert_eq!(a.count(), 98);
        assert!(!a.get(10)?);
        assert!(a.get(0)?);

        a.invert();
        assert_eq!(a.count(), 2);
        Ok(())
    }

    #[test]
    fn resize_within_capacity() -> Result<(), SeqError> {
        let mut a = BoolArray::<2>::new();
        a.resize(50, true)?;
        assert_eq!(a.count(), 50);
        a.resize(20, false)?;
        assert_eq!(a.len(), 20);
        assert_eq!(a.count(), 20);
        assert!(matches!(
            a.resize(2 * BLOCK_BITS + 1, false),
            Err(SeqError::BadAlloc { .. })
        ));
        Ok(())
    }

    #[test]
    fn out_of_range_access_fails() {
        let a = BoolArray::<1>::with_len(5, false).unwrap();
        assert!(matches!(
            a.get(5),
            Err(SeqError::OutOfRange { index: 5, len: 5, .. })
        ));
        let empty = BoolArray::<1>::new();
        assert!(empty.get(0).is_err());
        assert!(empty.back().is_err());
    }

    #[test]
    fn swap_clear_and_clone() -> Result<(), SeqError> {
        let mut a = BoolArray::<1>::with_len(8, true)?;
        let mut b = BoolArray::<1>::new();
        a.swap_with(&mut b);
        assert!(a.is_empty());
        assert_eq!(b.count(), 8);

        let c = b.clone();
        b.clear();
        assert!(b.is_empty());
        assert_eq!(c.count(), 8);
        Ok(())
    }

    #[test]
    fn cursor_roundtrip() -> Result<(), SeqError> {
        let mut a = BoolArray::<2>::new();
        for i in 0..90 {
            a.push_back(i % 3 == 1)?;
        }
        let collected: Vec<bool> = a.iter().collect();
        assert_eq!(collected.len(), 90);
        for (i, v) in collected.iter().enumerate() {
            assert_eq!(*v, i % 3 == 1);
        }
        Ok(())
    }
}
