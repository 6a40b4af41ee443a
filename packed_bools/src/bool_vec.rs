//! Growable bit-packed boolean container.

use std::io;
use std::mem;

use seq_core::{POISON_BIT, SeqError, Sequence, poison_enabled};

use crate::bit_ops::{
    BLOCK_BITS, Block, bit_at, bit_offset, block_index, blocks_needed, copy_bits, low_mask,
    write_bit,
};
use crate::bit_ref::BitRef;
use crate::cursor::{BitCursor, BitCursorMut};

/// Growable sequence of single bits packed into [`Block`] words.
///
/// Logical size is tracked in bits; physical capacity is always a whole
/// number of blocks (`capacity() % BLOCK_BITS == 0`). Growth doubles the
/// block count and repacks existing bits, so `push_back` is amortized O(1).
///
/// In debug builds the unused capacity tail is poison-filled and mutating
/// operations verify the container invariants first, failing with
/// `InvalidObject` on a corrupted instance.
#[derive(Debug)]
pub struct BoolVec {
    blocks: Vec<Block>,
    len: usize,
    valid: bool,
}

impl BoolVec {
    pub fn new() -> Self {
        BoolVec {
            blocks: Vec::new(),
            len: 0,
            valid: true,
        }
    }

    /// Container of `n` bits, all set to `value`.
    pub fn with_len(n: usize, value: bool) -> Result<Self, SeqError> {
        let mut v = BoolVec::new();
        if let Err(e) = v.resize(n, value) {
            v.valid = false;
            return Err(e);
        }
        Ok(v)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Capacity in bits; always a multiple of [`BLOCK_BITS`].
    pub fn capacity(&self) -> usize {
        self.blocks.len() * BLOCK_BITS
    }

    /// Bounds-checked read of bit `pos`.
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

    /// Bounds-checked single-bit write.
    pub fn write(&mut self, pos: usize, value: bool) -> Result<(), SeqError> {
        self.check()?;
        if pos >= self.len {
            return Err(SeqError::out_of_range(pos, self.len));
        }
        self.set_bit(pos, value);
        Ok(())
    }

    /// Toggles bit `pos`.
    pub fn flip(&mut self, pos: usize) -> Result<(), SeqError> {
        self.check()?;
        if pos >= self.len {
            return Err(SeqError::out_of_range(pos, self.len));
        }
        self.blocks[block_index(pos)] ^= 1 << bit_offset(pos);
        Ok(())
    }

    /// Appends one bit, growing the buffer when at capacity.
    pub fn push_back(&mut self, value: bool) -> Result<(), SeqError> {
        self.check()?;
        self.alloc(self.len + 1)?;
        self.len += 1;
        self.set_bit(self.len - 1, value);
        Ok(())
    }

    /// Removes bit `pos`, shifting every later bit down by one.
    ///
    /// Returns `false` when `pos` is out of range. The shift runs in three
    /// phases: bit by bit up to the next block boundary, whole blocks
    /// shifted right by one with the following block's low bit carried in,
    /// then bit by bit for the unaligned tail.
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

    /// Sets `n` bits starting at `begin` to `value`. The range must lie
    /// within the live bits.
    pub fn fill_range(&mut self, begin: usize, n: usize, value: bool) -> Result<(), SeqError> {
        self.check()?;
        let end = begin.checked_add(n).ok_or_else(|| {
            SeqError::invalid_argument("bit range overflows usize")
        })?;
        if end > self.len {
            return Err(SeqError::out_of_range(end, self.len));
        }
        self.fill_bits(begin, n, value);
        Ok(())
    }

    /// Sets every live bit to `value`.
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

    /// Complements every live bit. Unused capacity bits are not touched.
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

    /// Grows or shrinks to exactly `n` bits, filling newly exposed bits
    /// with `value`. Reallocates to the tight block count.
    pub fn resize(&mut self, n: usize, value: bool) -> Result<(), SeqError> {
        self.check()?;
        self.shrink_alloc(n)?;
        if n > self.len {
            let start = self.len;
            self.fill_bits(start, n - start, value);
        }
        self.len = n;
        Ok(())
    }

    /// Ensures capacity for at least `n` bits. Never shrinks.
    pub fn reserve(&mut self, n: usize) -> Result<(), SeqError> {
        self.check()?;
        self.alloc(n)
    }

    /// Releases the buffer and resets the length.
    pub fn clear(&mut self) {
        self.blocks = Vec::new();
        self.len = 0;
    }

    /// O(1) exchange of buffers, lengths and validity flags.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(&mut self.blocks, &mut other.blocks);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.valid, &mut other.valid);
    }

    /// Silent verifier. The block-granular buffer makes
    /// `capacity % BLOCK_BITS == 0` and "buffer empty iff zero capacity"
    /// hold by construction; what remains is the flag and the size bound.
    pub fn is_valid(&self) -> bool {
        self.valid && self.len <= self.capacity()
    }

    /// Shared cursor over the live bits.
    pub fn iter(&self) -> BitCursor<'_> {
        BitCursor::new(&self.blocks, self.len)
    }

    /// Lending cursor yielding write-through proxies.
    pub fn cursor_mut(&mut self) -> BitCursorMut<'_> {
        BitCursorMut::new(&mut self.blocks, self.len)
    }

    /// Writes a structured snapshot to `sink`: header, live bits marked
    /// with `*`, then the unused capacity region with a poison-consistency
    /// annotation. The sink is any text writer; the format is diagnostic
    /// output, not a compatibility contract.
    pub fn dump<W: io::Write>(&self, sink: &mut W) -> Result<(), SeqError> {
        writeln!(sink, "-------------------")?;
        writeln!(sink, "BoolVec:")?;
        writeln!(
            sink,
            "status: {}",
            if self.is_valid() { "ok" } else { "FAIL" }
        )?;
        writeln!(sink, "{{")?;
        writeln!(sink, "    size: {}", self.len)?;
        writeln!(sink, "    capacity: {}", self.capacity())?;
        writeln!(sink, "    valid flag: {}", self.valid)?;
        writeln!(sink)?;
        for i in 0..self.len {
            writeln!(sink, "    * [{i}] = {}", self.get_bit(i) as u8)?;
        }
        for i in self.len..self.capacity() {
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
        debug_assert!(pos < self.capacity());
        bit_at(self.blocks[block_index(pos)], bit_offset(pos))
    }

    fn set_bit(&mut self, pos: usize, value: bool) {
        debug_assert!(pos < self.capacity());
        write_bit(&mut self.blocks[block_index(pos)], bit_offset(pos), value);
    }

    // Three-phase fill over [begin, begin + n): bit by bit up to alignment,
    // whole-block stores for the middle, bit by bit for the tail. May write
    // into the unused capacity region (poison fill uses it too).
    fn fill_bits(&mut self, begin: usize, n: usize, value: bool) {
        debug_assert!(begin + n <= self.capacity());
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

    // Reallocates to exactly `blocks_needed(n_bits)` blocks, repacking the
    // surviving bits and truncating the length to `n_bits` if needed.
    fn shrink_alloc(&mut self, n_bits: usize) -> Result<(), SeqError> {
        let new_block_count = blocks_needed(n_bits);
        let new_len = self.len.min(n_bits);

        let mut tmp: Vec<Block> = Vec::new();
        tmp.try_reserve_exact(new_block_count)
            .map_err(|_| SeqError::bad_alloc())?;
        tmp.resize(new_block_count, 0);

        copy_bits(&mut tmp, &self.blocks, new_len);

        self.blocks = tmp;
        self.len = new_len;

        if poison_enabled() {
            let cap = self.capacity();
            self.fill_bits(new_len, cap - new_len, POISON_BIT);
        }
        Ok(())
    }

    // Doubling growth to cover at least `n` bits.
    fn alloc(&mut self, n: usize) -> Result<(), SeqError> {
        if n <= self.capacity() {
            return Ok(());
        }
        let mut new_blocks = self.blocks.len().max(1);
        let needed = blocks_needed(n);
        while new_blocks < needed {
            new_blocks *= 2;
        }
        self.shrink_alloc(new_blocks * BLOCK_BITS)
    }

    fn check(&self) -> Result<(), SeqError> {
        if poison_enabled() && !self.is_valid() {
            return Err(SeqError::invalid_object());
        }
        Ok(())
    }
}

impl Default for BoolVec {
    fn default() -> Self {
        BoolVec::new()
    }
}

impl Clone for BoolVec {
    /// Deep bit-for-bit copy with tight capacity. The validity flag
    /// carries over, so cloning a corrupted container does not launder it
    /// back to valid.
    fn clone(&self) -> Self {
        let mut blocks = vec![0; blocks_needed(self.len)];
        copy_bits(&mut blocks, &self.blocks, self.len);
        let mut v = BoolVec {
            blocks,
            len: self.len,
            valid: self.valid,
        };
        if poison_enabled() {
            let cap = v.capacity();
            let live = v.len;
            v.fill_bits(live, cap - live, POISON_BIT);
        }
        v
    }
}

impl PartialEq for BoolVec {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for BoolVec {}

impl From<&[bool]> for BoolVec {
    fn from(bits: &[bool]) -> Self {
        let mut blocks = vec![0; blocks_needed(bits.len())];
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                blocks[block_index(i)] |= 1 << bit_offset(i);
            }
        }
        let mut v = BoolVec {
            blocks,
            len: bits.len(),
            valid: true,
        };
        if poison_enabled() {
            let cap = v.capacity();
            let live = v.len;
            v.fill_bits(live, cap - live, POISON_BIT);
        }
        v
    }
}

impl FromIterator<bool> for BoolVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let bits: Vec<bool> = iter.into_iter().collect();
        BoolVec::from(bits.as_slice())
    }
}

impl<'a> IntoIterator for &'a BoolVec {
    type Item = bool;
    type IntoIter = BitCursor<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Sequence for BoolVec {
    type Item = bool;

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        BoolVec::capacity(self)
    }

    fn push_back(&mut self, value: bool) -> Result<(), SeqError> {
        BoolVec::push_back(self, value)
    }

    fn erase(&mut self, pos: usize) -> bool {
        BoolVec::erase(self, pos)
    }

    fn back(&self) -> Result<bool, SeqError> {
        BoolVec::back(self)
    }

    fn clear(&mut self) {
        BoolVec::clear(self)
    }

    fn swap_with(&mut self, other: &mut Self) {
        BoolVec::swap_with(self, other)
    }

    fn is_valid(&self) -> bool {
        BoolVec::is_valid(self)
    }
}
