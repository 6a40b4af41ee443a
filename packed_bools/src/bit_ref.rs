//! Write-through proxy for a single bit.

use crate::bit_ops::{BLOCK_BITS, Block, bit_at, write_bit};

/// Stand-in for a mutable reference to one bit.
///
/// A single bit has no addressable memory location, so indexed writes and
/// mutable cursors hand out this proxy instead: it captures the owning
/// block and the bit's offset within it, and writes go back through the
/// block.
#[derive(Debug)]
pub struct BitRef<'a> {
    block: &'a mut Block,
    offset: usize,
}

impl<'a> BitRef<'a> {
    pub(crate) fn new(block: &'a mut Block, offset: usize) -> Self {
        debug_assert!(offset < BLOCK_BITS);
        BitRef { block, offset }
    }

    /// Reads the bit.
    #[inline]
    pub fn get(&self) -> bool {
        bit_at(*self.block, self.offset)
    }

    /// Writes the bit.
    #[inline]
    pub fn set(&mut self, value: bool) {
        write_bit(self.block, self.offset, value);
    }

    /// Toggles the bit.
    #[inline]
    pub fn flip(&mut self) {
        *self.block ^= 1 << self.offset;
    }

    /// Writes `value` and returns the previous bit.
    pub fn replace(&mut self, value: bool) -> bool {
        let old = self.get();
        self.set(value);
        old
    }
}

impl From<BitRef<'_>> for bool {
    fn from(r: BitRef<'_>) -> bool {
        r.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_reads_and_writes_through_block() {
        let mut block: Block = 0;

        let mut r = BitRef::new(&mut block, 9);
        assert!(!r.get());
        r.set(true);
        assert!(r.get());
        assert_eq!(block, 1 << 9);
    }

    #[test]
    fn flip_and_replace() {
        let mut block: Block = 1 << 3;

        let mut r = BitRef::new(&mut block, 3);
        r.flip();
        assert!(!r.get());
        assert!(!r.replace(true));
        assert!(r.get());
        assert_eq!(block, 1 << 3);
    }

    #[test]
    fn only_the_addressed_bit_changes() {
        let mut block: Block = 0b1010_1010;

        let mut r = BitRef::new(&mut block, 0);
        r.set(true);
        assert_eq!(block, 0b1010_1011);
    }
}
