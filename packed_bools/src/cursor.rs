//! Iteration cursors for bit containers.
//!
//! A cursor carries a block position plus an intra-block offset; stepping
//! past either edge of a block moves to the neighbouring block and wraps
//! the offset, so callers never see the block boundary.

use seq_core::SeqError;

use crate::bit_ops::{BLOCK_BITS, Block, bit_at};
use crate::bit_ref::BitRef;

/// Shared cursor over the live bits of a container.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    blocks: &'a [Block],
    block: usize,
    offset: usize,
    end_block: usize,
    end_offset: usize,
}

impl<'a> BitCursor<'a> {
    pub(crate) fn new(blocks: &'a [Block], len_bits: usize) -> Self {
        debug_assert!(len_bits <= blocks.len() * BLOCK_BITS);
        BitCursor {
            blocks,
            block: 0,
            offset: 0,
            end_block: len_bits / BLOCK_BITS,
            end_offset: len_bits % BLOCK_BITS,
        }
    }

    fn at_end(&self) -> bool {
        self.block == self.end_block && self.offset == self.end_offset
    }
}

impl Iterator for BitCursor<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.at_end() {
            return None;
        }
        let value = bit_at(self.blocks[self.block], self.offset);
        self.offset += 1;
        if self.offset == BLOCK_BITS {
            self.block += 1;
            self.offset = 0;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end_block * BLOCK_BITS + self.end_offset)
            - (self.block * BLOCK_BITS + self.offset);
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for BitCursor<'_> {
    fn next_back(&mut self) -> Option<bool> {
        if self.at_end() {
            return None;
        }
        if self.end_offset == 0 {
            self.end_block -= 1;
            self.end_offset = BLOCK_BITS - 1;
        } else {
            self.end_offset -= 1;
        }
        Some(bit_at(self.blocks[self.end_block], self.end_offset))
    }
}

impl ExactSizeIterator for BitCursor<'_> {}

/// Lending cursor over the live bits of a container.
///
/// Each step yields a [`BitRef`] proxy, so assignment through the cursor
/// writes back into the owning block. Not an `Iterator`: the proxy borrows
/// the cursor, which is exactly what makes the write-back sound.
#[derive(Debug)]
pub struct BitCursorMut<'a> {
    blocks: &'a mut [Block],
    block: usize,
    offset: usize,
    remaining: usize,
}

impl<'a> BitCursorMut<'a> {
    pub(crate) fn new(blocks: &'a mut [Block], len_bits: usize) -> Self {
        debug_assert!(len_bits <= blocks.len() * BLOCK_BITS);
        BitCursorMut {
            blocks,
            block: 0,
            offset: 0,
            remaining: len_bits,
        }
    }

    /// Bits not yet visited.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Proxy for the next bit, advancing the cursor. `None` once every
    /// live bit has been visited.
    pub fn next_ref(&mut self) -> Option<BitRef<'_>> {
        if self.remaining == 0 {
            return None;
        }
        let (block, offset) = (self.block, self.offset);
        self.offset += 1;
        if self.offset == BLOCK_BITS {
            self.block += 1;
            self.offset = 0;
        }
        self.remaining -= 1;
        Some(BitRef::new(&mut self.blocks[block], offset))
    }

    /// Proxy for the current bit without advancing. Fails once the cursor
    /// is exhausted; dereferencing a spent cursor is a usage bug.
    pub fn peek_ref(&mut self) -> Result<BitRef<'_>, SeqError> {
        if self.remaining == 0 {
            return Err(SeqError::other("cursor dereferenced past the end"));
        }
        Ok(BitRef::new(&mut self.blocks[self.block], self.offset))
    }
}
