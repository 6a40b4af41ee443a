//! Free-function arithmetic on bit blocks.
//!
//! A [`Block`] is the fixed-width word used as physical storage for up to
//! [`BLOCK_BITS`] logical booleans. These functions are pure; range checks
//! against a container's size or capacity are the caller's responsibility.

/// Physical storage word for packed bits.
pub type Block = u64;

/// Number of logical bits per [`Block`].
pub const BLOCK_BITS: usize = Block::BITS as usize;

/// Value of bit `n` of `block`. `n` must be below [`BLOCK_BITS`].
#[inline]
pub fn bit_at(block: Block, n: usize) -> bool {
    debug_assert!(n < BLOCK_BITS);
    (block >> n) & 1 == 1
}

/// Index of the block holding logical bit position `pos`.
#[inline]
pub fn block_index(pos: usize) -> usize {
    pos / BLOCK_BITS
}

/// Offset of logical bit position `pos` within its block.
#[inline]
pub fn bit_offset(pos: usize) -> usize {
    pos % BLOCK_BITS
}

/// Number of whole blocks needed to store `bit_count` bits.
#[inline]
pub fn blocks_needed(bit_count: usize) -> usize {
    bit_count.div_ceil(BLOCK_BITS)
}

/// Writes bit `n` of `block` without touching the other bits.
#[inline]
pub fn write_bit(block: &mut Block, n: usize, value: bool) {
    debug_assert!(n < BLOCK_BITS);
    if value {
        *block |= 1 << n;
    } else {
        *block &= !(1 << n);
    }
}

/// Mask selecting the low `n` bits of a block, `n <= BLOCK_BITS`.
#[inline]
pub fn low_mask(n: usize) -> Block {
    debug_assert!(n <= BLOCK_BITS);
    if n == BLOCK_BITS { !0 } else { (1 << n) - 1 }
}

/// Copies the first `bit_count` bits of `src` into `dst`: whole blocks with
/// a bulk slice copy, then a masked store for the partial block. Bits of
/// `dst` past `bit_count` keep their prior value.
pub fn copy_bits(dst: &mut [Block], src: &[Block], bit_count: usize) {
    let full = bit_count / BLOCK_BITS;
    dst[..full].copy_from_slice(&src[..full]);

    let tail = bit_count % BLOCK_BITS;
    if tail != 0 {
        let mask = low_mask(tail);
        dst[full] = (dst[full] & !mask) | (src[full] & mask);
    }
}
