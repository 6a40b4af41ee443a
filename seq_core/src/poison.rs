//! Debug-build poison discipline.
//!
//! Unused capacity is filled with a recognizable pattern in debug builds so
//! the diagnostic dump can flag out-of-bounds corruption. Release builds
//! skip the fill entirely; the unused region is then simply unspecified.

/// Byte pattern written into the unused region of element containers.
pub const POISON_BYTE: u8 = 0xAA;

/// Bit value written into the unused tail of bit containers.
pub const POISON_BIT: bool = true;

/// Whether poison fills and implicit validity checks are active.
#[inline]
pub const fn poison_enabled() -> bool {
    cfg!(debug_assertions)
}
