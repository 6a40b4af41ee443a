//! # packed_bools
//!
//! Bit-packed boolean containers: one logical boolean per bit inside
//! fixed-width [`Block`](bit_ops::Block) words.
//!
//! [`BoolVec`] is the growable form, [`BoolArray`] the fixed-capacity one.
//! Both present the same external contract as the element containers in
//! `raw_elems` (size/capacity/erase-with-shift/iteration), so the stack
//! adapter consumes either through `seq_core::Sequence`.
//!
//! ```rust
//! use packed_bools::BoolVec;
//!
//! let mut bits = BoolVec::new();
//! bits.push_back(true).unwrap();
//! bits.push_back(false).unwrap();
//! bits.push_back(true).unwrap();
//!
//! assert_eq!(bits.count(), 2);
//! bits.flip(1).unwrap();
//! assert_eq!(bits.count(), 3);
//!
//! // Erase shifts later bits down, preserving order.
//! assert!(bits.erase(0));
//! assert_eq!(bits.len(), 2);
//! assert!(bits.get(0).unwrap());
//! ```

pub mod bit_ops;
pub mod bit_ref;
pub mod bool_array;
pub mod bool_vec;
pub mod cursor;

pub use bit_ops::{BLOCK_BITS, Block};
pub use bit_ref::BitRef;
pub use bool_array::BoolArray;
pub use bool_vec::BoolVec;
pub use cursor::{BitCursor, BitCursorMut};
