//! # raw_elems
//!
//! Element containers over plain-old-data buffers.
//!
//! [`DynVec`] owns a heap buffer and grows by doubling; [`FixedVec`] keeps
//! its storage inline behind a const capacity. Both track a logical size
//! separate from the capacity, keep the unused region initialized (and
//! poison-stamped in debug builds), and implement `seq_core::Sequence` so
//! the stack adapter can sit on either.
//!
//! ```rust
//! use raw_elems::DynVec;
//!
//! let mut v = DynVec::<u32>::new();
//! v.push_back(10).unwrap();
//! v.push_back(20).unwrap();
//! v.push_back(30).unwrap();
//!
//! assert!(v.erase(1));
//! assert_eq!(v.as_slice(), &[10, 30]);
//! ```

pub mod dyn_vec;
pub mod fixed_vec;

pub use dyn_vec::DynVec;
pub use fixed_vec::FixedVec;
