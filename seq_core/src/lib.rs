//! Shared foundation for the container crates: the error taxonomy, the
//! [`Sequence`] capability trait consumed by the stack adapter, and the
//! debug poison constants.

pub mod error;
pub mod poison;
pub mod sequence;

pub use error::{At, SeqError};
pub use poison::{POISON_BIT, POISON_BYTE, poison_enabled};
pub use sequence::Sequence;
