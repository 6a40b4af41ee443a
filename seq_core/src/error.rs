use core::panic::Location;
use std::fmt;

use thiserror::Error;

/// Source location an error originated from, captured with
/// [`#[track_caller]`](core::panic::Location) at the construction site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct At {
    file: &'static str,
    line: u32,
}

impl At {
    #[track_caller]
    pub fn here() -> Self {
        let loc = Location::caller();
        At {
            file: loc.file(),
            line: loc.line(),
        }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for At {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Shared error taxonomy for every container in the workspace.
///
/// No operation recovers from an error internally; every failure is raised
/// to the immediate caller. The one deliberate exception is `erase`, which
/// reports an out-of-range position as `false` rather than an error.
#[derive(Debug, Error)]
pub enum SeqError {
    /// Allocation failed or a fixed capacity was exceeded.
    #[error("allocation failed or capacity exhausted ({at})")]
    BadAlloc { at: At },

    /// Index at or past the logical size.
    #[error("index {index} out of range for length {len} ({at})")]
    OutOfRange { index: usize, len: usize, at: At },

    /// Malformed input parameter.
    #[error("invalid argument: {what} ({at})")]
    InvalidArgument { what: &'static str, at: At },

    /// A container whose internal invariants are broken was used.
    /// Signals a usage bug; pair with `dump` for diagnosis.
    #[error("container invariants violated ({at})")]
    InvalidObject { at: At },

    /// Cursor misuse and other conditions outside the taxonomy above.
    #[error("{what} ({at})")]
    Other { what: &'static str, at: At },

    /// Failure of the diagnostic dump sink.
    #[error("dump sink error: {0}")]
    Io(#[from] std::io::Error),
}

impl SeqError {
    #[track_caller]
    pub fn bad_alloc() -> Self {
        SeqError::BadAlloc { at: At::here() }
    }

    #[track_caller]
    pub fn out_of_range(index: usize, len: usize) -> Self {
        SeqError::OutOfRange {
            index,
            len,
            at: At::here(),
        }
    }

    #[track_caller]
    pub fn invalid_argument(what: &'static str) -> Self {
        SeqError::InvalidArgument {
            what,
            at: At::here(),
        }
    }

    #[track_caller]
    pub fn invalid_object() -> Self {
        SeqError::InvalidObject { at: At::here() }
    }

    #[track_caller]
    pub fn other(what: &'static str) -> Self {
        SeqError::Other {
            what,
            at: At::here(),
        }
    }
}
