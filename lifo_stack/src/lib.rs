//! # lifo_stack
//!
//! LIFO adapter over any `seq_core::Sequence` container.
//!
//! The stack owns its container and restricts the interface to top-of-stack
//! operations; the container decides storage, growth and failure behavior.
//! A stack over a fixed-capacity container reports `BadAlloc` when full,
//! one over a growable container keeps accepting pushes.
//!
//! ```rust
//! use lifo_stack::Stack;
//! use raw_elems::DynVec;
//!
//! let mut s: Stack<DynVec<u32>> = Stack::new();
//! s.push(1).unwrap();
//! s.push(2).unwrap();
//!
//! assert_eq!(s.top().unwrap(), 2);
//! s.pop();
//! assert_eq!(s.top().unwrap(), 1);
//! ```

use seq_core::{SeqError, Sequence};

/// Stack over a sequence container `C`.
#[derive(Debug, Clone, Default)]
pub struct Stack<C: Sequence> {
    data: C,
}

impl<C: Sequence + Default> Stack<C> {
    pub fn new() -> Self {
        Stack { data: C::default() }
    }
}

impl<C: Sequence> Stack<C> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Pushes a value on top. Allocation failures from the underlying
    /// container propagate unchanged.
    pub fn push(&mut self, value: C::Item) -> Result<(), SeqError> {
        self.data.push_back(value)
    }

    /// Removes the top value. Popping an empty stack is a no-op; the
    /// return reports whether anything was removed.
    pub fn pop(&mut self) -> bool {
        let len = self.data.len();
        if len == 0 {
            return false;
        }
        self.data.erase(len - 1)
    }

    /// Copy of the top value. Fails with `OutOfRange` when empty.
    pub fn top(&self) -> Result<C::Item, SeqError> {
        self.data.back()
    }

    pub fn clear(&mut self) {
        self.data.clear()
    }

    pub fn swap_with(&mut self, other: &mut Self) {
        self.data.swap_with(&mut other.data)
    }

    pub fn is_valid(&self) -> bool {
        self.data.is_valid()
    }

    /// Consumes the stack, returning the underlying container.
    pub fn into_inner(self) -> C {
        self.data
    }

    /// Borrow of the underlying container, for read-only inspection.
    pub fn as_inner(&self) -> &C {
        &self.data
    }
}

impl<C: Sequence> From<C> for Stack<C> {
    /// Adopts an existing container; its back becomes the top.
    fn from(data: C) -> Self {
        Stack { data }
    }
}
