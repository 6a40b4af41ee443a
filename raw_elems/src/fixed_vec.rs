//! Fixed-capacity element container with inline storage.

use std::fmt;
use std::io;
use std::mem;

use bytemuck::Pod;
use seq_core::{POISON_BYTE, SeqError, Sequence, poison_enabled};

/// Fixed-capacity counterpart of [`DynVec`](crate::DynVec).
///
/// Storage is an inline `[T; N]`: no allocation, no growth. `push_back`
/// past `N` and `resize` beyond `N` fail with `BadAlloc`. Everything
/// else mirrors the growable form so the two are interchangeable behind
/// `seq_core::Sequence`.
#[derive(Debug, Clone)]
pub struct FixedVec<T: Pod, const N: usize> {
    buf: [T; N],
    len: usize,
    valid: bool,
}

impl<T: Pod, const N: usize> FixedVec<T, N> {
    /// Capacity in elements, fixed at compile time.
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        let mut v = FixedVec {
            buf: [T::zeroed(); N],
            len: 0,
            valid: true,
        };
        if poison_enabled() {
            v.poison_region(0, N);
        }
        v
    }

    /// Container of `n` elements, each a copy of `value`. Fails with
    /// `BadAlloc` when `n` exceeds the capacity.
    pub fn with_len(n: usize, value: T) -> Result<Self, SeqError> {
        let mut v = FixedVec::new();
        if n > N {
            v.valid = false;
            return Err(SeqError::bad_alloc());
        }
        v.buf[..n].fill(value);
        v.len = n;
        Ok(v)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn get(&self, pos: usize) -> Result<&T, SeqError> {
        self.check()?;
        if pos >= self.len {
            return Err(SeqError::out_of_range(pos, self.len));
        }
        Ok(&self.buf[pos])
    }

    pub fn get_mut(&mut self, pos: usize) -> Result<&mut T, SeqError> {
        self.check()?;
        if pos >= self.len {
            return Err(SeqError::out_of_range(pos, self.len));
        }
        Ok(&mut self.buf[pos])
    }

    pub fn write(&mut self, pos: usize, value: T) -> Result<(), SeqError> {
        *self.get_mut(pos)? = value;
        Ok(())
    }

    pub fn front(&self) -> Result<T, SeqError> {
        self.get(0).copied()
    }

    pub fn back(&self) -> Result<T, SeqError> {
        self.check()?;
        if self.len == 0 {
            return Err(SeqError::out_of_range(0, 0));
        }
        Ok(self.buf[self.len - 1])
    }

    /// Appends an element. Fails with `BadAlloc` when full.
    pub fn push_back(&mut self, value: T) -> Result<(), SeqError> {
        self.check()?;
        if self.len == N {
            return Err(SeqError::bad_alloc());
        }
        self.buf[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Removes the element at `pos`, shifting everything after it left by
    /// one. Returns `false` when `pos` is out of range.
    pub fn erase(&mut self, pos: usize) -> bool {
        debug_assert!(self.is_valid());
        if pos >= self.len {
            return false;
        }
        self.buf.copy_within(pos + 1..self.len, pos);
        self.len -= 1;
        if poison_enabled() {
            self.poison_region(self.len, self.len + 1);
        }
        true
    }

    /// Changes the logical size within the fixed capacity, filling newly
    /// exposed slots with `value`.
    pub fn resize(&mut self, n: usize, value: T) -> Result<(), SeqError> {
        self.check()?;
        if n > N {
            return Err(SeqError::bad_alloc());
        }
        if n > self.len {
            self.buf[self.len..n].fill(value);
        } else if poison_enabled() {
            self.poison_region(n, self.len);
        }
        self.len = n;
        Ok(())
    }

    pub fn fill(&mut self, value: T) -> Result<(), SeqError> {
        self.check()?;
        self.buf[..self.len].fill(value);
        Ok(())
    }

    /// Resets the length. The inline buffer stays; debug builds re-poison it.
    pub fn clear(&mut self) {
        self.len = 0;
        if poison_enabled() {
            self.poison_region(0, N);
        }
    }

    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(&mut self.buf, &mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.valid, &mut other.valid);
    }

    pub fn is_valid(&self) -> bool {
        self.valid && self.len <= N
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buf[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf[..self.len]
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    fn poison_region(&mut self, start: usize, end: usize) {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut self.buf[start..end]);
        bytes.fill(POISON_BYTE);
    }

    fn is_poisoned(&self, pos: usize) -> bool {
        bytemuck::bytes_of(&self.buf[pos])
            .iter()
            .all(|&b| b == POISON_BYTE)
    }

    fn check(&self) -> Result<(), SeqError> {
        if poison_enabled() && !self.is_valid() {
            return Err(SeqError::invalid_object());
        }
        Ok(())
    }
}

impl<T: Pod + fmt::Debug, const N: usize> FixedVec<T, N> {
    /// Diagnostic snapshot, same layout as the growable form's.
    pub fn dump<W: io::Write>(&self, sink: &mut W) -> Result<(), SeqError> {
        writeln!(sink, "-------------------")?;
        writeln!(sink, "FixedVec<{}, {N}>:", core::any::type_name::<T>())?;
        writeln!(
            sink,
            "status: {}",
            if self.is_valid() { "ok" } else { "FAIL" }
        )?;
        writeln!(sink, "{{")?;
        writeln!(sink, "    size: {}", self.len)?;
        writeln!(sink, "    capacity: {N}")?;
        writeln!(sink, "    valid flag: {}", self.valid)?;
        writeln!(sink)?;
        for i in 0..self.len {
            writeln!(sink, "    * [{i}] = {:?}", self.buf[i])?;
        }
        for i in self.len..N {
            if poison_enabled() && !self.is_poisoned(i) {
                writeln!(sink, "      [{i}] = {:?}    // not poison!", self.buf[i])?;
            } else {
                writeln!(sink, "      [{i}] = {:?}", self.buf[i])?;
            }
        }
        writeln!(sink, "}}")?;
        writeln!(sink, "-------------------")?;
        Ok(())
    }
}

impl<T: Pod, const N: usize> Default for FixedVec<T, N> {
    fn default() -> Self {
        FixedVec::new()
    }
}

impl<T: Pod + PartialEq, const N: usize> PartialEq for FixedVec<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Pod + Eq, const N: usize> Eq for FixedVec<T, N> {}

impl<T: Pod, const N: usize> core::ops::Index<usize> for FixedVec<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("index out of bounds")
    }
}

impl<T: Pod, const N: usize> core::ops::IndexMut<usize> for FixedVec<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index).expect("index out of bounds")
    }
}

impl<'a, T: Pod, const N: usize> IntoIterator for &'a FixedVec<T, N> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Pod, const N: usize> Sequence for FixedVec<T, N> {
    type Item = T;

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        N
    }

    fn push_back(&mut self, value: T) -> Result<(), SeqError> {
        FixedVec::push_back(self, value)
    }

    fn erase(&mut self, pos: usize) -> bool {
        FixedVec::erase(self, pos)
    }

    fn back(&self) -> Result<T, SeqError> {
        FixedVec::back(self)
    }

    fn clear(&mut self) {
        FixedVec::clear(self)
    }

    fn swap_with(&mut self, other: &mut Self) {
        FixedVec::swap_with(self, other)
    }

    fn is_valid(&self) -> bool {
        FixedVec::is_valid(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_until_full_then_bad_alloc() {
        let mut v = FixedVec::<u32, 4>::new();
        for i in 0..4u32 {
            v.push_back(i).unwrap();
        }
        assert!(matches!(v.push_back(99), Err(SeqError::BadAlloc { .. })));
        assert_eq!(v.len(), 4);
        assert_eq!(v.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn zero_capacity_rejects_every_push() {
        let mut v = FixedVec::<u8, 0>::new();
        assert_eq!(v.capacity(), 0);
        assert!(matches!(v.push_back(1), Err(SeqError::BadAlloc { .. })));
        assert!(v.is_valid());
    }

    #[test]
    fn with_len_overflow_fails_and_marks_invalid() {
        let err = FixedVec::<u16, 2>::with_len(3, 0).unwrap_err();
        assert!(matches!(err, SeqError::BadAlloc { .. }));

        let v = FixedVec::<u16, 8>::with_len(5, 7).unwrap();
        assert_eq!(v.as_slice(), &[7; 5]);
    }

    #[test]
    fn out_of_range_access_fails() {
        let empty = FixedVec::<u32, 4>::new();
        assert!(matches!(
            empty.get(0),
            Err(SeqError::OutOfRange { index: 0, len: 0, .. })
        ));
        assert!(empty.back().is_err());

        let mut v = FixedVec::<u32, 4>::with_len(3, 7).unwrap();
        assert!(matches!(
            v.get(3),
            Err(SeqError::OutOfRange { index: 3, len: 3, .. })
        ));
        assert!(matches!(v.get_mut(4), Err(SeqError::OutOfRange { .. })));
        assert!(matches!(v.write(3, 1), Err(SeqError::OutOfRange { .. })));
        assert!(v.get(2).is_ok());
    }

    #[test]
    fn erase_shifts_and_resize_bounds() -> Result<(), SeqError> {
        let mut v = FixedVec::<i64, 8>::new();
        for i in 0..6 {
            v.push_back(i * 10)?;
        }
        assert!(v.erase(1));
        assert_eq!(v.as_slice(), &[0, 20, 30, 40, 50]);
        assert!(!v.erase(5));

        v.resize(8, -1)?;
        assert_eq!(v.as_slice(), &[0, 20, 30, 40, 50, -1, -1, -1]);
        assert!(matches!(v.resize(9, 0), Err(SeqError::BadAlloc { .. })));
        Ok(())
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut v = FixedVec::<u32, 4>::with_len(3, 1).unwrap();
        v.clear();
        assert!(v.is_empty());
        assert_eq!(v.capacity(), 4);
        assert!(v.push_back(5).is_ok());
    }

    #[test]
    fn swap_exchanges_contents() -> Result<(), SeqError> {
        let mut a = FixedVec::<u8, 4>::with_len(2, 1)?;
        let mut b = FixedVec::<u8, 4>::with_len(4, 9)?;
        a.swap_with(&mut b);
        assert_eq!(a.as_slice(), &[9, 9, 9, 9]);
        assert_eq!(b.as_slice(), &[1, 1]);
        Ok(())
    }

    #[cfg(debug_assertions)]
    #[test]
    fn erased_slot_is_poisoned_in_dump() -> Result<(), SeqError> {
        let mut v = FixedVec::<u32, 2>::new();
        v.push_back(5)?;
        v.push_back(6)?;
        v.erase(1);

        let mut out = Vec::new();
        v.dump(&mut out)?;
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("[1] = {}", 0xAAAA_AAAAu32)));
        assert!(!text.contains("not poison"));
        Ok(())
    }
}
