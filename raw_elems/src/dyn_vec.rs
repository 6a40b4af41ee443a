//! Growable element container over an owned, fully-initialized buffer.

use std::fmt;
use std::io;
use std::mem;

use bytemuck::Pod;
use seq_core::{POISON_BYTE, SeqError, Sequence, poison_enabled};

/// Growable container of `T` with explicit logical-size tracking.
///
/// The backing buffer always holds exactly `capacity()` initialized
/// elements; the first `len()` of them are live. Growth allocates a fresh
/// buffer, copies the live elements and swaps it in, doubling the capacity
/// for amortized O(1) `push_back`. `T: Pod` makes the copies plain byte
/// moves and lets debug builds stamp the unused region with a poison byte
/// pattern for corruption detection.
#[derive(Debug)]
pub struct DynVec<T: Pod> {
    buf: Box<[T]>,
    len: usize,
    valid: bool,
}

impl<T: Pod> DynVec<T> {
    pub fn new() -> Self {
        DynVec {
            buf: Vec::new().into_boxed_slice(),
            len: 0,
            valid: true,
        }
    }

    /// Container of `n` elements, each a copy of `value`.
    pub fn with_len(n: usize, value: T) -> Result<Self, SeqError> {
        let mut v = DynVec::new();
        if let Err(e) = v.resize(n, value) {
            v.valid = false;
            return Err(e);
        }
        Ok(v)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bounds-checked element access.
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

    /// Overwrites the element at `pos`.
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

    /// Appends an element, growing the buffer when at capacity.
    pub fn push_back(&mut self, value: T) -> Result<(), SeqError> {
        self.check()?;
        self.alloc(self.len + 1)?;
        self.buf[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Appends every element of `values`.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<(), SeqError> {
        self.check()?;
        self.alloc(self.len + values.len())?;
        self.buf[self.len..self.len + values.len()].copy_from_slice(values);
        self.len += values.len();
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

    /// Grows or shrinks to exactly `n` elements, filling newly exposed
    /// slots with `value`. Reallocates to the tight capacity.
    pub fn resize(&mut self, n: usize, value: T) -> Result<(), SeqError> {
        self.check()?;
        self.shrink_alloc(n)?;
        let live = self.len;
        self.buf[live..n].fill(value);
        self.len = n;
        Ok(())
    }

    /// Sets every live element to `value`.
    pub fn fill(&mut self, value: T) -> Result<(), SeqError> {
        self.check()?;
        self.buf[..self.len].fill(value);
        Ok(())
    }

    /// Ensures capacity for at least `n` elements. Never shrinks.
    pub fn reserve(&mut self, n: usize) -> Result<(), SeqError> {
        self.check()?;
        self.alloc(n)
    }

    /// Releases the buffer and resets the length.
    pub fn clear(&mut self) {
        self.buf = Vec::new().into_boxed_slice();
        self.len = 0;
    }

    /// O(1) exchange of buffers, lengths and validity flags.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(&mut self.buf, &mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.valid, &mut other.valid);
    }

    /// Silent verifier. The boxed buffer is the capacity, so "buffer
    /// present iff capacity nonzero" holds by construction.
    pub fn is_valid(&self) -> bool {
        self.valid && self.len <= self.buf.len()
    }

    /// Live elements as a slice.
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

    // Reallocates to exactly `n` slots, truncating the length if needed.
    // Allocate-copy-swap keeps the old buffer intact until the copy is done.
    fn shrink_alloc(&mut self, n: usize) -> Result<(), SeqError> {
        let new_len = self.len.min(n);

        let mut tmp: Vec<T> = Vec::new();
        tmp.try_reserve_exact(n).map_err(|_| SeqError::bad_alloc())?;
        tmp.resize(n, T::zeroed());
        tmp[..new_len].copy_from_slice(&self.buf[..new_len]);

        self.buf = tmp.into_boxed_slice();
        self.len = new_len;

        if poison_enabled() {
            self.poison_region(new_len, n);
        }
        Ok(())
    }

    // Doubling growth to cover at least `n` elements.
    fn alloc(&mut self, n: usize) -> Result<(), SeqError> {
        if n <= self.buf.len() {
            return Ok(());
        }
        let mut new_cap = self.buf.len().max(1);
        while new_cap < n {
            new_cap *= 2;
        }
        self.shrink_alloc(new_cap)
    }

    fn check(&self) -> Result<(), SeqError> {
        if poison_enabled() && !self.is_valid() {
            return Err(SeqError::invalid_object());
        }
        Ok(())
    }
}

impl<T: Pod + fmt::Debug> DynVec<T> {
    /// Writes a structured snapshot to `sink`: header, live elements
    /// marked with `*`, then the unused capacity region with a
    /// poison-consistency annotation. Diagnostic output, not a format
    /// contract.
    pub fn dump<W: io::Write>(&self, sink: &mut W) -> Result<(), SeqError> {
        writeln!(sink, "-------------------")?;
        writeln!(sink, "DynVec<{}>:", core::any::type_name::<T>())?;
        writeln!(
            sink,
            "status: {}",
            if self.is_valid() { "ok" } else { "FAIL" }
        )?;
        writeln!(sink, "{{")?;
        writeln!(sink, "    size: {}", self.len)?;
        writeln!(sink, "    capacity: {}", self.capacity())?;
        writeln!(sink, "    valid flag: {}", self.valid)?;
        writeln!(sink)?;
        for i in 0..self.len {
            writeln!(sink, "    * [{i}] = {:?}", self.buf[i])?;
        }
        for i in self.len..self.capacity() {
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

impl<T: Pod> Default for DynVec<T> {
    fn default() -> Self {
        DynVec::new()
    }
}

impl<T: Pod> Clone for DynVec<T> {
    /// Deep copy with tight capacity. The validity flag carries over, so
    /// cloning a corrupted container does not launder it back to valid.
    fn clone(&self) -> Self {
        // Clone cannot report allocation failure; like Vec, it aborts.
        let mut tmp: Vec<T> = vec![T::zeroed(); self.len];
        tmp.copy_from_slice(self.as_slice());
        DynVec {
            buf: tmp.into_boxed_slice(),
            len: self.len,
            valid: self.valid,
        }
    }
}

impl<T: Pod + PartialEq> PartialEq for DynVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Pod> core::ops::Index<usize> for DynVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("index out of bounds")
    }
}

impl<T: Pod> core::ops::IndexMut<usize> for DynVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index).expect("index out of bounds")
    }
}

impl<T: Pod> From<&[T]> for DynVec<T> {
    fn from(values: &[T]) -> Self {
        let mut tmp: Vec<T> = vec![T::zeroed(); values.len()];
        tmp.copy_from_slice(values);
        DynVec {
            buf: tmp.into_boxed_slice(),
            len: values.len(),
            valid: true,
        }
    }
}

impl<T: Pod> FromIterator<T> for DynVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        DynVec::from(values.as_slice())
    }
}

impl<'a, T: Pod> IntoIterator for &'a DynVec<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Pod> Sequence for DynVec<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.buf.len()
    }

    fn push_back(&mut self, value: T) -> Result<(), SeqError> {
        DynVec::push_back(self, value)
    }

    fn erase(&mut self, pos: usize) -> bool {
        DynVec::erase(self, pos)
    }

    fn back(&self) -> Result<T, SeqError> {
        DynVec::back(self)
    }

    fn clear(&mut self) {
        DynVec::clear(self)
    }

    fn swap_with(&mut self, other: &mut Self) {
        DynVec::swap_with(self, other)
    }

    fn is_valid(&self) -> bool {
        DynVec::is_valid(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_get_and_index() -> Result<(), SeqError> {
        let mut v = DynVec::<u32>::new();
        assert!(v.is_empty());

        for i in 0..10u32 {
            v.push_back(i * 3)?;
        }
        assert_eq!(v.len(), 10);
        assert_eq!(*v.get(4)?, 12);
        assert_eq!(v[9], 27);

        v[0] = 99;
        assert_eq!(v.front()?, 99);
        assert_eq!(v.back()?, 27);
        Ok(())
    }

    #[test]
    fn out_of_range_access_fails() {
        let v = DynVec::<u64>::new();
        assert!(matches!(
            v.get(0),
            Err(SeqError::OutOfRange { index: 0, len: 0, .. })
        ));

        let v = DynVec::<u64>::with_len(4, 7).unwrap();
        assert!(matches!(
            v.get(4),
            Err(SeqError::OutOfRange { index: 4, len: 4, .. })
        ));
    }

    #[test]
    fn erase_shifts_left() -> Result<(), SeqError> {
        let mut v: DynVec<i32> = (0..8).collect();
        assert!(v.erase(3));
        assert_eq!(v.as_slice(), &[0, 1, 2, 4, 5, 6, 7]);
        assert!(!v.erase(7));
        assert!(v.erase(0));
        assert_eq!(v.as_slice(), &[1, 2, 4, 5, 6, 7]);
        Ok(())
    }

    #[test]
    fn growth_preserves_content_and_doubles() -> Result<(), SeqError> {
        let mut v = DynVec::<u16>::new();
        for i in 0..1000u16 {
            v.push_back(i)?;
        }
        assert!(v.capacity() >= 1000);
        for i in 0..1000usize {
            assert_eq!(*v.get(i)?, i as u16);
        }
        Ok(())
    }

    #[test]
    fn resize_truncates_and_extends() -> Result<(), SeqError> {
        let mut v: DynVec<u8> = (0..10).collect();
        v.resize(4, 0)?;
        assert_eq!(v.as_slice(), &[0, 1, 2, 3]);
        v.resize(7, 9)?;
        assert_eq!(v.as_slice(), &[0, 1, 2, 3, 9, 9, 9]);
        Ok(())
    }

    #[test]
    fn clear_releases_the_buffer() -> Result<(), SeqError> {
        let mut v: DynVec<u32> = (0..100).collect();
        assert!(v.capacity() >= 100);
        v.clear();
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 0);
        assert!(v.is_valid());
        Ok(())
    }

    #[test]
    fn swap_and_clone() -> Result<(), SeqError> {
        let mut a: DynVec<u32> = (0..5).collect();
        let mut b = DynVec::new();
        a.swap_with(&mut b);
        assert!(a.is_empty());
        assert_eq!(b.len(), 5);

        let c = b.clone();
        b[0] = 42;
        assert_eq!(c[0], 0);
        assert_eq!(c.capacity(), 5);
        Ok(())
    }

    #[test]
    fn clone_carries_the_validity_flag() {
        let mut a: DynVec<u32> = (0..4).collect();
        a.valid = false;
        let b = a.clone();
        assert!(!b.is_valid());
        if seq_core::poison_enabled() {
            assert!(matches!(b.get(0), Err(SeqError::InvalidObject { .. })));
        }
    }

    #[test]
    fn extend_and_fill() -> Result<(), SeqError> {
        let mut v = DynVec::<u8>::new();
        v.extend_from_slice(&[1, 2, 3])?;
        v.extend_from_slice(&[4, 5])?;
        assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);

        v.fill(7)?;
        assert_eq!(v.as_slice(), &[7; 5]);
        Ok(())
    }

    #[test]
    fn dump_snapshot_contains_elements() -> Result<(), SeqError> {
        let mut v = DynVec::<u32>::new();
        v.push_back(11)?;
        v.push_back(22)?;

        let mut out = Vec::new();
        v.dump(&mut out)?;
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("DynVec"));
        assert!(text.contains("size: 2"));
        assert!(text.contains("* [0] = 11"));
        assert!(text.contains("* [1] = 22"));
        Ok(())
    }

    #[cfg(debug_assertions)]
    #[test]
    fn unused_region_is_poisoned() -> Result<(), SeqError> {
        let mut v = DynVec::<u32>::new();
        v.reserve(8)?;
        v.push_back(1)?;

        let mut out = Vec::new();
        v.dump(&mut out)?;
        let text = String::from_utf8(out).unwrap();
        // 0xAAAAAAAA for a u32 slot.
        assert!(text.contains(&format!("[1] = {}", 0xAAAA_AAAAu32)));
        assert!(!text.contains("not poison"));
        Ok(())
    }
}
