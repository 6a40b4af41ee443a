use crate::SeqError;

/// Common capability surface shared by every container in the workspace.
///
/// The LIFO stack adapter consumes this generically, so the element
/// containers and the bit-packed containers stay distinct types with
/// distinct storage while presenting one contract.
pub trait Sequence {
    type Item;

    /// Number of live elements.
    fn len(&self) -> usize;

    /// Physical capacity in elements.
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an element; propagates allocation or capacity failure.
    fn push_back(&mut self, value: Self::Item) -> Result<(), SeqError>;

    /// Removes the element at `pos`, shifting everything after it down by
    /// one. Returns `false` when `pos` is out of range: nothing to erase is
    /// a valid outcome, not an error.
    fn erase(&mut self, pos: usize) -> bool;

    /// Last live element; `OutOfRange` when empty.
    fn back(&self) -> Result<Self::Item, SeqError>;

    fn clear(&mut self);

    /// O(1) exchange of contents with `other`.
    fn swap_with(&mut self, other: &mut Self);

    /// Silent verifier: reports whether internal invariants hold.
    fn is_valid(&self) -> bool;
}
