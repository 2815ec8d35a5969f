//! The range hierarchy.
//!
//! A range is a non-owning cursor over a container. The tiers nest:
//!
//! ```text
//! InputRange ⊂ ForwardRange ⊂ BidirectionalRange ⊂ RandomAccessRange ⊂ ContiguousRange
//! ```
//!
//! Accessing the front or back of an empty range is a precondition breach
//! and panics. Mutating a container invalidates its ranges, which the borrow
//! checker enforces.

use std::marker::PhantomData;

/// Single-pass traversal.
pub trait InputRange<'a> {
    /// Element type.
    type Item: 'a;

    /// Returns true if no positions remain.
    fn is_empty(&self) -> bool;

    /// Drops the front position.
    ///
    /// # Panics
    /// Panics if the range is empty.
    fn pop_front(&mut self);

    /// Borrows the front element.
    ///
    /// # Panics
    /// Panics if the range is empty.
    fn view_front(&self) -> &'a Self::Item;

    /// Copies the front element.
    ///
    /// # Panics
    /// Panics if the range is empty.
    fn take_front(&self) -> Self::Item
    where
        Self::Item: Clone,
    {
        self.view_front().clone()
    }

    /// Adapts the range into an iterator over borrowed elements.
    fn elements(self) -> Elements<'a, Self>
    where
        Self: Sized,
    {
        Elements {
            range: self,
            _marker: PhantomData,
        }
    }
}

/// Multi-pass traversal: copying the range snapshots its position.
pub trait ForwardRange<'a>: InputRange<'a> + Clone {
    /// Snapshot of the current position.
    #[must_use]
    fn save(&self) -> Self {
        self.clone()
    }
}

/// Traversal from both ends.
pub trait BidirectionalRange<'a>: ForwardRange<'a> {
    /// Drops the back position.
    ///
    /// # Panics
    /// Panics if the range is empty.
    fn pop_back(&mut self);

    /// Borrows the back element.
    ///
    /// # Panics
    /// Panics if the range is empty.
    fn view_back(&self) -> &'a Self::Item;

    /// Copies the back element.
    ///
    /// # Panics
    /// Panics if the range is empty.
    fn take_back(&self) -> Self::Item
    where
        Self::Item: Clone,
    {
        self.view_back().clone()
    }
}

/// Indexed access relative to the current front.
pub trait RandomAccessRange<'a>: BidirectionalRange<'a> {
    /// Number of remaining positions.
    fn size(&self) -> usize;

    /// Returns true if `index` addresses a remaining position.
    fn check(&self, index: usize) -> bool {
        index < self.size()
    }

    /// Borrows the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    fn view(&self, index: usize) -> &'a Self::Item;

    /// Copies the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    fn get(&self, index: usize) -> Self::Item
    where
        Self::Item: Clone,
    {
        self.view(index).clone()
    }
}

/// Remaining positions laid out contiguously in memory.
pub trait ContiguousRange<'a>: RandomAccessRange<'a> {
    /// The remaining elements.
    fn as_slice(&self) -> &'a [Self::Item];
}

/// Input range over an associative container, exposing the key of the front
/// element alongside the element itself.
pub trait AssociativeRange<'a>: InputRange<'a> {
    /// Key type.
    type Key: 'a;

    /// Borrows the front key.
    ///
    /// # Panics
    /// Panics if the range is empty.
    fn view_key_front(&self) -> &'a Self::Key;

    /// Copies the front key.
    ///
    /// # Panics
    /// Panics if the range is empty.
    fn take_key_front(&self) -> Self::Key
    where
        Self::Key: Clone,
    {
        self.view_key_front().clone()
    }
}

/// A container that can be traversed with a range.
pub trait Iterable {
    /// Element type.
    type Element;

    /// Range type produced by [`Iterable::range`].
    type Range<'a>: InputRange<'a, Item = Self::Element>
    where
        Self: 'a;

    /// Creates a fresh range over the whole container.
    fn range(&self) -> Self::Range<'_>;

    /// Number of elements.
    fn size(&self) -> usize;
}

/// Iterator adapter returned by [`InputRange::elements`].
#[derive(Clone, Debug)]
pub struct Elements<'a, R> {
    range: R,
    _marker: PhantomData<&'a ()>,
}

impl<'a, R: InputRange<'a>> Iterator for Elements<'a, R> {
    type Item = &'a R::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.range.is_empty() {
            return None;
        }
        let front = self.range.view_front();
        self.range.pop_front();
        Some(front)
    }
}

/// Contiguous range over a slice. Used by the vector and usable on its own.
#[derive(Debug)]
pub struct SliceRange<'a, T> {
    slice: &'a [T],
}

impl<T> Clone for SliceRange<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceRange<'_, T> {}

impl<'a, T> SliceRange<'a, T> {
    /// Creates a range over every element of `slice`.
    #[must_use]
    pub fn new(slice: &'a [T]) -> Self {
        Self { slice }
    }
}

impl<'a, T> InputRange<'a> for SliceRange<'a, T> {
    type Item = T;

    fn is_empty(&self) -> bool {
        self.slice.is_empty()
    }

    fn pop_front(&mut self) {
        assert!(!self.slice.is_empty(), "pop_front on an empty range");
        self.slice = &self.slice[1..];
    }

    fn view_front(&self) -> &'a T {
        match self.slice.first() {
            Some(front) => front,
            None => panic!("view_front on an empty range"),
        }
    }
}

impl<'a, T> ForwardRange<'a> for SliceRange<'a, T> {}

impl<'a, T> BidirectionalRange<'a> for SliceRange<'a, T> {
    fn pop_back(&mut self) {
        assert!(!self.slice.is_empty(), "pop_back on an empty range");
        self.slice = &self.slice[..self.slice.len() - 1];
    }

    fn view_back(&self) -> &'a T {
        match self.slice.last() {
            Some(back) => back,
            None => panic!("view_back on an empty range"),
        }
    }
}

impl<'a, T> RandomAccessRange<'a> for SliceRange<'a, T> {
    fn size(&self) -> usize {
        self.slice.len()
    }

    fn view(&self, index: usize) -> &'a T {
        match self.slice.get(index) {
            Some(item) => item,
            None => panic!("index {index} out of range of size {}", self.slice.len()),
        }
    }
}

impl<'a, T> ContiguousRange<'a> for SliceRange<'a, T> {
    fn as_slice(&self) -> &'a [T] {
        self.slice
    }
}
