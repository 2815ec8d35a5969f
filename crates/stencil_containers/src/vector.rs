//! Fixed-size contiguous vector.
//!
//! Positions are `0..len()`. Indexed access out of range is a precondition
//! breach and panics; [`Vector::check_position`] tests first.

use std::cmp::Ordering;

use crate::range::{Iterable, SliceRange};
use crate::sequential::SequentialOps;

/// Sort direction for [`Vector::sort`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// A sized vector of elements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector<T> {
    elements: Vec<T>,
}

impl<T> Vector<T> {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Creates a vector of `size` default-constructed elements.
    #[must_use]
    pub fn create_size(size: usize) -> Self
    where
        T: Default,
    {
        let mut elements = Vec::with_capacity(size);
        elements.resize_with(size, T::default);
        Self { elements }
    }

    /// Creates a vector of `size` copies of `value`.
    #[must_use]
    pub fn create_set(size: usize, value: &T) -> Self
    where
        T: Clone,
    {
        Self {
            elements: vec![value.clone(); size],
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the vector holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns true if `position` addresses an element.
    #[must_use]
    pub fn check_position(&self, position: usize) -> bool {
        position < self.elements.len()
    }

    /// Borrows the element at `position`.
    ///
    /// # Panics
    /// Panics if `position` is out of range.
    #[must_use]
    pub fn view(&self, position: usize) -> &T {
        assert!(
            self.check_position(position),
            "position {position} out of range of size {}",
            self.len()
        );
        &self.elements[position]
    }

    /// Mutably borrows the element at `position`.
    ///
    /// # Panics
    /// Panics if `position` is out of range.
    pub fn view_mut(&mut self, position: usize) -> &mut T {
        assert!(
            self.check_position(position),
            "position {position} out of range of size {}",
            self.len()
        );
        &mut self.elements[position]
    }

    /// Copies the element at `position`.
    ///
    /// # Panics
    /// Panics if `position` is out of range.
    #[must_use]
    pub fn get(&self, position: usize) -> T
    where
        T: Clone,
    {
        self.view(position).clone()
    }

    /// Replaces the element at `position`, returning the previous one.
    ///
    /// # Panics
    /// Panics if `position` is out of range.
    pub fn set(&mut self, position: usize, value: T) -> T {
        std::mem::replace(self.view_mut(position), value)
    }

    /// Changes the size. New positions are default-constructed; surplus
    /// elements are dropped from the end.
    pub fn resize(&mut self, size: usize)
    where
        T: Default,
    {
        self.elements.resize_with(size, T::default);
    }

    /// Sorts the elements in place.
    pub fn sort(&mut self, order: SortOrder)
    where
        T: Ord,
    {
        match order {
            SortOrder::Ascending => self.elements.sort_unstable(),
            SortOrder::Descending => self.elements.sort_unstable_by(|a, b| b.cmp(a)),
        }
    }

    /// Sorts the elements in place with a custom comparator.
    pub fn sort_by(&mut self, compare: impl FnMut(&T, &T) -> Ordering) {
        self.elements.sort_unstable_by(compare);
    }

    /// Contiguous range over every element.
    #[must_use]
    pub fn range(&self) -> SliceRange<'_, T> {
        SliceRange::new(&self.elements)
    }

    /// The elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Iterates in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(elements: Vec<T>) -> Self {
        Self { elements }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> Iterable for Vector<T> {
    type Element = T;
    type Range<'a>
        = SliceRange<'a, T>
    where
        Self: 'a;

    fn range(&self) -> SliceRange<'_, T> {
        Vector::range(self)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T> SequentialOps for Vector<T> {}
