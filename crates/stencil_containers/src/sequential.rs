//! Operations shared by sequence containers.
//!
//! Vector, list and queue opt in explicitly; every method is written against
//! the range contract.

use std::cmp::Ordering;
use std::hash::Hash;

use crate::hasher;
use crate::range::{InputRange, Iterable};

/// Searching, equality, ordering and hashing for sequences.
pub trait SequentialOps: Iterable {
    /// Borrows the first element equal to `value`.
    fn find_first(&self, value: &Self::Element) -> Option<&Self::Element>
    where
        Self::Element: PartialEq,
    {
        self.range().elements().find(|v| *v == value)
    }

    /// Returns true if some element equals `value`.
    fn contains(&self, value: &Self::Element) -> bool
    where
        Self::Element: PartialEq,
    {
        self.find_first(value).is_some()
    }

    /// Same length and pairwise equal elements.
    fn equal(&self, other: &Self) -> bool
    where
        Self::Element: PartialEq,
    {
        self.size() == other.size()
            && self
                .range()
                .elements()
                .zip(other.range().elements())
                .all(|(a, b)| a == b)
    }

    /// Lexicographic comparison. With an equal common prefix the longer
    /// sequence is greater.
    fn compare(&self, other: &Self) -> Ordering
    where
        Self::Element: Ord,
    {
        let mut left = self.range();
        let mut right = other.range();
        loop {
            match (left.is_empty(), right.is_empty()) {
                (true, true) => return Ordering::Equal,
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                (false, false) => {}
            }
            match left.view_front().cmp(right.view_front()) {
                Ordering::Equal => {
                    left.pop_front();
                    right.pop_front();
                }
                unequal => return unequal,
            }
        }
    }

    /// Incremental rotate-xor hash over the elements in order.
    fn hash_code(&self) -> u64
    where
        Self::Element: Hash,
    {
        hasher::sequential(self.range().elements())
    }
}
