//! Set algebra written once against the range contract.
//!
//! Any set container providing membership, insertion and removal gets the
//! full algebra. The in-place operations modify `self`; the `create_*`
//! operations leave both operands untouched and return a new set configured
//! like `self`.

use std::hash::Hash;

use crate::hasher;
use crate::range::{InputRange, Iterable};

/// Set algebra over an [`Iterable`] set.
pub trait SetOps: Iterable + Clone + Sized
where
    Self::Element: Clone,
{
    /// Returns true if an element equal to `value` is present.
    fn contains(&self, value: &Self::Element) -> bool;

    /// Inserts `value` if absent. Returns true if inserted.
    fn put(&mut self, value: Self::Element) -> bool;

    /// Removes the element equal to `value`. Returns true if removed.
    fn remove(&mut self, value: &Self::Element) -> bool;

    /// An empty set configured like `self`.
    #[must_use]
    fn create_like(&self) -> Self;

    /// Every element of `self` is in `other`.
    fn subset(&self, other: &Self) -> bool {
        self.size() <= other.size() && self.range().elements().all(|v| other.contains(v))
    }

    /// No element of `self` is in `other`.
    fn disjoint(&self, other: &Self) -> bool {
        !self.range().elements().any(|v| other.contains(v))
    }

    /// Mutual subset.
    fn set_equal(&self, other: &Self) -> bool {
        self.subset(other) && other.subset(self)
    }

    /// Adds every element of `other` (union).
    fn join(&mut self, other: &Self) {
        for v in other.range().elements() {
            self.put(v.clone());
        }
    }

    /// Removes every element of `other` (difference).
    fn subtract(&mut self, other: &Self) {
        for v in other.range().elements() {
            self.remove(v);
        }
    }

    /// Keeps only elements also in `other` (intersection).
    fn intersect(&mut self, other: &Self) {
        let outside: Vec<Self::Element> = self
            .range()
            .elements()
            .filter(|v| !other.contains(v))
            .cloned()
            .collect();
        for v in &outside {
            self.remove(v);
        }
    }

    /// Keeps elements in exactly one of the two sets (symmetric difference).
    fn disjoin(&mut self, other: &Self) {
        for v in other.range().elements() {
            if !self.remove(v) {
                self.put(v.clone());
            }
        }
    }

    /// Union into a new set.
    #[must_use]
    fn create_join(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.join(other);
        result
    }

    /// Difference into a new set.
    #[must_use]
    fn create_difference(&self, other: &Self) -> Self {
        let mut result = self.create_like();
        for v in self.range().elements() {
            if !other.contains(v) {
                result.put(v.clone());
            }
        }
        result
    }

    /// Intersection into a new set.
    #[must_use]
    fn create_intersection(&self, other: &Self) -> Self {
        let mut result = self.create_like();
        for v in self.range().elements() {
            if other.contains(v) {
                result.put(v.clone());
            }
        }
        result
    }

    /// Symmetric difference into a new set.
    #[must_use]
    fn create_disjunction(&self, other: &Self) -> Self {
        let mut result = self.create_difference(other);
        for v in other.range().elements() {
            if !self.contains(v) {
                result.put(v.clone());
            }
        }
        result
    }

    /// Order-independent hash: the seed XORed with every element hash.
    fn set_hash(&self) -> u64
    where
        Self::Element: Hash,
    {
        hasher::unordered(self.range().elements())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashSet;
    use crate::rbtree::TreeSet;

    fn hs(values: &[i32]) -> HashSet<i32> {
        values.iter().copied().collect()
    }

    fn sorted(set: &HashSet<i32>) -> Vec<i32> {
        let mut v: Vec<_> = set.iter().copied().collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn subset_and_disjoint() {
        assert!(hs(&[1, 2]).subset(&hs(&[1, 2, 3])));
        assert!(!hs(&[1, 4]).subset(&hs(&[1, 2, 3])));
        assert!(hs(&[]).subset(&hs(&[])));
        assert!(hs(&[1, 2]).disjoint(&hs(&[3, 4])));
        assert!(!hs(&[1, 2]).disjoint(&hs(&[2, 3])));
    }

    #[test]
    fn in_place_algebra() {
        let (a, b) = (hs(&[1, 2, 3]), hs(&[3, 4]));

        let mut u = a.clone();
        u.join(&b);
        assert_eq!(sorted(&u), vec![1, 2, 3, 4]);

        let mut d = a.clone();
        d.subtract(&b);
        assert_eq!(sorted(&d), vec![1, 2]);

        let mut i = a.clone();
        i.intersect(&b);
        assert_eq!(sorted(&i), vec![3]);

        let mut x = a.clone();
        x.disjoin(&b);
        assert_eq!(sorted(&x), vec![1, 2, 4]);
    }

    #[test]
    fn creating_algebra_leaves_operands() {
        let (a, b) = (hs(&[1, 2, 3]), hs(&[3, 4]));
        assert_eq!(sorted(&a.create_join(&b)), vec![1, 2, 3, 4]);
        assert_eq!(sorted(&a.create_difference(&b)), vec![1, 2]);
        assert_eq!(sorted(&a.create_intersection(&b)), vec![3]);
        assert_eq!(sorted(&a.create_disjunction(&b)), vec![1, 2, 4]);
        assert_eq!(sorted(&a), vec![1, 2, 3]);
        assert_eq!(sorted(&b), vec![3, 4]);
    }

    #[test]
    fn equality_and_hash_are_order_independent() {
        let a = hs(&[1, 2, 3]);
        let b = hs(&[3, 2, 1]);
        assert!(a.set_equal(&b));
        assert_eq!(a.set_hash(), b.set_hash());
        assert!(!a.set_equal(&hs(&[1, 2])));
    }

    #[test]
    fn algebra_works_on_ordered_sets() {
        let a: TreeSet<i32> = [1, 2, 3].into_iter().collect();
        let b: TreeSet<i32> = [2, 3, 4].into_iter().collect();
        let x = a.create_disjunction(&b);
        assert_eq!(x.iter().copied().collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(a.set_hash(), a.clone().set_hash());
    }
}
