//! Red-black tree sets and maps.
//!
//! Nodes live in a dense arena addressed by index. `NIL` plays the role of
//! the black sentinel leaf: it is never stored, and every color query on it
//! reads black. Removal relinks the node out of the tree and then moves the
//! last arena node into the freed slot, so the arena never has holes.
//!
//! Invariants, checked by [`TreeSet::check_invariants`]:
//!
//! - the root is black;
//! - no red node has a red child;
//! - every path from a node down to a leaf crosses the same number of black
//!   nodes;
//! - keys are strictly ordered left to right.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use crate::hasher;
use crate::invariant::InvariantViolation;
use crate::range::{AssociativeRange, ForwardRange, InputRange, Iterable};
use crate::set_ops::SetOps;

const NIL: usize = usize::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

/// Direction within a binary tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

// =============================================================================
// Tree core
// =============================================================================

#[derive(Clone, Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    parent: usize,
    left: usize,
    right: usize,
}

#[derive(Clone, Debug)]
struct Tree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: usize,
}

impl<K, V> Tree<K, V> {
    const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NIL,
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn color(&self, i: usize) -> Color {
        if i == NIL {
            Color::Black
        } else {
            self.nodes[i].color
        }
    }

    fn parent(&self, i: usize) -> usize {
        self.nodes[i].parent
    }

    fn child(&self, i: usize, side: Side) -> usize {
        match side {
            Side::Left => self.nodes[i].left,
            Side::Right => self.nodes[i].right,
        }
    }

    fn set_child(&mut self, i: usize, side: Side, c: usize) {
        match side {
            Side::Left => self.nodes[i].left = c,
            Side::Right => self.nodes[i].right = c,
        }
        if c != NIL {
            self.nodes[c].parent = i;
        }
    }

    fn side_of(&self, i: usize, parent: usize) -> Side {
        if self.nodes[parent].left == i {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Puts `new` where `old` hangs under `parent`.
    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if parent == NIL {
            self.root = new;
            if new != NIL {
                self.nodes[new].parent = NIL;
            }
        } else {
            let side = self.side_of(old, parent);
            self.set_child(parent, side, new);
        }
    }

    /// Rotates `x` down towards `side`; its child on the other side rises.
    fn rotate(&mut self, x: usize, side: Side) {
        let up = side.flip();
        let y = self.child(x, up);
        let inner = self.child(y, side);
        self.set_child(x, up, inner);
        let parent = self.parent(x);
        self.replace_child(parent, x, y);
        self.set_child(y, side, x);
    }

    fn extreme(&self, mut i: usize, side: Side) -> usize {
        if i == NIL {
            return NIL;
        }
        while self.child(i, side) != NIL {
            i = self.child(i, side);
        }
        i
    }

    fn first(&self) -> usize {
        self.extreme(self.root, Side::Left)
    }

    fn last(&self) -> usize {
        self.extreme(self.root, Side::Right)
    }

    /// In-order neighbour of `i` in direction `side`.
    fn step(&self, i: usize, side: Side) -> usize {
        let next = self.child(i, side);
        if next != NIL {
            return self.extreme(next, side.flip());
        }
        let mut i = i;
        let mut parent = self.parent(i);
        while parent != NIL && self.child(parent, side) == i {
            i = parent;
            parent = self.parent(i);
        }
        parent
    }

    fn insert_fixup(&mut self, mut z: usize) {
        while self.color(self.parent(z)) == Color::Red {
            let p = self.parent(z);
            let g = self.parent(p);
            let side = self.side_of(p, g);
            let uncle = self.child(g, side.flip());
            if self.color(uncle) == Color::Red {
                self.nodes[p].color = Color::Black;
                self.nodes[uncle].color = Color::Black;
                self.nodes[g].color = Color::Red;
                z = g;
            } else {
                if z == self.child(p, side.flip()) {
                    z = p;
                    self.rotate(z, side);
                }
                let p = self.parent(z);
                let g = self.parent(p);
                self.nodes[p].color = Color::Black;
                self.nodes[g].color = Color::Red;
                self.rotate(g, side.flip());
            }
        }
        let root = self.root;
        self.nodes[root].color = Color::Black;
    }

    /// Restores the invariants after a black node was unlinked. `x` took its
    /// place (possibly [`NIL`]) under `parent`.
    fn remove_fixup(&mut self, mut x: usize, mut parent: usize) {
        while x != self.root && self.color(x) == Color::Black {
            let side = if self.child(parent, Side::Left) == x {
                Side::Left
            } else {
                Side::Right
            };
            let mut w = self.child(parent, side.flip());
            if self.color(w) == Color::Red {
                self.nodes[w].color = Color::Black;
                self.nodes[parent].color = Color::Red;
                self.rotate(parent, side);
                w = self.child(parent, side.flip());
            }
            if self.color(self.child(w, Side::Left)) == Color::Black
                && self.color(self.child(w, Side::Right)) == Color::Black
            {
                self.nodes[w].color = Color::Red;
                x = parent;
                parent = self.parent(x);
            } else {
                if self.color(self.child(w, side.flip())) == Color::Black {
                    let inner = self.child(w, side);
                    self.nodes[inner].color = Color::Black;
                    self.nodes[w].color = Color::Red;
                    self.rotate(w, side.flip());
                    w = self.child(parent, side.flip());
                }
                self.nodes[w].color = self.nodes[parent].color;
                self.nodes[parent].color = Color::Black;
                let outer = self.child(w, side.flip());
                self.nodes[outer].color = Color::Black;
                self.rotate(parent, side);
                x = self.root;
            }
        }
        if x != NIL {
            self.nodes[x].color = Color::Black;
        }
    }

    /// Unlinks node `z` and frees its arena slot.
    fn delete(&mut self, z: usize) -> (K, V) {
        let (left, right) = (self.nodes[z].left, self.nodes[z].right);
        let (x, x_parent, removed) = if left == NIL || right == NIL {
            let x = if left == NIL { right } else { left };
            let parent = self.parent(z);
            self.replace_child(parent, z, x);
            (x, parent, self.nodes[z].color)
        } else {
            // Successor takes z's place and color.
            let y = self.extreme(right, Side::Left);
            let removed = self.nodes[y].color;
            let x = self.nodes[y].right;
            let x_parent = if self.parent(y) == z {
                y
            } else {
                let y_parent = self.parent(y);
                self.replace_child(y_parent, y, x);
                self.set_child(y, Side::Right, right);
                y_parent
            };
            let parent = self.parent(z);
            self.replace_child(parent, z, y);
            self.set_child(y, Side::Left, left);
            self.nodes[y].color = self.nodes[z].color;
            (x, x_parent, removed)
        };
        if removed == Color::Black {
            self.remove_fixup(x, x_parent);
        }
        self.release(z)
    }

    /// Moves the last arena node into slot `z`, which must be unlinked.
    fn release(&mut self, z: usize) -> (K, V) {
        let last = self.nodes.len() - 1;
        if z != last {
            let moved = &self.nodes[last];
            let (parent, left, right) = (moved.parent, moved.left, moved.right);
            if parent == NIL {
                self.root = z;
            } else if self.nodes[parent].left == last {
                self.nodes[parent].left = z;
            } else {
                self.nodes[parent].right = z;
            }
            if left != NIL {
                self.nodes[left].parent = z;
            }
            if right != NIL {
                self.nodes[right].parent = z;
            }
        }
        let node = self.nodes.swap_remove(z);
        if self.nodes.is_empty() {
            self.root = NIL;
        }
        (node.key, node.value)
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.root = NIL;
    }
}

impl<K: Ord, V> Tree<K, V> {
    fn find(&self, key: &K) -> Option<usize> {
        let mut i = self.root;
        while i != NIL {
            match key.cmp(&self.nodes[i].key) {
                Ordering::Less => i = self.nodes[i].left,
                Ordering::Greater => i = self.nodes[i].right,
                Ordering::Equal => return Some(i),
            }
        }
        None
    }

    /// Inserts a new node. If the key is present nothing changes and the
    /// existing index is returned along with the rejected pair.
    fn insert(&mut self, key: K, value: V) -> Option<(usize, K, V)> {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut i = self.root;
        while i != NIL {
            parent = i;
            match key.cmp(&self.nodes[i].key) {
                Ordering::Less => side = Side::Left,
                Ordering::Greater => side = Side::Right,
                Ordering::Equal => return Some((i, key, value)),
            }
            i = self.child(i, side);
        }
        let z = self.nodes.len();
        self.nodes.push(Node {
            key,
            value,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        });
        if parent == NIL {
            self.root = z;
        } else {
            self.set_child(parent, side, z);
        }
        self.insert_fixup(z);
        None
    }

    fn remove(&mut self, key: &K) -> Option<(K, V)> {
        self.find(key).map(|z| self.delete(z))
    }

    fn check(&self) -> Result<usize, InvariantViolation> {
        if self.color(self.root) == Color::Red {
            return Err(InvariantViolation::RedRoot);
        }
        if self.root != NIL && self.parent(self.root) != NIL {
            return Err(InvariantViolation::BrokenParentLink { node: self.root });
        }
        let (height, reachable) = self.check_node(self.root, None, None)?;
        if reachable != self.len() {
            return Err(InvariantViolation::SizeMismatch {
                reachable,
                recorded: self.len(),
            });
        }
        Ok(height)
    }

    fn check_node(
        &self,
        i: usize,
        low: Option<&K>,
        high: Option<&K>,
    ) -> Result<(usize, usize), InvariantViolation> {
        if i == NIL {
            return Ok((1, 0));
        }
        let node = &self.nodes[i];
        if low.is_some_and(|low| node.key <= *low) || high.is_some_and(|high| node.key >= *high) {
            return Err(InvariantViolation::OrderViolation { node: i });
        }
        for c in [node.left, node.right] {
            if c != NIL && self.parent(c) != i {
                return Err(InvariantViolation::BrokenParentLink { node: c });
            }
        }
        if node.color == Color::Red
            && (self.color(node.left) == Color::Red || self.color(node.right) == Color::Red)
        {
            return Err(InvariantViolation::RedChildOfRed { node: i });
        }
        let (left, left_count) = self.check_node(node.left, low, Some(&node.key))?;
        let (right, right_count) = self.check_node(node.right, Some(&node.key), high)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch {
                node: i,
                left,
                right,
            });
        }
        let own = usize::from(node.color == Color::Black);
        Ok((left + own, left_count + right_count + 1))
    }
}

// =============================================================================
// Ranges
// =============================================================================

#[derive(Debug)]
struct Cursor<'a, K, V> {
    tree: &'a Tree<K, V>,
    node: usize,
    direction: Side,
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<'a, K, V> Cursor<'a, K, V> {
    fn ascending(tree: &'a Tree<K, V>) -> Self {
        Self {
            tree,
            node: tree.first(),
            direction: Side::Right,
        }
    }

    fn descending(tree: &'a Tree<K, V>) -> Self {
        Self {
            tree,
            node: tree.last(),
            direction: Side::Left,
        }
    }

    fn front(&self) -> &'a Node<K, V> {
        assert!(self.node != NIL, "front access on an empty range");
        &self.tree.nodes[self.node]
    }

    fn advance(&mut self) {
        assert!(self.node != NIL, "pop_front on an empty range");
        self.node = self.tree.step(self.node, self.direction);
    }
}

/// Ordered range over a [`TreeSet`].
#[derive(Debug)]
pub struct TreeSetRange<'a, T>(Cursor<'a, T, ()>);

impl<T> Clone for TreeSetRange<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TreeSetRange<'_, T> {}

impl<'a, T> InputRange<'a> for TreeSetRange<'a, T> {
    type Item = T;

    fn is_empty(&self) -> bool {
        self.0.node == NIL
    }

    fn pop_front(&mut self) {
        self.0.advance();
    }

    fn view_front(&self) -> &'a T {
        &self.0.front().key
    }
}

impl<'a, T> ForwardRange<'a> for TreeSetRange<'a, T> {}

/// Ordered range over a [`TreeMap`]: yields values, keys via
/// [`AssociativeRange`].
#[derive(Debug)]
pub struct TreeMapRange<'a, K, V>(Cursor<'a, K, V>);

impl<K, V> Clone for TreeMapRange<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for TreeMapRange<'_, K, V> {}

impl<'a, K, V> InputRange<'a> for TreeMapRange<'a, K, V> {
    type Item = V;

    fn is_empty(&self) -> bool {
        self.0.node == NIL
    }

    fn pop_front(&mut self) {
        self.0.advance();
    }

    fn view_front(&self) -> &'a V {
        &self.0.front().value
    }
}

impl<'a, K, V> ForwardRange<'a> for TreeMapRange<'a, K, V> {}

impl<'a, K, V> AssociativeRange<'a> for TreeMapRange<'a, K, V> {
    type Key = K;

    fn view_key_front(&self) -> &'a K {
        &self.0.front().key
    }
}

// =============================================================================
// TreeSet
// =============================================================================

/// Ordered set backed by a red-black tree.
#[derive(Clone)]
pub struct TreeSet<T> {
    tree: Tree<T, ()>,
}

impl<T> TreeSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the set holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// Smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        match self.tree.first() {
            NIL => None,
            i => Some(&self.tree.nodes[i].key),
        }
    }

    /// Largest element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        match self.tree.last() {
            NIL => None,
            i => Some(&self.tree.nodes[i].key),
        }
    }

    /// Range in ascending order.
    #[must_use]
    pub fn range(&self) -> TreeSetRange<'_, T> {
        TreeSetRange(Cursor::ascending(&self.tree))
    }

    /// Range in descending order.
    #[must_use]
    pub fn descending(&self) -> TreeSetRange<'_, T> {
        TreeSetRange(Cursor::descending(&self.tree))
    }

    /// Iterates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.range().elements()
    }

    /// Drops every element.
    pub fn purge(&mut self) {
        self.tree.clear();
    }
}

impl<T: Ord> TreeSet<T> {
    /// Returns true if `value` is present.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.tree.find(value).is_some()
    }

    /// Borrows the stored element equal to `value`.
    #[must_use]
    pub fn view(&self, value: &T) -> Option<&T> {
        self.tree.find(value).map(|i| &self.tree.nodes[i].key)
    }

    /// Inserts `value` if absent. Returns true if inserted.
    pub fn put(&mut self, value: T) -> bool {
        self.tree.insert(value, ()).is_none()
    }

    /// Inserts `value`, replacing an equal element. Returns the replaced one.
    pub fn push(&mut self, value: T) -> Option<T> {
        self.tree
            .insert(value, ())
            .map(|(i, value, ())| mem::replace(&mut self.tree.nodes[i].key, value))
    }

    /// Removes the element equal to `value`. Returns true if removed.
    pub fn remove(&mut self, value: &T) -> bool {
        self.tree.remove(value).is_some()
    }

    /// Removes and returns the element equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.tree.remove(value).map(|(key, ())| key)
    }

    /// Validates every red-black invariant. Returns the black height.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        self.tree.check()
    }
}

impl<T> Default for TreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for TreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.put(value);
        }
        set
    }
}

impl<T> Iterable for TreeSet<T> {
    type Element = T;
    type Range<'a>
        = TreeSetRange<'a, T>
    where
        Self: 'a;

    fn range(&self) -> TreeSetRange<'_, T> {
        TreeSet::range(self)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: Ord + Clone> SetOps for TreeSet<T> {
    fn contains(&self, value: &T) -> bool {
        TreeSet::contains(self, value)
    }

    fn put(&mut self, value: T) -> bool {
        TreeSet::put(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        TreeSet::remove(self, value)
    }

    fn create_like(&self) -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for TreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for TreeSet<T> {}

impl<T: Hash> Hash for TreeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(hasher::unordered(self.iter()));
    }
}

// =============================================================================
// TreeMap
// =============================================================================

/// Ordered map backed by a red-black tree.
#[derive(Clone)]
pub struct TreeMap<K, V> {
    tree: Tree<K, V>,
}

impl<K, V> TreeMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// Entry with the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        match self.tree.first() {
            NIL => None,
            i => Some((&self.tree.nodes[i].key, &self.tree.nodes[i].value)),
        }
    }

    /// Entry with the largest key.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        match self.tree.last() {
            NIL => None,
            i => Some((&self.tree.nodes[i].key, &self.tree.nodes[i].value)),
        }
    }

    /// Range in ascending key order.
    #[must_use]
    pub fn range(&self) -> TreeMapRange<'_, K, V> {
        TreeMapRange(Cursor::ascending(&self.tree))
    }

    /// Range in descending key order.
    #[must_use]
    pub fn descending(&self) -> TreeMapRange<'_, K, V> {
        TreeMapRange(Cursor::descending(&self.tree))
    }

    /// Iterates entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        let mut range = self.range();
        std::iter::from_fn(move || {
            if range.is_empty() {
                return None;
            }
            let entry = (range.view_key_front(), range.view_front());
            range.pop_front();
            Some(entry)
        })
    }

    /// Drops every entry.
    pub fn purge(&mut self) {
        self.tree.clear();
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    /// Borrows the value for `key`.
    #[must_use]
    pub fn view(&self, key: &K) -> Option<&V> {
        self.tree.find(key).map(|i| &self.tree.nodes[i].value)
    }

    /// Mutably borrows the value for `key`.
    pub fn view_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.find(key).map(|i| &mut self.tree.nodes[i].value)
    }

    /// Copies the value for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.view(key).cloned()
    }

    /// Inserts the entry if `key` is absent. Returns true if inserted.
    pub fn put(&mut self, key: K, value: V) -> bool {
        self.tree.insert(key, value).is_none()
    }

    /// Inserts or overwrites. Returns the previous value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.tree
            .insert(key, value)
            .map(|(i, _, value)| mem::replace(&mut self.tree.nodes[i].value, value))
    }

    /// Removes the entry for `key`. Returns true if removed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.tree.remove(key).is_some()
    }

    /// Removes the entry for `key`, returning its value.
    pub fn take(&mut self, key: &K) -> Option<V> {
        self.tree.remove(key).map(|(_, value)| value)
    }

    /// Validates every red-black invariant. Returns the black height.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        self.tree.check()
    }
}

impl<K, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl<K, V> Iterable for TreeMap<K, V> {
    type Element = V;
    type Range<'a>
        = TreeMapRange<'a, K, V>
    where
        Self: 'a;

    fn range(&self) -> TreeMapRange<'_, K, V> {
        TreeMap::range(self)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for TreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Hash, V: Hash> Hash for TreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let keys = hasher::unordered(self.iter().map(|(k, _)| k));
        let values = hasher::sequential(self.iter().map(|(_, v)| v));
        state.write_u64(keys ^ values);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    proptest! {
        #[test]
        fn invariants_hold_after_every_operation(
            ops in prop::collection::vec((any::<bool>(), 0..64i32), 0..200)
        ) {
            let mut map = TreeMap::new();
            let mut model = BTreeMap::new();
            for (insert, key) in ops {
                if insert {
                    prop_assert_eq!(map.set(key, key * 2), model.insert(key, key * 2));
                } else {
                    prop_assert_eq!(map.take(&key), model.remove(&key));
                }
                prop_assert!(map.check_invariants().is_ok());
            }
            prop_assert_eq!(map.len(), model.len());
            prop_assert!(map.iter().eq(model.iter()));
        }
    }
}
