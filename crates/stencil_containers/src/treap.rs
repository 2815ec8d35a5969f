//! Treap sets and maps.
//!
//! Keys follow binary-search-tree order; priorities follow max-heap order.
//! A node's priority is one linear-congruential step over the address of its
//! freshly allocated box, so no generator state is carried around.
//!
//! Everything is built from two primitives. `split` cuts a treap into the
//! keys below a pivot and the rest; `merge` joins two treaps whose key ranges
//! do not overlap. Insertion descends while the existing priorities outrank
//! the new node, splits the subtree found there around the new key and hangs
//! both halves below the new node. Removal replaces a node with the merge of
//! its children.
//!
//! Each node caches its subtree size so both halves of a split know their
//! length.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use crate::hasher;
use crate::invariant::InvariantViolation;
use crate::range::{AssociativeRange, ForwardRange, InputRange, Iterable};
use crate::set_ops::SetOps;

const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const LCG_INCREMENT: u64 = 1_442_695_040_888_963_407;

/// One step of the priority generator.
#[must_use]
pub const fn lcg(state: u64) -> u64 {
    state
        .wrapping_mul(LCG_MULTIPLIER)
        .wrapping_add(LCG_INCREMENT)
}

// =============================================================================
// Treap core
// =============================================================================

#[derive(Clone, Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    priority: u64,
    count: usize,
    left: Link<K, V>,
    right: Link<K, V>,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

impl<K, V> Node<K, V> {
    fn boxed(key: K, value: V) -> Box<Self> {
        let mut node = Box::new(Self {
            key,
            value,
            priority: 0,
            count: 1,
            left: None,
            right: None,
        });
        let address = std::ptr::from_ref::<Self>(node.as_ref()).addr();
        node.priority = lcg(address as u64);
        node
    }

    fn update(&mut self) {
        self.count = 1 + count(&self.left) + count(&self.right);
    }
}

fn count<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.count)
}

fn split<K: Ord, V>(link: Link<K, V>, pivot: &K) -> (Link<K, V>, Link<K, V>) {
    match link {
        None => (None, None),
        Some(mut node) => {
            if node.key < *pivot {
                let (left, right) = split(node.right.take(), pivot);
                node.right = left;
                node.update();
                (Some(node), right)
            } else {
                let (left, right) = split(node.left.take(), pivot);
                node.left = right;
                node.update();
                (left, Some(node))
            }
        }
    }
}

fn merge<K, V>(left: Link<K, V>, right: Link<K, V>) -> Link<K, V> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(mut left), Some(mut right)) => {
            if left.priority >= right.priority {
                left.right = merge(left.right.take(), Some(right));
                left.update();
                Some(left)
            } else {
                right.left = merge(Some(left), right.left.take());
                right.update();
                Some(right)
            }
        }
    }
}

/// Hangs `fresh` into the treap. Its key must be absent. Returns its depth.
fn insert<K: Ord, V>(link: &mut Link<K, V>, mut fresh: Box<Node<K, V>>, depth: usize) -> usize {
    if let Some(node) = link.as_mut() {
        if node.priority >= fresh.priority {
            let below = if fresh.key < node.key {
                insert(&mut node.left, fresh, depth + 1)
            } else {
                insert(&mut node.right, fresh, depth + 1)
            };
            node.count += 1;
            return below;
        }
    }
    let (left, right) = split(link.take(), &fresh.key);
    fresh.left = left;
    fresh.right = right;
    fresh.update();
    *link = Some(fresh);
    depth
}

fn remove<K: Ord, V>(link: &mut Link<K, V>, key: &K) -> Option<Box<Node<K, V>>> {
    let node = link.as_mut()?;
    let removed = match key.cmp(&node.key) {
        Ordering::Less => remove(&mut node.left, key),
        Ordering::Greater => remove(&mut node.right, key),
        Ordering::Equal => {
            let mut node = link.take()?;
            *link = merge(node.left.take(), node.right.take());
            return Some(node);
        }
    };
    if removed.is_some() {
        if let Some(node) = link.as_mut() {
            node.count -= 1;
        }
    }
    removed
}

fn find<'a, K: Ord, V>(mut link: &'a Link<K, V>, key: &K) -> Option<&'a Node<K, V>> {
    while let Some(node) = link {
        match key.cmp(&node.key) {
            Ordering::Less => link = &node.left,
            Ordering::Greater => link = &node.right,
            Ordering::Equal => return Some(node),
        }
    }
    None
}

fn find_mut<'a, K: Ord, V>(link: &'a mut Link<K, V>, key: &K) -> Option<&'a mut Node<K, V>> {
    let node = link.as_deref_mut()?;
    match key.cmp(&node.key) {
        Ordering::Less => find_mut(&mut node.left, key),
        Ordering::Greater => find_mut(&mut node.right, key),
        Ordering::Equal => Some(node),
    }
}

fn extreme<K, V>(link: &Link<K, V>, side: fn(&Node<K, V>) -> &Link<K, V>) -> Option<&Node<K, V>> {
    let mut node = link.as_deref()?;
    while let Some(next) = side(node).as_deref() {
        node = next;
    }
    Some(node)
}

fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref()
        .map_or(0, |node| 1 + height(&node.left).max(height(&node.right)))
}

struct Validator<'a, K> {
    position: usize,
    previous: Option<&'a K>,
}

impl<'a, K: Ord> Validator<'a, K> {
    /// Walks in order. Returns the subtree height and node count.
    fn visit<V>(&mut self, link: &'a Link<K, V>) -> Result<(usize, usize), InvariantViolation> {
        let Some(node) = link else {
            return Ok((0, 0));
        };
        let (left, left_count) = self.visit(&node.left)?;
        let position = self.position;
        if self.previous.is_some_and(|previous| *previous >= node.key) {
            return Err(InvariantViolation::OrderViolation { node: position });
        }
        self.previous = Some(&node.key);
        self.position += 1;
        let (right, right_count) = self.visit(&node.right)?;
        for child in [&node.left, &node.right].into_iter().flatten() {
            if child.priority > node.priority {
                return Err(InvariantViolation::HeapViolation { node: position });
            }
        }
        let reachable = 1 + left_count + right_count;
        if node.count != reachable {
            return Err(InvariantViolation::SizeMismatch {
                reachable,
                recorded: node.count,
            });
        }
        Ok((1 + left.max(right), reachable))
    }
}

#[derive(Clone, Debug)]
struct Treap<K, V> {
    root: Link<K, V>,
    max_depth: usize,
}

impl<K, V> Treap<K, V> {
    const fn new() -> Self {
        Self {
            root: None,
            max_depth: 0,
        }
    }

    fn len(&self) -> usize {
        count(&self.root)
    }

    fn first(&self) -> Option<&Node<K, V>> {
        extreme(&self.root, |node| &node.left)
    }

    fn last(&self) -> Option<&Node<K, V>> {
        extreme(&self.root, |node| &node.right)
    }

    /// Releases nodes depth first without recursion.
    fn clear(&mut self) {
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.max_depth = 0;
    }
}

impl<K: Ord, V> Treap<K, V> {
    /// Inserts a new node. If the key is present nothing changes and the
    /// rejected pair is returned along with the existing node.
    fn insert(&mut self, key: K, value: V) -> Result<(), (&mut Node<K, V>, K, V)> {
        if find(&self.root, &key).is_some() {
            return match find_mut(&mut self.root, &key) {
                Some(node) => Err((node, key, value)),
                None => Ok(()),
            };
        }
        let depth = insert(&mut self.root, Node::boxed(key, value), 1);
        self.max_depth = self.max_depth.max(depth);
        Ok(())
    }

    fn remove(&mut self, key: &K) -> Option<(K, V)> {
        remove(&mut self.root, key).map(|node| (node.key, node.value))
    }

    fn split(mut self, pivot: &K) -> (Self, Self) {
        let (left, right) = split(self.root.take(), pivot);
        (
            Self {
                root: left,
                max_depth: self.max_depth,
            },
            Self {
                root: right,
                max_depth: self.max_depth,
            },
        )
    }

    fn merge(mut self, mut right: Self) -> Self {
        if let (Some(last), Some(first)) = (self.last(), right.first()) {
            assert!(
                last.key < first.key,
                "merge requires every left key below every right key"
            );
        }
        Self {
            max_depth: self.max_depth + right.max_depth,
            root: merge(self.root.take(), right.root.take()),
        }
    }

    fn check(&self) -> Result<usize, InvariantViolation> {
        let mut validator = Validator {
            position: 0,
            previous: None,
        };
        validator.visit(&self.root).map(|(height, _)| height)
    }
}

impl<K, V> Drop for Treap<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

// =============================================================================
// Ranges
// =============================================================================

#[derive(Debug)]
struct Cursor<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    ascending: bool,
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            ascending: self.ascending,
        }
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    fn new(treap: &'a Treap<K, V>, ascending: bool) -> Self {
        let mut cursor = Self {
            stack: Vec::with_capacity(treap.max_depth + 1),
            ascending,
        };
        cursor.descend(&treap.root);
        cursor
    }

    fn descend(&mut self, mut link: &'a Link<K, V>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = if self.ascending {
                &node.left
            } else {
                &node.right
            };
        }
    }

    fn front(&self) -> &'a Node<K, V> {
        match self.stack.last() {
            Some(&node) => node,
            None => panic!("front access on an empty range"),
        }
    }

    fn advance(&mut self) {
        let Some(node) = self.stack.pop() else {
            panic!("pop_front on an empty range");
        };
        let next = if self.ascending {
            &node.right
        } else {
            &node.left
        };
        self.descend(next);
    }
}

/// Ordered range over a [`TreapSet`].
#[derive(Debug)]
pub struct TreapSetRange<'a, T>(Cursor<'a, T, ()>);

impl<T> Clone for TreapSetRange<'_, T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<'a, T> InputRange<'a> for TreapSetRange<'a, T> {
    type Item = T;

    fn is_empty(&self) -> bool {
        self.0.stack.is_empty()
    }

    fn pop_front(&mut self) {
        self.0.advance();
    }

    fn view_front(&self) -> &'a T {
        &self.0.front().key
    }
}

impl<'a, T> ForwardRange<'a> for TreapSetRange<'a, T> {}

/// Ordered range over a [`TreapMap`]: yields values, keys via
/// [`AssociativeRange`].
#[derive(Debug)]
pub struct TreapMapRange<'a, K, V>(Cursor<'a, K, V>);

impl<K, V> Clone for TreapMapRange<'_, K, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<'a, K, V> InputRange<'a> for TreapMapRange<'a, K, V> {
    type Item = V;

    fn is_empty(&self) -> bool {
        self.0.stack.is_empty()
    }

    fn pop_front(&mut self) {
        self.0.advance();
    }

    fn view_front(&self) -> &'a V {
        &self.0.front().value
    }
}

impl<'a, K, V> ForwardRange<'a> for TreapMapRange<'a, K, V> {}

impl<'a, K, V> AssociativeRange<'a> for TreapMapRange<'a, K, V> {
    type Key = K;

    fn view_key_front(&self) -> &'a K {
        &self.0.front().key
    }
}

// =============================================================================
// TreapSet
// =============================================================================

/// Ordered set backed by a treap.
#[derive(Clone)]
pub struct TreapSet<T> {
    treap: Treap<T, ()>,
}

impl<T> TreapSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            treap: Treap::new(),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.treap.len()
    }

    /// Returns true if the set holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.treap.root.is_none()
    }

    /// Deepest insertion point seen so far. Pre-sizes range stacks.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.treap.max_depth
    }

    /// Current height of the treap.
    #[must_use]
    pub fn height(&self) -> usize {
        height(&self.treap.root)
    }

    /// Smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.treap.first().map(|node| &node.key)
    }

    /// Largest element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.treap.last().map(|node| &node.key)
    }

    /// Range in ascending order.
    #[must_use]
    pub fn range(&self) -> TreapSetRange<'_, T> {
        TreapSetRange(Cursor::new(&self.treap, true))
    }

    /// Range in descending order.
    #[must_use]
    pub fn descending(&self) -> TreapSetRange<'_, T> {
        TreapSetRange(Cursor::new(&self.treap, false))
    }

    /// Iterates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.range().elements()
    }

    /// Drops every element.
    pub fn purge(&mut self) {
        self.treap.clear();
    }
}

impl<T: Ord> TreapSet<T> {
    /// Returns true if `value` is present.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        find(&self.treap.root, value).is_some()
    }

    /// Borrows the stored element equal to `value`.
    #[must_use]
    pub fn view(&self, value: &T) -> Option<&T> {
        find(&self.treap.root, value).map(|node| &node.key)
    }

    /// Inserts `value` if absent. Returns true if inserted.
    pub fn put(&mut self, value: T) -> bool {
        self.treap.insert(value, ()).is_ok()
    }

    /// Inserts `value`, replacing an equal element. Returns the replaced one.
    pub fn push(&mut self, value: T) -> Option<T> {
        match self.treap.insert(value, ()) {
            Ok(()) => None,
            Err((node, value, ())) => Some(mem::replace(&mut node.key, value)),
        }
    }

    /// Removes the element equal to `value`. Returns true if removed.
    pub fn remove(&mut self, value: &T) -> bool {
        self.treap.remove(value).is_some()
    }

    /// Removes and returns the element equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.treap.remove(value).map(|(key, ())| key)
    }

    /// Splits into the elements below `pivot` and the rest.
    #[must_use]
    pub fn split(mut self, pivot: &T) -> (Self, Self) {
        let treap = mem::replace(&mut self.treap, Treap::new());
        let (left, right) = treap.split(pivot);
        (Self { treap: left }, Self { treap: right })
    }

    /// Joins two sets whose elements do not interleave.
    ///
    /// # Panics
    /// Panics if some element of `self` is not below every element of `right`.
    #[must_use]
    pub fn merge(mut self, mut right: Self) -> Self {
        let left = mem::replace(&mut self.treap, Treap::new());
        let right = mem::replace(&mut right.treap, Treap::new());
        Self {
            treap: left.merge(right),
        }
    }

    /// Validates key order, heap order and cached sizes. Returns the height.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        self.treap.check()
    }
}

impl<T> Default for TreapSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for TreapSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for TreapSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.put(value);
        }
        set
    }
}

impl<T> Iterable for TreapSet<T> {
    type Element = T;
    type Range<'a>
        = TreapSetRange<'a, T>
    where
        Self: 'a;

    fn range(&self) -> TreapSetRange<'_, T> {
        TreapSet::range(self)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: Ord + Clone> SetOps for TreapSet<T> {
    fn contains(&self, value: &T) -> bool {
        TreapSet::contains(self, value)
    }

    fn put(&mut self, value: T) -> bool {
        TreapSet::put(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        TreapSet::remove(self, value)
    }

    fn create_like(&self) -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for TreapSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for TreapSet<T> {}

impl<T: Hash> Hash for TreapSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(hasher::unordered(self.iter()));
    }
}

// =============================================================================
// TreapMap
// =============================================================================

/// Ordered map backed by a treap.
#[derive(Clone)]
pub struct TreapMap<K, V> {
    treap: Treap<K, V>,
}

impl<K, V> TreapMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            treap: Treap::new(),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.treap.len()
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.treap.root.is_none()
    }

    /// Deepest insertion point seen so far.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.treap.max_depth
    }

    /// Entry with the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.treap.first().map(|node| (&node.key, &node.value))
    }

    /// Entry with the largest key.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.treap.last().map(|node| (&node.key, &node.value))
    }

    /// Range in ascending key order.
    #[must_use]
    pub fn range(&self) -> TreapMapRange<'_, K, V> {
        TreapMapRange(Cursor::new(&self.treap, true))
    }

    /// Range in descending key order.
    #[must_use]
    pub fn descending(&self) -> TreapMapRange<'_, K, V> {
        TreapMapRange(Cursor::new(&self.treap, false))
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
        self.treap.clear();
    }
}

impl<K: Ord, V> TreapMap<K, V> {
    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        find(&self.treap.root, key).is_some()
    }

    /// Borrows the value for `key`.
    #[must_use]
    pub fn view(&self, key: &K) -> Option<&V> {
        find(&self.treap.root, key).map(|node| &node.value)
    }

    /// Mutably borrows the value for `key`.
    pub fn view_mut(&mut self, key: &K) -> Option<&mut V> {
        find_mut(&mut self.treap.root, key).map(|node| &mut node.value)
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
        self.treap.insert(key, value).is_ok()
    }

    /// Inserts or overwrites. Returns the previous value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.treap.insert(key, value) {
            Ok(()) => None,
            Err((node, _, value)) => Some(mem::replace(&mut node.value, value)),
        }
    }

    /// Removes the entry for `key`. Returns true if removed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.treap.remove(key).is_some()
    }

    /// Removes the entry for `key`, returning its value.
    pub fn take(&mut self, key: &K) -> Option<V> {
        self.treap.remove(key).map(|(_, value)| value)
    }

    /// Splits into the entries with keys below `pivot` and the rest.
    #[must_use]
    pub fn split(mut self, pivot: &K) -> (Self, Self) {
        let treap = mem::replace(&mut self.treap, Treap::new());
        let (left, right) = treap.split(pivot);
        (Self { treap: left }, Self { treap: right })
    }

    /// Joins two maps whose keys do not interleave.
    ///
    /// # Panics
    /// Panics if some key of `self` is not below every key of `right`.
    #[must_use]
    pub fn merge(mut self, mut right: Self) -> Self {
        let left = mem::replace(&mut self.treap, Treap::new());
        let right = mem::replace(&mut right.treap, Treap::new());
        Self {
            treap: left.merge(right),
        }
    }

    /// Validates key order, heap order and cached sizes. Returns the height.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        self.treap.check()
    }
}

impl<K, V> Default for TreapMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreapMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreapMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl<K, V> Iterable for TreapMap<K, V> {
    type Element = V;
    type Range<'a>
        = TreapMapRange<'a, K, V>
    where
        Self: 'a;

    fn range(&self) -> TreapMapRange<'_, K, V> {
        TreapMap::range(self)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for TreapMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}
