//! Open-addressing hash sets and maps.
//!
//! Capacity is always a power of two. A key's home slot is
//! `hash(key) & (capacity - 1)` and collisions probe linearly with
//! `(slot + 1) & (capacity - 1)`. Lookup skips tombstones and stops at the
//! first empty slot. After an insert leaves `size > capacity * load_factor`
//! the table doubles and every live entry is re-inserted; tombstones are
//! dropped in the process. Removal leaves a tombstone and never shrinks.
//!
//! How a slot records EMPTY / DELETED / OCCUPIED is delegated to a
//! [`SlotStorage`]. [`Tagged`] keeps a side tag per slot; [`Sentinel`] reserves
//! two caller-supplied key values instead, which is the intrusive variant.
//! Probing, insertion and deletion are shared.

use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::marker::PhantomData;
use std::mem;

use stencil_foundation::HashConfig;

use crate::hasher::{self, RotateXorState};
use crate::range::{AssociativeRange, ForwardRange, InputRange, Iterable};
use crate::set_ops::SetOps;

// =============================================================================
// Slot storage
// =============================================================================

/// Occupancy state of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    /// Never occupied since the last rehash.
    Empty,
    /// Previously occupied, now removed (tombstone).
    Deleted,
    /// Holds a live entry.
    Occupied,
}

/// Flat slot array with a particular encoding of occupancy.
pub trait SlotStorage: Sized {
    /// Key type.
    type Key;
    /// Value type; `()` for sets.
    type Value;

    /// A storage of the same kind with `capacity` empty slots.
    fn fresh(&self, capacity: usize) -> Self;

    /// Number of slots.
    fn capacity(&self) -> usize;

    /// Occupancy of a slot.
    fn state(&self, slot: usize) -> SlotState;

    /// Key and value of an occupied slot.
    fn entry(&self, slot: usize) -> Option<(&Self::Key, &Self::Value)>;

    /// Mutable value of an occupied slot.
    fn value_mut(&mut self, slot: usize) -> Option<&mut Self::Value>;

    /// Stores an entry into a free slot.
    fn fill(&mut self, slot: usize, key: Self::Key, value: Self::Value);

    /// Removes the entry of an occupied slot, leaving a tombstone.
    fn vacate(&mut self, slot: usize) -> Option<(Self::Key, Self::Value)>;

    /// Consumes the storage, yielding every live entry.
    fn into_entries(self) -> Vec<(Self::Key, Self::Value)>;

    /// Returns false for keys that cannot be stored.
    fn admits(&self, _key: &Self::Key) -> bool {
        true
    }
}

#[derive(Clone, Debug)]
enum Slot<K, V> {
    Empty,
    Deleted,
    Occupied(K, V),
}

/// Slots with a side tag.
#[derive(Clone, Debug)]
pub struct Tagged<K, V = ()> {
    slots: Vec<Slot<K, V>>,
}

impl<K, V> Tagged<K, V> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| Slot::Empty).collect(),
        }
    }
}

impl<K, V> SlotStorage for Tagged<K, V> {
    type Key = K;
    type Value = V;

    fn fresh(&self, capacity: usize) -> Self {
        Self::with_capacity(capacity)
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn state(&self, slot: usize) -> SlotState {
        match self.slots[slot] {
            Slot::Empty => SlotState::Empty,
            Slot::Deleted => SlotState::Deleted,
            Slot::Occupied(..) => SlotState::Occupied,
        }
    }

    fn entry(&self, slot: usize) -> Option<(&K, &V)> {
        match &self.slots[slot] {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        }
    }

    fn value_mut(&mut self, slot: usize) -> Option<&mut V> {
        match &mut self.slots[slot] {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    fn fill(&mut self, slot: usize, key: K, value: V) {
        self.slots[slot] = Slot::Occupied(key, value);
    }

    fn vacate(&mut self, slot: usize) -> Option<(K, V)> {
        match mem::replace(&mut self.slots[slot], Slot::Deleted) {
            Slot::Occupied(k, v) => Some((k, v)),
            other => {
                self.slots[slot] = other;
                None
            }
        }
    }

    fn into_entries(self) -> Vec<(K, V)> {
        self.slots
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Occupied(k, v) => Some((k, v)),
                _ => None,
            })
            .collect()
    }
}

/// Slots whose occupancy is encoded by two reserved key values.
///
/// Values of free slots hold `V::default()`.
#[derive(Clone, Debug)]
pub struct Sentinel<K, V = ()> {
    keys: Vec<K>,
    values: Vec<V>,
    empty: K,
    deleted: K,
}

impl<K: Clone + PartialEq, V: Default> Sentinel<K, V> {
    fn with_capacity(capacity: usize, empty: K, deleted: K) -> Self {
        assert!(empty != deleted, "EMPTY and DELETED sentinels must differ");
        Self {
            keys: vec![empty.clone(); capacity],
            values: (0..capacity).map(|_| V::default()).collect(),
            empty,
            deleted,
        }
    }

    /// The key value marking a never-used slot.
    pub fn empty_key(&self) -> &K {
        &self.empty
    }

    /// The key value marking a tombstone.
    pub fn deleted_key(&self) -> &K {
        &self.deleted
    }
}

impl<K: Clone + PartialEq, V: Default> SlotStorage for Sentinel<K, V> {
    type Key = K;
    type Value = V;

    fn fresh(&self, capacity: usize) -> Self {
        Self::with_capacity(capacity, self.empty.clone(), self.deleted.clone())
    }

    fn capacity(&self) -> usize {
        self.keys.len()
    }

    fn state(&self, slot: usize) -> SlotState {
        let key = &self.keys[slot];
        if *key == self.empty {
            SlotState::Empty
        } else if *key == self.deleted {
            SlotState::Deleted
        } else {
            SlotState::Occupied
        }
    }

    fn entry(&self, slot: usize) -> Option<(&K, &V)> {
        match self.state(slot) {
            SlotState::Occupied => Some((&self.keys[slot], &self.values[slot])),
            _ => None,
        }
    }

    fn value_mut(&mut self, slot: usize) -> Option<&mut V> {
        match self.state(slot) {
            SlotState::Occupied => Some(&mut self.values[slot]),
            _ => None,
        }
    }

    fn fill(&mut self, slot: usize, key: K, value: V) {
        self.keys[slot] = key;
        self.values[slot] = value;
    }

    fn vacate(&mut self, slot: usize) -> Option<(K, V)> {
        if self.state(slot) != SlotState::Occupied {
            return None;
        }
        let key = mem::replace(&mut self.keys[slot], self.deleted.clone());
        let value = mem::take(&mut self.values[slot]);
        Some((key, value))
    }

    fn into_entries(self) -> Vec<(K, V)> {
        let (empty, deleted) = (self.empty, self.deleted);
        self.keys
            .into_iter()
            .zip(self.values)
            .filter(|(k, _)| *k != empty && *k != deleted)
            .collect()
    }

    fn admits(&self, key: &K) -> bool {
        *key != self.empty && *key != self.deleted
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Table statistics for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HashStats {
    /// Live entries.
    pub size: usize,
    /// Slots.
    pub capacity: usize,
    /// Tombstones.
    pub tombstones: usize,
    /// `size / capacity`.
    pub utilization: f64,
    /// Mean number of equality tests needed to find a live entry.
    pub average_probes: f64,
    /// Worst-case number of equality tests needed to find a live entry.
    pub max_probes: usize,
}

impl fmt::Display for HashStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size = {}, capacity = {}, tombstones = {}, utilization = {:.1}%, probes: avg = {:.2}, max = {}",
            self.size,
            self.capacity,
            self.tombstones,
            self.utilization * 100.0,
            self.average_probes,
            self.max_probes
        )
    }
}

// =============================================================================
// Table
// =============================================================================

#[derive(Clone, Debug)]
struct Table<St, S> {
    storage: St,
    hasher: S,
    size: usize,
    tombstones: usize,
    load_factor: f64,
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
impl<St, S> Table<St, S>
where
    St: SlotStorage,
    St::Key: Hash + Eq,
    S: BuildHasher,
{
    fn new(storage: St, hasher: S, load_factor: f64) -> Self {
        assert!(
            storage.capacity().is_power_of_two(),
            "hash capacity must be a positive power of two"
        );
        assert!(
            load_factor > 0.0 && load_factor <= 1.0,
            "load factor must be in (0, 1]"
        );
        Self {
            storage,
            hasher,
            size: 0,
            tombstones: 0,
            load_factor,
        }
    }

    fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    fn overloaded(&self, count: usize) -> bool {
        count as f64 > self.capacity() as f64 * self.load_factor
    }

    fn slot(&self, key: &St::Key) -> usize {
        (self.hasher.hash_one(key) as usize) & (self.capacity() - 1)
    }

    fn next_slot(&self, slot: usize) -> usize {
        (slot + 1) & (self.capacity() - 1)
    }

    /// Slot holding `key` and the number of equality tests performed.
    fn locate(&self, key: &St::Key) -> (Option<usize>, usize) {
        let mut slot = self.slot(key);
        let mut probes = 0;
        for _ in 0..self.capacity() {
            match self.storage.state(slot) {
                SlotState::Empty => return (None, probes),
                SlotState::Deleted => {}
                SlotState::Occupied => {
                    probes += 1;
                    if self.storage.entry(slot).is_some_and(|(k, _)| k == key) {
                        return (Some(slot), probes);
                    }
                }
            }
            slot = self.next_slot(slot);
        }
        (None, probes)
    }

    fn find(&self, key: &St::Key) -> Option<usize> {
        self.locate(key).0
    }

    fn entry(&self, key: &St::Key) -> Option<(&St::Key, &St::Value)> {
        self.find(key).and_then(|slot| self.storage.entry(slot))
    }

    /// Inserts without checking for an equal key.
    fn put_force(&mut self, key: St::Key, value: St::Value) {
        assert!(
            self.storage.admits(&key),
            "cannot store a sentinel value in an intrusive hash container"
        );
        if self.size >= self.capacity() {
            self.expand(self.capacity() << 1);
        } else if self.size + self.tombstones >= self.capacity() {
            self.expand(self.capacity());
        }
        let mut slot = self.slot(&key);
        while self.storage.state(slot) == SlotState::Occupied {
            slot = self.next_slot(slot);
        }
        if self.storage.state(slot) == SlotState::Deleted {
            self.tombstones -= 1;
        }
        self.storage.fill(slot, key, value);
        self.size += 1;
        if self.overloaded(self.size) {
            self.expand(self.grown_capacity());
        } else if self.overloaded(self.size + self.tombstones) {
            // Tombstone-heavy: rehash at the same capacity
            self.expand(self.capacity());
        }
    }

    /// Smallest power-of-two multiple of the capacity that holds `size`
    /// within the load factor.
    fn grown_capacity(&self) -> usize {
        let mut capacity = self.capacity() << 1;
        while self.size as f64 > capacity as f64 * self.load_factor {
            capacity <<= 1;
        }
        capacity
    }

    /// Inserts if no equal key is present; otherwise hands the entry back.
    fn put(&mut self, key: St::Key, value: St::Value) -> Result<(), (St::Key, St::Value)> {
        if self.find(&key).is_some() {
            return Err((key, value));
        }
        self.put_force(key, value);
        Ok(())
    }

    /// Inserts, replacing and returning an entry with an equal key.
    fn push(&mut self, key: St::Key, value: St::Value) -> Option<(St::Key, St::Value)> {
        match self.find(&key) {
            Some(slot) => {
                let old = self.storage.vacate(slot);
                self.storage.fill(slot, key, value);
                old
            }
            None => {
                self.put_force(key, value);
                None
            }
        }
    }

    fn remove(&mut self, key: &St::Key) -> Option<(St::Key, St::Value)> {
        let slot = self.find(key)?;
        let entry = self.storage.vacate(slot)?;
        self.size -= 1;
        self.tombstones += 1;
        Some(entry)
    }

    /// Rebuilds the table with `capacity` slots.
    fn expand(&mut self, capacity: usize) {
        let fresh = self.storage.fresh(capacity);
        let old = mem::replace(&mut self.storage, fresh);
        self.tombstones = 0;
        for (key, value) in old.into_entries() {
            let mut slot = self.slot(&key);
            while self.storage.state(slot) != SlotState::Empty {
                slot = self.next_slot(slot);
            }
            self.storage.fill(slot, key, value);
        }
    }

    fn clear(&mut self) {
        self.storage = self.storage.fresh(self.capacity());
        self.size = 0;
        self.tombstones = 0;
    }

    fn stats(&self) -> HashStats {
        let mut total = 0;
        let mut max = 0;
        for slot in 0..self.capacity() {
            if let Some((key, _)) = self.storage.entry(slot) {
                let probes = self.locate(key).1;
                total += probes;
                max = max.max(probes);
            }
        }
        let capacity = self.capacity();
        HashStats {
            size: self.size,
            capacity,
            tombstones: self.tombstones,
            utilization: self.size as f64 / capacity as f64,
            average_probes: if self.size == 0 {
                0.0
            } else {
                total as f64 / self.size as f64
            },
            max_probes: max,
        }
    }
}

fn storage_capacity(requested: usize) -> usize {
    requested.max(1).next_power_of_two()
}

// =============================================================================
// Ranges
// =============================================================================

/// Input range over a hash container in slot order.
#[derive(Debug)]
pub struct HashRange<'a, St> {
    storage: &'a St,
    slot: usize,
    remaining: usize,
}

impl<St> Clone for HashRange<'_, St> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<St> Copy for HashRange<'_, St> {}

impl<'a, St: SlotStorage> HashRange<'a, St> {
    fn new(storage: &'a St, size: usize) -> Self {
        let mut range = Self {
            storage,
            slot: 0,
            remaining: size,
        };
        range.settle();
        range
    }

    fn settle(&mut self) {
        if self.remaining == 0 {
            return;
        }
        while self.storage.state(self.slot) != SlotState::Occupied {
            self.slot += 1;
        }
    }

    fn front(&self) -> (&'a St::Key, &'a St::Value) {
        assert!(self.remaining > 0, "front access on an empty range");
        match self.storage.entry(self.slot) {
            Some(entry) => entry,
            None => panic!("hash range positioned on a free slot"),
        }
    }

    fn advance(&mut self) {
        assert!(self.remaining > 0, "pop_front on an empty range");
        self.remaining -= 1;
        self.slot += 1;
        self.settle();
    }
}

/// Set range: yields the elements.
#[derive(Debug)]
pub struct HashSetRange<'a, St>(HashRange<'a, St>);

impl<St> Clone for HashSetRange<'_, St> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<St> Copy for HashSetRange<'_, St> {}

impl<'a, St: SlotStorage> InputRange<'a> for HashSetRange<'a, St>
where
    St::Key: 'a,
{
    type Item = St::Key;

    fn is_empty(&self) -> bool {
        self.0.remaining == 0
    }

    fn pop_front(&mut self) {
        self.0.advance();
    }

    fn view_front(&self) -> &'a St::Key {
        self.0.front().0
    }
}

impl<'a, St: SlotStorage> ForwardRange<'a> for HashSetRange<'a, St> where St::Key: 'a {}

/// Map range: yields the values, with keys via [`AssociativeRange`].
#[derive(Debug)]
pub struct HashMapRange<'a, St>(HashRange<'a, St>);

impl<St> Clone for HashMapRange<'_, St> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<St> Copy for HashMapRange<'_, St> {}

impl<'a, St: SlotStorage> InputRange<'a> for HashMapRange<'a, St>
where
    St::Key: 'a,
    St::Value: 'a,
{
    type Item = St::Value;

    fn is_empty(&self) -> bool {
        self.0.remaining == 0
    }

    fn pop_front(&mut self) {
        self.0.advance();
    }

    fn view_front(&self) -> &'a St::Value {
        self.0.front().1
    }
}

impl<'a, St: SlotStorage> ForwardRange<'a> for HashMapRange<'a, St>
where
    St::Key: 'a,
    St::Value: 'a,
{
}

impl<'a, St: SlotStorage> AssociativeRange<'a> for HashMapRange<'a, St>
where
    St::Key: 'a,
    St::Value: 'a,
{
    type Key = St::Key;

    fn view_key_front(&self) -> &'a St::Key {
        self.0.front().0
    }
}

// =============================================================================
// HashSet
// =============================================================================

/// Open-addressing hash set.
#[derive(Clone, Debug)]
pub struct HashSet<T, St = Tagged<T>, S = RotateXorState> {
    table: Table<St, S>,
    _elements: PhantomData<T>,
}

/// Hash set storing occupancy in two reserved element values.
pub type IntrusiveHashSet<T, S = RotateXorState> = HashSet<T, Sentinel<T>, S>;

impl<T: Hash + Eq> HashSet<T> {
    /// Creates an empty set with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HashConfig::default())
    }

    /// Creates an empty set with room for `capacity` slots, rounded up to a
    /// power of two.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(HashConfig::default().with_initial_capacity(capacity))
    }

    /// Creates an empty set from a hash configuration.
    ///
    /// # Panics
    /// Panics if the load factor is outside `(0, 1]`.
    #[must_use]
    pub fn with_config(config: HashConfig) -> Self {
        Self::with_hasher(config, RotateXorState::from_policy(config.hasher))
    }
}

impl<T: Hash + Eq> Default for HashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq, S: BuildHasher> HashSet<T, Tagged<T>, S> {
    /// Creates an empty set using a custom hasher.
    ///
    /// # Panics
    /// Panics if the load factor is outside `(0, 1]`.
    #[must_use]
    pub fn with_hasher(config: HashConfig, hasher: S) -> Self {
        let storage = Tagged::with_capacity(storage_capacity(config.initial_capacity));
        Self {
            table: Table::new(storage, hasher, config.load_factor),
            _elements: PhantomData,
        }
    }
}

impl<T: Hash + Eq + Clone> IntrusiveHashSet<T> {
    /// Creates an empty intrusive set. `empty` and `deleted` are reserved and
    /// can never be stored.
    ///
    /// # Panics
    /// Panics if `empty == deleted`.
    #[must_use]
    pub fn with_sentinels(empty: T, deleted: T) -> Self {
        Self::with_sentinels_and_config(empty, deleted, HashConfig::default())
    }

    /// Creates an empty intrusive set from a hash configuration.
    ///
    /// # Panics
    /// Panics if `empty == deleted` or the load factor is outside `(0, 1]`.
    #[must_use]
    pub fn with_sentinels_and_config(empty: T, deleted: T, config: HashConfig) -> Self {
        let storage = Sentinel::with_capacity(storage_capacity(config.initial_capacity), empty, deleted);
        Self {
            table: Table::new(storage, RotateXorState::from_policy(config.hasher), config.load_factor),
            _elements: PhantomData,
        }
    }
}

impl<T, St, S> HashSet<T, St, S>
where
    T: Hash + Eq,
    St: SlotStorage<Key = T, Value = ()>,
    S: BuildHasher,
{
    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.size
    }

    /// Returns true if the set holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.size == 0
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns true if an element equal to `value` is present.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.table.find(value).is_some()
    }

    /// Borrows the stored element equal to `value`.
    #[must_use]
    pub fn find_first(&self, value: &T) -> Option<&T> {
        self.table.entry(value).map(|(k, ())| k)
    }

    /// Inserts `value` if no equal element is present. Returns true if inserted.
    ///
    /// # Panics
    /// Panics if `value` is a reserved sentinel of an intrusive set.
    pub fn put(&mut self, value: T) -> bool {
        self.table.put(value, ()).is_ok()
    }

    /// Inserts `value`, replacing and returning an equal element.
    ///
    /// # Panics
    /// Panics if `value` is a reserved sentinel of an intrusive set.
    pub fn push(&mut self, value: T) -> Option<T> {
        self.table.push(value, ()).map(|(k, ())| k)
    }

    /// Removes the element equal to `value`. Returns true if one was removed.
    pub fn remove(&mut self, value: &T) -> bool {
        self.table.remove(value).is_some()
    }

    /// Removes and returns the element equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.table.remove(value).map(|(k, ())| k)
    }

    /// Removes every element, keeping the capacity.
    pub fn purge(&mut self) {
        self.table.clear();
    }

    /// Range over the elements in slot order.
    #[must_use]
    pub fn range(&self) -> HashSetRange<'_, St> {
        HashSetRange(HashRange::new(&self.table.storage, self.table.size))
    }

    /// Iterator over the elements in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.range().elements()
    }

    /// Table statistics.
    #[must_use]
    pub fn stats(&self) -> HashStats {
        self.table.stats()
    }
}

impl<T, St, S> Iterable for HashSet<T, St, S>
where
    T: Hash + Eq,
    St: SlotStorage<Key = T, Value = ()>,
    S: BuildHasher,
{
    type Element = T;
    type Range<'a>
        = HashSetRange<'a, St>
    where
        Self: 'a;

    fn range(&self) -> HashSetRange<'_, St> {
        HashSet::range(self)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T, St, S> SetOps for HashSet<T, St, S>
where
    T: Hash + Eq + Clone,
    St: SlotStorage<Key = T, Value = ()> + Clone,
    S: BuildHasher + Clone,
{
    fn contains(&self, value: &T) -> bool {
        HashSet::contains(self, value)
    }

    fn put(&mut self, value: T) -> bool {
        HashSet::put(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        HashSet::remove(self, value)
    }

    fn create_like(&self) -> Self {
        let mut empty = self.clone();
        empty.purge();
        empty
    }
}

impl<T, St, S> PartialEq for HashSet<T, St, S>
where
    T: Hash + Eq,
    St: SlotStorage<Key = T, Value = ()>,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, St, S> Eq for HashSet<T, St, S>
where
    T: Hash + Eq,
    St: SlotStorage<Key = T, Value = ()>,
    S: BuildHasher,
{
}

impl<T, St, S> Hash for HashSet<T, St, S>
where
    T: Hash + Eq,
    St: SlotStorage<Key = T, Value = ()>,
    S: BuildHasher,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(hasher::unordered(self.iter()));
    }
}

impl<T: Hash + Eq> FromIterator<T> for HashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.put(value);
        }
        set
    }
}

// =============================================================================
// HashMap
// =============================================================================

/// Open-addressing hash map.
#[derive(Clone, Debug)]
pub struct HashMap<K, V, St = Tagged<K, V>, S = RotateXorState> {
    table: Table<St, S>,
    _entries: PhantomData<(K, V)>,
}

/// Hash map storing occupancy in two reserved key values.
pub type IntrusiveHashMap<K, V, S = RotateXorState> = HashMap<K, V, Sentinel<K, V>, S>;

impl<K: Hash + Eq, V> HashMap<K, V> {
    /// Creates an empty map with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HashConfig::default())
    }

    /// Creates an empty map with room for `capacity` slots, rounded up to a
    /// power of two.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(HashConfig::default().with_initial_capacity(capacity))
    }

    /// Creates an empty map from a hash configuration.
    ///
    /// # Panics
    /// Panics if the load factor is outside `(0, 1]`.
    #[must_use]
    pub fn with_config(config: HashConfig) -> Self {
        let storage = Tagged::with_capacity(storage_capacity(config.initial_capacity));
        Self {
            table: Table::new(storage, RotateXorState::from_policy(config.hasher), config.load_factor),
            _entries: PhantomData,
        }
    }
}

impl<K: Hash + Eq, V> Default for HashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, V: Default> IntrusiveHashMap<K, V> {
    /// Creates an empty intrusive map. `empty` and `deleted` are reserved key
    /// values and can never be stored.
    ///
    /// # Panics
    /// Panics if `empty == deleted`.
    #[must_use]
    pub fn with_sentinels(empty: K, deleted: K) -> Self {
        Self::with_sentinels_and_config(empty, deleted, HashConfig::default())
    }

    /// Creates an empty intrusive map from a hash configuration.
    ///
    /// # Panics
    /// Panics if `empty == deleted` or the load factor is outside `(0, 1]`.
    #[must_use]
    pub fn with_sentinels_and_config(empty: K, deleted: K, config: HashConfig) -> Self {
        let storage = Sentinel::with_capacity(storage_capacity(config.initial_capacity), empty, deleted);
        Self {
            table: Table::new(storage, RotateXorState::from_policy(config.hasher), config.load_factor),
            _entries: PhantomData,
        }
    }
}

impl<K, V, St, S> HashMap<K, V, St, S>
where
    K: Hash + Eq,
    St: SlotStorage<Key = K, Value = V>,
    S: BuildHasher,
{
    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.size
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.size == 0
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns true if an entry with `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.table.find(key).is_some()
    }

    /// Borrows the stored key equal to `key`.
    #[must_use]
    pub fn lookup_key(&self, key: &K) -> Option<&K> {
        self.table.entry(key).map(|(k, _)| k)
    }

    /// Borrows the value associated with `key`.
    #[must_use]
    pub fn view(&self, key: &K) -> Option<&V> {
        self.table.entry(key).map(|(_, v)| v)
    }

    /// Mutably borrows the value associated with `key`.
    pub fn view_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = self.table.find(key)?;
        self.table.storage.value_mut(slot)
    }

    /// Copies the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.view(key).cloned()
    }

    /// Returns true if some entry holds a value equal to `value`.
    #[must_use]
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.find_first(value).is_some()
    }

    /// Borrows the first value equal to `value` in slot order.
    #[must_use]
    pub fn find_first(&self, value: &V) -> Option<&V>
    where
        V: PartialEq,
    {
        self.iter().map(|(_, v)| v).find(|v| *v == value)
    }

    /// Associates `value` with `key` if `key` is absent. Returns true if inserted.
    ///
    /// # Panics
    /// Panics if `key` is a reserved sentinel of an intrusive map.
    pub fn put(&mut self, key: K, value: V) -> bool {
        self.table.put(key, value).is_ok()
    }

    /// Associates `value` with `key`, returning the value it replaced.
    ///
    /// # Panics
    /// Panics if `key` is a reserved sentinel of an intrusive map.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.table.push(key, value).map(|(_, v)| v)
    }

    /// Removes the entry with `key`. Returns true if one was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.table.remove(key).is_some()
    }

    /// Removes the entry with `key`, returning its value.
    pub fn take(&mut self, key: &K) -> Option<V> {
        self.table.remove(key).map(|(_, v)| v)
    }

    /// Removes every entry, keeping the capacity.
    pub fn purge(&mut self) {
        self.table.clear();
    }

    /// Range over the values in slot order.
    #[must_use]
    pub fn range(&self) -> HashMapRange<'_, St> {
        HashMapRange(HashRange::new(&self.table.storage, self.table.size))
    }

    /// Iterator over `(key, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        let storage = &self.table.storage;
        (0..storage.capacity()).filter_map(move |slot| storage.entry(slot))
    }

    /// Table statistics.
    #[must_use]
    pub fn stats(&self) -> HashStats {
        self.table.stats()
    }
}

impl<K, V, St, S> Iterable for HashMap<K, V, St, S>
where
    K: Hash + Eq,
    St: SlotStorage<Key = K, Value = V>,
    S: BuildHasher,
{
    type Element = V;
    type Range<'a>
        = HashMapRange<'a, St>
    where
        Self: 'a;

    fn range(&self) -> HashMapRange<'_, St> {
        HashMap::range(self)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<K, V, St, S> PartialEq for HashMap<K, V, St, S>
where
    K: Hash + Eq,
    V: PartialEq,
    St: SlotStorage<Key = K, Value = V>,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.view(k) == Some(v))
    }
}

impl<K, V, St, S> Hash for HashMap<K, V, St, S>
where
    K: Hash + Eq,
    V: Hash,
    St: SlotStorage<Key = K, Value = V>,
    S: BuildHasher,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let builder = RotateXorState::default();
        let combined = self
            .iter()
            .fold(hasher::SEED, |acc, entry| acc ^ builder.hash_one(entry));
        state.write_u64(combined);
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for HashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}
