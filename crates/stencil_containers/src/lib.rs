//! Container algorithms and the range hierarchy for Stencil.
//!
//! This is the runtime contract every synthesized container honours:
//! - [`HashSet`] / [`HashMap`] - Open addressing with linear probing and tombstones
//! - [`IntrusiveHashSet`] / [`IntrusiveHashMap`] - Same, with sentinel keys instead of tags
//! - [`TreeSet`] / [`TreeMap`] - Red-black trees
//! - [`TreapSet`] / [`TreapMap`] - Randomized treaps with public split and merge
//! - [`Vector`], [`List`], [`Queue`] - Sequences sharing [`SequentialOps`]
//! - [`SetOps`] - Set algebra written once against [`Iterable`]
//! - [`InputRange`] and its refinements - Non-owning cursors graded by capability
//!
//! Capability gating is expressed with trait bounds: an operation whose
//! element type lacks the capability simply does not exist.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod hash;
pub mod hasher;
pub mod invariant;
pub mod list;
pub mod queue;
pub mod range;
pub mod rbtree;
pub mod sequential;
pub mod set_ops;
pub mod treap;
pub mod vector;

pub use hash::{
    HashMap, HashMapRange, HashSet, HashSetRange, HashStats, IntrusiveHashMap, IntrusiveHashSet,
    Sentinel, SlotState, SlotStorage, Tagged,
};
pub use hasher::{RotateXor, RotateXorState};
pub use invariant::InvariantViolation;
pub use list::{List, ListRange};
pub use queue::{Queue, QueueRange};
pub use range::{
    AssociativeRange, BidirectionalRange, ContiguousRange, Elements, ForwardRange, InputRange,
    Iterable, RandomAccessRange, SliceRange,
};
pub use rbtree::{TreeMap, TreeMapRange, TreeSet, TreeSetRange};
pub use sequential::SequentialOps;
pub use set_ops::SetOps;
pub use treap::{TreapMap, TreapMapRange, TreapSet, TreapSetRange};
pub use vector::{SortOrder, Vector};
