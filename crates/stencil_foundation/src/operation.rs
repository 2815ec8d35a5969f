//! Operation identifiers.
//!
//! Every function a container or range exposes is named by an [`Operation`].
//! The bare name (`hash_code`, `pop_front`, ...) is what the naming strategy
//! decorates into a type-qualified identifier.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! operations {
    ($($(#[$doc:meta])* $variant:ident => $name:literal,)*) => {
        /// A named operation on a type, container or range.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum Operation {
            $($(#[$doc])* $variant,)*
        }

        impl Operation {
            /// All known operations.
            pub const ALL: &'static [Operation] = &[$(Operation::$variant,)*];

            /// Returns the bare (undecorated) operation name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Operation::$variant => $name,)*
                }
            }

            /// Looks up an operation by its bare name.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Operation::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

operations! {
    // Lifecycle
    /// Parameterless constructor.
    Create => "create",
    /// Constructor with explicit arguments.
    CustomCreate => "custom_create",
    /// Destructor.
    Destroy => "destroy",
    /// Copy constructor.
    Copy => "copy",
    /// Equality test.
    Equal => "equal",
    /// Three-way comparison.
    Compare => "compare",
    /// Hash code computation.
    HashCode => "hash_code",

    // Collection queries
    /// Emptiness test.
    Empty => "empty",
    /// Element count.
    Size => "size",
    /// Membership test.
    Contains => "contains",
    /// First element equal to a value.
    FindFirst => "find_first",
    /// Remove and destroy all elements.
    Purge => "purge",

    // Insertion and removal
    /// Insert a copy if no equal element exists.
    Put => "put",
    /// Insert a copy, replacing an equal element.
    Push => "push",
    /// Remove an element equal to a value.
    Remove => "remove",

    // Association access
    /// Index existence test.
    Check => "check",
    /// Borrowed view of an element.
    View => "view",
    /// Copy of an element.
    Get => "get",
    /// Associate or overwrite an element.
    Set => "set",
    /// Key existence test.
    ContainsKey => "contains_key",
    /// Borrowed view of a stored key.
    LookupKey => "lookup_key",

    // Set algebra
    /// Subset test.
    Subset => "subset",
    /// Disjointness test.
    Disjoint => "disjoint",
    /// In-place union.
    Join => "join",
    /// Union into a new set.
    CreateJoin => "create_join",
    /// In-place difference.
    Subtract => "subtract",
    /// Difference into a new set.
    CreateDifference => "create_difference",
    /// In-place intersection.
    Intersect => "intersect",
    /// Intersection into a new set.
    CreateIntersection => "create_intersection",
    /// In-place symmetric difference.
    Disjoin => "disjoin",
    /// Symmetric difference into a new set.
    CreateDisjunction => "create_disjunction",

    // Vector
    /// Construct with a number of default elements.
    CreateSize => "create_size",
    /// Construct with a number of copies of a value.
    CreateSet => "create_set",
    /// Construct with a capacity hint.
    CreateCapacity => "create_capacity",
    /// Position validity test.
    CheckPosition => "check_position",
    /// Change the element count.
    Resize => "resize",
    /// Sort elements in place.
    Sort => "sort",

    // Lists and queues
    /// Insert at the front.
    PushFront => "push_front",
    /// Insert at the back.
    PushBack => "push_back",
    /// Remove and return the front element.
    PullFront => "pull_front",
    /// Remove and return the back element.
    PullBack => "pull_back",

    // Ranges
    /// Construct a range over an iterable.
    New => "new",
    /// Drop the front position.
    PopFront => "pop_front",
    /// Borrowed view of the front element.
    ViewFront => "view_front",
    /// Copy of the front element.
    TakeFront => "take_front",
    /// Drop the back position.
    PopBack => "pop_back",
    /// Borrowed view of the back element.
    ViewBack => "view_back",
    /// Copy of the back element.
    TakeBack => "take_back",
    /// Borrowed view of the front key.
    ViewKeyFront => "view_key_front",
    /// Copy of the front key.
    TakeKeyFront => "take_key_front",

    // Variants
    /// Index of the alternative currently held.
    Tag => "tag",

    // Hash internals
    /// Slot index for a value.
    Slot => "_slot",
    /// Next slot on the probe sequence.
    NextSlot => "_next_slot",
    /// Mark a slot with a sentinel state.
    Mark => "_mark",
    /// Read the sentinel state of a slot.
    Marked => "_marked",
    /// Place a value into a free slot.
    Adopt => "_adopt",
    /// Grow and rehash.
    Expand => "_expand",
    /// Unconditional insert used by put and push.
    PutForce => "_put_force",
    /// Count equality tests needed to locate a value.
    CountProbes => "_count_probes",

    // Diagnostics
    /// Print table statistics.
    PrintStats => "print_stats",

    // Tree internals
    /// Locate a node by key.
    Lookup => "_lookup",
    /// Left rotation.
    RotateLeft => "_rotate_left",
    /// Right rotation.
    RotateRight => "_rotate_right",
    /// Red-black fixup after insertion.
    InsertFixup => "_insert_fixup",
    /// Red-black fixup after deletion.
    DeleteFixup => "_delete_fixup",
    /// Leftmost node.
    LowestNode => "_lowest_node",
    /// Rightmost node.
    HighestNode => "_highest_node",
    /// In-order successor.
    NextNode => "_next_node",
    /// In-order predecessor.
    PrevNode => "_prev_node",
    /// Recursive node disposal.
    Dispose => "_dispose",

    // Treap internals
    /// Merge two treaps.
    Merge => "_merge",
    /// Split a treap at a pivot.
    Split => "_split",
    /// Recursive priority-aware insert.
    Insert => "_insert",
    /// Recursive removal.
    Erase => "_erase",

    // List internals
    /// Unlink the front node without returning it.
    DropFront => "_drop_front",
}

impl Operation {
    /// Returns true if this operation is one of the seven lifecycle operations
    /// every composite may expose.
    #[must_use]
    pub const fn is_lifecycle(self) -> bool {
        matches!(
            self,
            Self::Create
                | Self::CustomCreate
                | Self::Destroy
                | Self::Copy
                | Self::Equal
                | Self::Compare
                | Self::HashCode
        )
    }

    /// Returns true if the bare name marks an implementation detail.
    #[must_use]
    pub fn is_internal(self) -> bool {
        self.name().starts_with('_')
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
