//! Capability flags and their composition rules.
//!
//! A capability answers one yes/no question about a type: can it be built
//! without arguments, does it need cleanup, can it be hashed, and so on.
//! Composite types derive their capabilities from their constituents:
//! copyability, comparability, orderability and hashability require every
//! constituent to have them, while destructibility is required as soon as
//! any constituent needs cleanup.

use std::fmt;

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single capability a type may have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Capability {
    /// Has a parameterless constructor.
    DefaultConstructible,
    /// Has a constructor taking explicit initializer arguments.
    CustomConstructible,
    /// Has a non-trivial destructor.
    Destructible,
    /// Can be created as an independent copy of another instance.
    Copyable,
    /// Has a well-defined equality test.
    Comparable,
    /// Has a well-defined less/equal/greater comparison.
    Orderable,
    /// Can compute a hash code consistent with equality.
    Hashable,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Capability; 7] = [
        Capability::DefaultConstructible,
        Capability::CustomConstructible,
        Capability::Destructible,
        Capability::Copyable,
        Capability::Comparable,
        Capability::Orderable,
        Capability::Hashable,
    ];

    /// Returns the lowercase name of the capability.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DefaultConstructible => "default constructible",
            Self::CustomConstructible => "custom constructible",
            Self::Destructible => "destructible",
            Self::Copyable => "copyable",
            Self::Comparable => "comparable",
            Self::Orderable => "orderable",
            Self::Hashable => "hashable",
        }
    }

    /// Returns the flag corresponding to this capability.
    #[must_use]
    pub const fn flag(self) -> Capabilities {
        match self {
            Self::DefaultConstructible => Capabilities::DEFAULT_CONSTRUCTIBLE,
            Self::CustomConstructible => Capabilities::CUSTOM_CONSTRUCTIBLE,
            Self::Destructible => Capabilities::DESTRUCTIBLE,
            Self::Copyable => Capabilities::COPYABLE,
            Self::Comparable => Capabilities::COMPARABLE,
            Self::Orderable => Capabilities::ORDERABLE,
            Self::Hashable => Capabilities::HASHABLE,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// A set of capabilities.
    ///
    /// Computed once when a descriptor is constructed and never changed afterwards.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Capabilities: u8 {
        /// Parameterless constructor available.
        const DEFAULT_CONSTRUCTIBLE = 1 << 0;
        /// Constructor with explicit arguments available.
        const CUSTOM_CONSTRUCTIBLE = 1 << 1;
        /// Non-trivial destructor required.
        const DESTRUCTIBLE = 1 << 2;
        /// Copy constructor available.
        const COPYABLE = 1 << 3;
        /// Equality test available.
        const COMPARABLE = 1 << 4;
        /// Three-way comparison available.
        const ORDERABLE = 1 << 5;
        /// Hash code available.
        const HASHABLE = 1 << 6;

        /// Capabilities folded by conjunction over constituents.
        const CONJUNCTIVE = Self::COPYABLE.bits()
            | Self::COMPARABLE.bits()
            | Self::ORDERABLE.bits()
            | Self::HASHABLE.bits();

        /// Capabilities folded by disjunction over constituents.
        const DISJUNCTIVE = Self::DESTRUCTIBLE.bits();

        /// Capabilities of a plain scalar value.
        const SCALAR = Self::DEFAULT_CONSTRUCTIBLE.bits()
            | Self::CUSTOM_CONSTRUCTIBLE.bits()
            | Self::COPYABLE.bits()
            | Self::COMPARABLE.bits()
            | Self::ORDERABLE.bits()
            | Self::HASHABLE.bits();
    }
}

impl Capabilities {
    /// Returns true if the given capability is present.
    #[must_use]
    pub const fn has(self, capability: Capability) -> bool {
        self.contains(capability.flag())
    }

    /// Returns a copy with the capability set or cleared.
    #[must_use]
    pub fn with(mut self, capability: Capability, present: bool) -> Self {
        self.set(capability.flag(), present);
        self
    }

    /// Returns the capabilities present, in declaration order.
    #[must_use]
    pub fn list(self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.has(*c))
            .collect()
    }

    /// Folds constituent capabilities into a composite's own capabilities.
    ///
    /// The conjunctive capabilities of `own` survive only if every constituent
    /// has them; destructibility is set if `own` or any constituent needs it.
    /// Constructibility is not folded, it remains whatever `own` declares.
    #[must_use]
    pub fn compose(own: Self, constituents: impl IntoIterator<Item = Self>) -> Self {
        let mut conjunction = Self::CONJUNCTIVE;
        let mut disjunction = Self::empty();
        for c in constituents {
            conjunction &= c;
            disjunction |= c & Self::DISJUNCTIVE;
        }
        let constructible = own & (Self::DEFAULT_CONSTRUCTIBLE | Self::CUSTOM_CONSTRUCTIBLE);
        let conjunctive = own & conjunction;
        let disjunctive = (own & Self::DISJUNCTIVE) | disjunction;
        constructible | conjunctive | disjunctive
    }

    /// Folds constituents with no overriding capabilities of its own.
    ///
    /// Equivalent to [`Capabilities::compose`] with an `own` set holding every
    /// conjunctive capability and no destructor.
    #[must_use]
    pub fn fold(constituents: impl IntoIterator<Item = Self>) -> Self {
        Self::compose(Self::CONJUNCTIVE, constituents)
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.list().into_iter().map(Capability::name).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
