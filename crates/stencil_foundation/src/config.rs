//! Configuration threaded through container construction and scheduling.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::naming::{CamelCase, NameResolver, SnakeCase};

/// Identifier decoration style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NamingStyle {
    /// `IntVectorHashCode`.
    #[default]
    CamelCase,
    /// `int_vector_hash_code`.
    SnakeCase,
}

impl NamingStyle {
    /// Returns the name resolver implementing this style.
    #[must_use]
    pub fn resolver(self) -> Box<dyn NameResolver> {
        match self {
            Self::CamelCase => Box::new(CamelCase),
            Self::SnakeCase => Box::new(SnakeCase),
        }
    }
}

/// How definitions are distributed over output partitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PartitionPolicy {
    /// Every definition goes into one partition.
    #[default]
    Single,
    /// A fixed number of partitions.
    Fixed(usize),
    /// As many partitions as needed to keep each near the byte threshold.
    Threshold(usize),
}

impl PartitionPolicy {
    /// Number of partitions for the given total size estimate. Never zero.
    #[must_use]
    pub fn partition_count(self, total_size: usize) -> usize {
        match self {
            Self::Single => 1,
            Self::Fixed(n) => n.max(1),
            Self::Threshold(bytes) => total_size.div_ceil(bytes.max(1)).max(1),
        }
    }
}

/// Seeding of the rotate-xor hasher every hashed container uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HasherPolicy {
    /// A seed fixed at configuration time.
    Seeded(u64),
    /// A seed drawn once per process.
    Randomized,
}

impl Default for HasherPolicy {
    fn default() -> Self {
        Self::Seeded(0)
    }
}

/// Memory handler the synthesized containers allocate through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AllocatorPolicy {
    /// `malloc`/`calloc` and `free` from the C library.
    #[default]
    Malloc,
    /// The Boehm-Demers-Weiser collector: `GC_malloc`, nothing to free.
    Collected,
}

impl AllocatorPolicy {
    /// System header declaring the allocation functions.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Malloc => "stdlib.h",
            Self::Collected => "gc.h",
        }
    }

    /// Function allocating `n` uninitialized bytes.
    #[must_use]
    pub const fn allocate(self) -> &'static str {
        match self {
            Self::Malloc => "malloc",
            Self::Collected => "GC_malloc",
        }
    }

    /// Function releasing an allocation, if memory is ever released.
    #[must_use]
    pub const fn free(self) -> Option<&'static str> {
        match self {
            Self::Malloc => Some("free"),
            Self::Collected => None,
        }
    }
}

/// Hash table tuning shared by descriptors and runtime containers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HashConfig {
    /// Maximum ratio of live elements to capacity before growing.
    pub load_factor: f64,
    /// Capacity of a freshly created table. Rounded up to a power of two.
    pub initial_capacity: usize,
    /// Hasher seeding.
    pub hasher: HasherPolicy,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            load_factor: 0.75,
            initial_capacity: 8,
            hasher: HasherPolicy::default(),
        }
    }
}

impl HashConfig {
    /// Builder method to set the hasher seeding.
    #[must_use]
    pub fn with_hasher(mut self, hasher: HasherPolicy) -> Self {
        self.hasher = hasher;
        self
    }

    /// Builder method to set the load factor.
    #[must_use]
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Builder method to set the initial capacity.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Initial capacity rounded up to a power of two.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.initial_capacity.max(1).next_power_of_two()
    }

    /// Checks the load factor and capacity.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the load factor is outside `(0, 1]` or the
    /// initial capacity is zero.
    pub fn validate(&self) -> Result<()> {
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(Error::invalid_config(format!(
                "load factor must be in (0, 1], got {}",
                self.load_factor
            )));
        }
        if self.initial_capacity == 0 {
            return Err(Error::invalid_config("initial capacity must be positive"));
        }
        Ok(())
    }
}

/// Engine-wide configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Identifier decoration style.
    pub naming: NamingStyle,
    /// Partitioning of definitions.
    pub partitions: PartitionPolicy,
    /// Hash table tuning.
    pub hash: HashConfig,
    /// Memory handler.
    pub allocator: AllocatorPolicy,
    /// Emit set-algebra methods on set containers.
    pub set_operations: bool,
    /// Emit diagnostic helpers such as hash statistics.
    pub auxiliaries: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            naming: NamingStyle::CamelCase,
            partitions: PartitionPolicy::Single,
            hash: HashConfig::default(),
            allocator: AllocatorPolicy::Malloc,
            set_operations: true,
            auxiliaries: false,
        }
    }
}

impl EngineConfig {
    /// Configuration for large modules split into partitions of roughly
    /// `threshold` bytes each.
    #[must_use]
    pub fn partitioned(threshold: usize) -> Self {
        Self {
            partitions: PartitionPolicy::Threshold(threshold),
            ..Self::default()
        }
    }

    /// Configuration with diagnostics enabled.
    #[must_use]
    pub fn diagnostic() -> Self {
        Self {
            auxiliaries: true,
            ..Self::default()
        }
    }

    /// Builder method to set the naming style.
    #[must_use]
    pub fn with_naming(mut self, naming: NamingStyle) -> Self {
        self.naming = naming;
        self
    }

    /// Builder method to set the partition policy.
    #[must_use]
    pub fn with_partitions(mut self, partitions: PartitionPolicy) -> Self {
        self.partitions = partitions;
        self
    }

    /// Builder method to set hash tuning.
    #[must_use]
    pub fn with_hash(mut self, hash: HashConfig) -> Self {
        self.hash = hash;
        self
    }

    /// Builder method to set the memory handler.
    #[must_use]
    pub fn with_allocator(mut self, allocator: AllocatorPolicy) -> Self {
        self.allocator = allocator;
        self
    }

    /// Builder method to enable/disable set-algebra methods.
    #[must_use]
    pub fn with_set_operations(mut self, enabled: bool) -> Self {
        self.set_operations = enabled;
        self
    }

    /// Builder method to enable/disable diagnostic helpers.
    #[must_use]
    pub fn with_auxiliaries(mut self, enabled: bool) -> Self {
        self.auxiliaries = enabled;
        self
    }

    /// Checks every setting.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for a zero partition count or threshold, or for
    /// invalid hash tuning.
    pub fn validate(&self) -> Result<()> {
        match self.partitions {
            PartitionPolicy::Fixed(0) => {
                return Err(Error::invalid_config("partition count must be positive"));
            }
            PartitionPolicy::Threshold(0) => {
                return Err(Error::invalid_config("partition threshold must be positive"));
            }
            _ => {}
        }
        self.hash.validate()
    }

    /// Returns the name resolver for the configured style.
    #[must_use]
    pub fn resolver(&self) -> Box<dyn NameResolver> {
        self.naming.resolver()
    }
}
