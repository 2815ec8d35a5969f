//! Type descriptors.
//!
//! A [`TypeDescriptor`] describes one element, key or index type: its
//! source-side signature, its capability set, and the operation bindings the
//! synthesized code invokes to manipulate values of that type.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::capability::{Capabilities, Capability};
use crate::operation::Operation;

/// Visibility of a synthesized type or function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Visibility {
    /// Part of the documented public interface.
    #[default]
    Public,
    /// Declared in the interface but not documented for users.
    Internal,
    /// Visible only inside the output partition that defines it.
    Private,
}

impl Visibility {
    /// Returns true for public visibility.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Internal => write!(f, "internal"),
            Self::Private => write!(f, "private"),
        }
    }
}

/// How an operation on a type is carried out in synthesized code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Binding {
    /// Performed by a built-in language construct (assignment, `==`, ...).
    Intrinsic,
    /// Performed by calling the named function.
    Function(String),
}

impl Binding {
    /// Returns the bound function name, if any.
    #[must_use]
    pub fn function(&self) -> Option<&str> {
        match self {
            Self::Intrinsic => None,
            Self::Function(name) => Some(name),
        }
    }
}

/// A type the engine can build containers over.
///
/// Capabilities are pure functions of the descriptor and must not change
/// after construction.
pub trait TypeDescriptor: fmt::Debug + Send + Sync {
    /// Source-side type signature.
    fn signature(&self) -> &str;

    /// Prefix used to decorate type-qualified identifiers.
    ///
    /// Defaults to the signature; override when the signature is not itself a
    /// valid identifier.
    fn prefix(&self) -> &str {
        self.signature()
    }

    /// Capability set of the type.
    fn capabilities(&self) -> Capabilities;

    /// Binding for one of the lifecycle operations, if the type supports it.
    fn binding(&self, operation: Operation) -> Option<Binding>;

    /// Returns true if the given capability is present.
    fn capability(&self, capability: Capability) -> bool {
        self.capabilities().has(capability)
    }

    /// Header the type needs, if any.
    fn header(&self) -> Option<&str> {
        None
    }

    /// Constituent types folded into this one's capabilities.
    fn constituents(&self) -> Vec<TypeRef> {
        Vec::new()
    }

    /// Has a parameterless constructor.
    fn is_default_constructible(&self) -> bool {
        self.capability(Capability::DefaultConstructible)
    }

    /// Has a constructor with explicit arguments.
    fn is_custom_constructible(&self) -> bool {
        self.capability(Capability::CustomConstructible)
    }

    /// Can be constructed in any way.
    fn is_constructible(&self) -> bool {
        self.is_default_constructible() || self.is_custom_constructible()
    }

    /// Needs a non-trivial destructor.
    fn is_destructible(&self) -> bool {
        self.capability(Capability::Destructible)
    }

    /// Can be copied.
    fn is_copyable(&self) -> bool {
        self.capability(Capability::Copyable)
    }

    /// Has equality.
    fn is_comparable(&self) -> bool {
        self.capability(Capability::Comparable)
    }

    /// Has ordering.
    fn is_orderable(&self) -> bool {
        self.capability(Capability::Orderable)
    }

    /// Has hashing.
    fn is_hashable(&self) -> bool {
        self.capability(Capability::Hashable)
    }
}

/// Shared handle to a type descriptor.
pub type TypeRef = Arc<dyn TypeDescriptor>;

/// Maps a lifecycle operation to the capability it provides.
#[must_use]
pub const fn lifecycle_capability(operation: Operation) -> Option<Capability> {
    match operation {
        Operation::Create => Some(Capability::DefaultConstructible),
        Operation::CustomCreate => Some(Capability::CustomConstructible),
        Operation::Destroy => Some(Capability::Destructible),
        Operation::Copy => Some(Capability::Copyable),
        Operation::Equal => Some(Capability::Comparable),
        Operation::Compare => Some(Capability::Orderable),
        Operation::HashCode => Some(Capability::Hashable),
        _ => None,
    }
}

/// A user-supplied type described by the functions that manipulate it.
///
/// Each capability is present exactly when the corresponding operation is
/// bound. Hashing additionally requires equality, since a hash code must be
/// consistent with it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserType {
    signature: String,
    prefix: Option<String>,
    header: Option<String>,
    bindings: BTreeMap<Operation, String>,
}

impl UserType {
    /// Creates a descriptor with no operations bound.
    #[must_use]
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            prefix: None,
            header: None,
            bindings: BTreeMap::new(),
        }
    }

    /// Builder method to override the identifier prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Builder method to declare the header defining the type.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Builder method to bind a lifecycle operation to a function.
    ///
    /// Non-lifecycle operations are ignored.
    #[must_use]
    pub fn bind(mut self, operation: Operation, function: impl Into<String>) -> Self {
        if operation.is_lifecycle() {
            self.bindings.insert(operation, function.into());
        }
        self
    }

    /// Binds the parameterless constructor.
    #[must_use]
    pub fn default_create(self, function: impl Into<String>) -> Self {
        self.bind(Operation::Create, function)
    }

    /// Binds the custom constructor.
    #[must_use]
    pub fn custom_create(self, function: impl Into<String>) -> Self {
        self.bind(Operation::CustomCreate, function)
    }

    /// Binds the destructor.
    #[must_use]
    pub fn destroy(self, function: impl Into<String>) -> Self {
        self.bind(Operation::Destroy, function)
    }

    /// Binds the copy constructor.
    #[must_use]
    pub fn copy(self, function: impl Into<String>) -> Self {
        self.bind(Operation::Copy, function)
    }

    /// Binds the equality test.
    #[must_use]
    pub fn equal(self, function: impl Into<String>) -> Self {
        self.bind(Operation::Equal, function)
    }

    /// Binds the three-way comparison.
    #[must_use]
    pub fn compare(self, function: impl Into<String>) -> Self {
        self.bind(Operation::Compare, function)
    }

    /// Binds the hash function.
    #[must_use]
    pub fn hash_code(self, function: impl Into<String>) -> Self {
        self.bind(Operation::HashCode, function)
    }
}

impl TypeDescriptor for UserType {
    fn signature(&self) -> &str {
        &self.signature
    }

    fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(&self.signature)
    }

    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        for op in self.bindings.keys() {
            if let Some(cap) = lifecycle_capability(*op) {
                caps |= cap.flag();
            }
        }
        if !caps.has(Capability::Comparable) {
            caps.remove(Capabilities::HASHABLE);
        }
        caps
    }

    fn binding(&self, operation: Operation) -> Option<Binding> {
        let bound = self.bindings.get(&operation).cloned().map(Binding::Function);
        match operation {
            Operation::HashCode if !self.is_comparable() => None,
            _ => bound,
        }
    }

    fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }
}
