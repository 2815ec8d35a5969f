//! Entities: the units of emission.
//!
//! An entity is identified structurally by its signature. Registering two
//! entities with the same signature yields one node, so two containers
//! instantiated over the same element type collapse into a single emission.

use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stencil_foundation::{Identifier, Visibility};

/// Index of an entity inside its graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Broad category of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntityKind {
    /// A verbatim code fragment.
    Code,
    /// A type definition.
    Type,
    /// A function.
    Function,
    /// A container type.
    Container,
    /// A range type.
    Range,
}

/// A function parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Source-side type of the parameter.
    pub ty: String,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Prototype of a synthesized function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionSignature {
    /// Result type.
    pub result: String,
    /// Decorated function name.
    pub name: Identifier,
    /// Parameters in order.
    pub parameters: Vec<Parameter>,
    /// Defined in the interface rather than in a source partition.
    pub inline: bool,
    /// Signature of the owning type, if any.
    pub owner: Option<String>,
}

impl FunctionSignature {
    /// Creates a non-inline function signature with no parameters.
    #[must_use]
    pub fn new(result: impl Into<String>, name: Identifier) -> Self {
        Self {
            result: result.into(),
            name,
            parameters: Vec::new(),
            inline: false,
            owner: None,
        }
    }

    /// Builder method to append a parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, ty));
        self
    }

    /// Builder method to mark the function inline.
    #[must_use]
    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Builder method to record the owning type.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Renders `result name(type name, ...)`.
    #[must_use]
    pub fn prototype(&self) -> String {
        let params = if self.parameters.is_empty() {
            "void".to_string()
        } else {
            self.parameters
                .iter()
                .map(|p| format!("{} {}", p.ty, p.name))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("{} {}({params})", self.result, self.name)
    }
}

/// Kind-specific payload of an entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Detail {
    /// Verbatim fragments for each output section.
    Code {
        /// Text for the interface partition.
        interface: Option<String>,
        /// Text for forward declarations in source partitions.
        forward: Option<String>,
        /// Text for implementations in source partitions.
        implementation: Option<String>,
    },
    /// A named type, optionally defined by a system header.
    Type {
        /// Type name.
        name: String,
        /// Header declaring the type.
        header: Option<String>,
    },
    /// A function.
    Function(FunctionSignature),
    /// A container type.
    Container {
        /// Container type name.
        name: String,
        /// Container family, e.g. `hash_set`.
        family: String,
    },
    /// A range over a container.
    Range {
        /// Range type name.
        name: String,
        /// Name of the iterated container.
        iterable: String,
        /// Traversal tier, e.g. `forward`.
        tier: String,
    },
}

/// A schedulable unit of emission.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entity {
    signature: String,
    visibility: Visibility,
    detail: Detail,
    pub(crate) dependencies: BTreeSet<EntityId>,
    pub(crate) references: BTreeSet<EntityId>,
}

impl Entity {
    fn new(signature: impl Into<String>, detail: Detail) -> Self {
        Self {
            signature: signature.into(),
            visibility: Visibility::Public,
            detail,
            dependencies: BTreeSet::new(),
            references: BTreeSet::new(),
        }
    }

    /// A verbatim code fragment. Its signature is its content.
    #[must_use]
    pub fn code(
        interface: Option<&str>,
        forward: Option<&str>,
        implementation: Option<&str>,
    ) -> Self {
        let signature = format!(
            "code:{}|{}|{}",
            interface.unwrap_or_default(),
            forward.unwrap_or_default(),
            implementation.unwrap_or_default()
        );
        Self::new(
            signature,
            Detail::Code {
                interface: interface.map(str::to_string),
                forward: forward.map(str::to_string),
                implementation: implementation.map(str::to_string),
            },
        )
    }

    /// An `#include <header>` line in the interface.
    #[must_use]
    pub fn system_header(header: &str) -> Self {
        Self::code(Some(&format!("#include <{header}>\n")), None, None)
    }

    /// A type entity.
    #[must_use]
    pub fn type_def(name: impl Into<String>, header: Option<&str>) -> Self {
        let name = name.into();
        Self::new(
            format!("type:{name}"),
            Detail::Type {
                name,
                header: header.map(str::to_string),
            },
        )
    }

    /// A function entity. Its signature is the decorated name.
    #[must_use]
    pub fn function(signature: FunctionSignature) -> Self {
        Self::new(format!("fn:{}", signature.name), Detail::Function(signature))
    }

    /// A container entity.
    #[must_use]
    pub fn container(name: impl Into<String>, family: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            format!("container:{name}"),
            Detail::Container {
                name,
                family: family.into(),
            },
        )
    }

    /// A range entity.
    #[must_use]
    pub fn range(
        name: impl Into<String>,
        iterable: impl Into<String>,
        tier: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self::new(
            format!("range:{name}"),
            Detail::Range {
                name,
                iterable: iterable.into(),
                tier: tier.into(),
            },
        )
    }

    /// Builder method to set visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Structural identity.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Visibility.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Kind-specific payload.
    #[must_use]
    pub fn detail(&self) -> &Detail {
        &self.detail
    }

    /// Broad category.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self.detail {
            Detail::Code { .. } => EntityKind::Code,
            Detail::Type { .. } => EntityKind::Type,
            Detail::Function(_) => EntityKind::Function,
            Detail::Container { .. } => EntityKind::Container,
            Detail::Range { .. } => EntityKind::Range,
        }
    }

    /// Human-readable name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.detail {
            Detail::Code { .. } => &self.signature,
            Detail::Type { name, .. }
            | Detail::Container { name, .. }
            | Detail::Range { name, .. } => name,
            Detail::Function(f) => f.name.as_str(),
        }
    }

    /// Immediate dependencies.
    pub fn dependencies(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.dependencies.iter().copied()
    }

    /// Immediate references. Every dependency is also a reference.
    pub fn references(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.references.iter().copied()
    }
}
