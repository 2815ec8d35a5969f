//! Methods and their liveness requirements.
//!
//! A [`Method`] describes one function a container, range or record may
//! expose: its operation, result and parameters, visibility, and a
//! [`Requirement`] deciding whether it is emitted at all. Requirements are
//! plain data evaluated once against a [`Subject`], the capability sets of
//! the owner and its constituents plus the engine switches.

use std::fmt;

use stencil_foundation::{
    Binding, Capabilities, Capability, Error, Identifier, NameResolver, Operation, Result, TypeRef,
    Visibility,
};
use stencil_graph::{Entity, EntityGraph, EntityId, FunctionSignature};
use tracing::trace;

// =============================================================================
// Requirement
// =============================================================================

/// Which part of a subject a capability is demanded of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The type owning the method.
    Owner,
    /// The element type.
    Element,
    /// The key or index type of an associative container.
    Key,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Element => write!(f, "element"),
            Self::Key => write!(f, "key"),
        }
    }
}

/// An engine switch a method may depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Switch {
    /// Set-algebra methods.
    SetOperations,
    /// Diagnostic helpers.
    Auxiliaries,
}

/// Condition under which a method is emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// Always emitted.
    Always,
    /// The given role must have the capability.
    Capable(Role, Capability),
    /// The switch must be on.
    Enabled(Switch),
    /// Every requirement must hold.
    All(Vec<Requirement>),
}

/// The first unmet part of a requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unmet {
    /// A role lacks a capability.
    Capability(Role, Capability),
    /// A switch is off.
    Disabled(Switch),
}

impl Requirement {
    /// Capability demanded of the owner.
    #[must_use]
    pub const fn owner(capability: Capability) -> Self {
        Self::Capable(Role::Owner, capability)
    }

    /// Capability demanded of the element.
    #[must_use]
    pub const fn element(capability: Capability) -> Self {
        Self::Capable(Role::Element, capability)
    }

    /// Capability demanded of the key.
    #[must_use]
    pub const fn key(capability: Capability) -> Self {
        Self::Capable(Role::Key, capability)
    }

    /// Conjunction of this requirement and `other`.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Always, r) | (r, Self::Always) => r,
            (Self::All(mut a), Self::All(b)) => {
                a.extend(b);
                Self::All(a)
            }
            (Self::All(mut a), r) => {
                a.push(r);
                Self::All(a)
            }
            (l, r) => Self::All(vec![l, r]),
        }
    }

    /// The first unmet part, or `None` if the requirement holds.
    #[must_use]
    pub fn unmet(&self, subject: &Subject) -> Option<Unmet> {
        match self {
            Self::Always => None,
            Self::Capable(role, capability) => {
                (!subject.capabilities(*role).has(*capability))
                    .then_some(Unmet::Capability(*role, *capability))
            }
            Self::Enabled(switch) => (!subject.enabled(*switch)).then_some(Unmet::Disabled(*switch)),
            Self::All(parts) => parts.iter().find_map(|r| r.unmet(subject)),
        }
    }

    /// Returns true if the requirement holds.
    #[must_use]
    pub fn holds(&self, subject: &Subject) -> bool {
        self.unmet(subject).is_none()
    }
}

/// What a requirement is evaluated against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Subject {
    /// Owner capabilities.
    pub owner: Capabilities,
    /// Element capabilities. Empty for types without elements.
    pub element: Capabilities,
    /// Key capabilities. Empty for non-associative types.
    pub key: Capabilities,
    /// Set-algebra switch.
    pub set_operations: bool,
    /// Diagnostics switch.
    pub auxiliaries: bool,
}

impl Subject {
    /// Capabilities of one role.
    #[must_use]
    pub const fn capabilities(&self, role: Role) -> Capabilities {
        match role {
            Role::Owner => self.owner,
            Role::Element => self.element,
            Role::Key => self.key,
        }
    }

    /// State of one switch.
    #[must_use]
    pub const fn enabled(&self, switch: Switch) -> bool {
        match switch {
            Switch::SetOperations => self.set_operations,
            Switch::Auxiliaries => self.auxiliaries,
        }
    }
}

// =============================================================================
// Operands
// =============================================================================

/// Source-side type of a result or parameter, resolved against a [`Names`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// `void`.
    Void,
    /// `int`, used for flags and counts.
    Int,
    /// `size_t`.
    Size,
    /// Mutable pointer to the owner.
    Target,
    /// Constant pointer to the owner.
    ConstTarget,
    /// The owner by value.
    Owned,
    /// Constant pointer to the iterated container of a range.
    Iterable,
    /// Pointer to the internal node or slot type.
    Node,
    /// A role by value.
    Value(Role),
    /// A role passed in for reading.
    ConstValue(Role),
    /// Constant pointer to a stored role.
    ConstRef(Role),
    /// Any other spelling.
    Raw(String),
}

/// Type names an operand resolves against.
#[derive(Clone, Debug)]
pub struct Names {
    /// Owner type.
    pub owner: String,
    /// Iterated container, for ranges.
    pub iterable: Option<String>,
    /// Internal node or slot type.
    pub node: Option<String>,
    /// Element type.
    pub element: Option<TypeRef>,
    /// Key type.
    pub key: Option<TypeRef>,
}

impl Names {
    /// Names for a type without elements.
    #[must_use]
    pub fn owner(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            iterable: None,
            node: None,
            element: None,
            key: None,
        }
    }

    fn role(&self, role: Role) -> &str {
        let ty = match role {
            Role::Owner => return self.owner.as_str(),
            Role::Element => self.element.as_ref(),
            Role::Key => self.key.as_ref(),
        };
        ty.map_or("void", |t| t.signature())
    }

    /// Types manipulated by language intrinsics are passed by value.
    fn by_value(&self, role: Role) -> bool {
        let ty = match role {
            Role::Owner => return false,
            Role::Element => self.element.as_ref(),
            Role::Key => self.key.as_ref(),
        };
        ty.is_some_and(|t| t.binding(Operation::Copy) == Some(Binding::Intrinsic))
    }

    /// Spells an operand.
    #[must_use]
    pub fn render(&self, operand: &Operand) -> String {
        match *operand {
            Operand::Void => "void".to_string(),
            Operand::Int => "int".to_string(),
            Operand::Size => "size_t".to_string(),
            Operand::Target => format!("{}*", self.owner),
            Operand::ConstTarget => format!("const {}*", self.owner),
            Operand::Owned => self.owner.clone(),
            Operand::Iterable => {
                format!("const {}*", self.iterable.as_deref().unwrap_or(&self.owner))
            }
            Operand::Node => format!("{}*", self.node.as_deref().unwrap_or("void")),
            Operand::Value(role) => self.role(role).to_string(),
            Operand::ConstValue(role) if self.by_value(role) => format!("const {}", self.role(role)),
            Operand::ConstValue(role) | Operand::ConstRef(role) => {
                format!("const {}*", self.role(role))
            }
            Operand::Raw(ref text) => text.clone(),
        }
    }
}

// =============================================================================
// Method
// =============================================================================

/// One function a type may expose.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
    operation: Operation,
    result: Operand,
    parameters: Vec<(String, Operand)>,
    requirement: Requirement,
    visibility: Visibility,
    inline: bool,
}

impl Method {
    /// Creates an always-live public method with no parameters.
    ///
    /// Operations whose bare name starts with an underscore default to
    /// private visibility.
    #[must_use]
    pub fn new(operation: Operation, result: Operand) -> Self {
        let visibility = if operation.is_internal() {
            Visibility::Private
        } else {
            Visibility::Public
        };
        Self {
            operation,
            result,
            parameters: Vec::new(),
            requirement: Requirement::Always,
            visibility,
            inline: false,
        }
    }

    /// Builder method to append a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, operand: Operand) -> Self {
        self.parameters.push((name.into(), operand));
        self
    }

    /// Builder method to add a requirement.
    #[must_use]
    pub fn requires(mut self, requirement: Requirement) -> Self {
        self.requirement = self.requirement.and(requirement);
        self
    }

    /// Builder method to set visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Builder method to define the method in the interface.
    #[must_use]
    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// The operation.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The result operand.
    #[must_use]
    pub fn result(&self) -> &Operand {
        &self.result
    }

    /// Parameters in order.
    #[must_use]
    pub fn parameters(&self) -> &[(String, Operand)] {
        &self.parameters
    }

    /// The liveness requirement.
    #[must_use]
    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// Visibility.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns true if the method is emitted for `subject`.
    #[must_use]
    pub fn is_live(&self, subject: &Subject) -> bool {
        self.requirement.holds(subject)
    }

    /// Roles appearing in the result or parameters.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        std::iter::once(&self.result)
            .chain(self.parameters.iter().map(|(_, o)| o))
            .filter_map(|o| match o {
                Operand::Value(r) | Operand::ConstValue(r) | Operand::ConstRef(r) => Some(*r),
                _ => None,
            })
    }

    /// Decorated function name.
    #[must_use]
    pub fn identifier(&self, prefix: &str, resolver: &dyn NameResolver) -> Identifier {
        resolver.resolve(prefix, self.operation)
    }

    /// Full prototype with every operand resolved.
    #[must_use]
    pub fn signature(&self, prefix: &str, names: &Names, resolver: &dyn NameResolver) -> FunctionSignature {
        self.parameters.iter().fold(
            FunctionSignature::new(names.render(&self.result), self.identifier(prefix, resolver))
                .with_inline(self.inline)
                .with_owner(names.owner.clone()),
            |sig, (name, operand)| sig.with_parameter(name.clone(), names.render(operand)),
        )
    }
}

// =============================================================================
// MethodTable
// =============================================================================

/// Ordered set of methods, at most one per operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MethodTable {
    owner: String,
    methods: Vec<Method>,
}

impl MethodTable {
    /// Creates an empty table for the named owner.
    #[must_use]
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            methods: Vec::new(),
        }
    }

    /// Creates a table from methods known to name distinct operations.
    pub(crate) fn with_methods(owner: impl Into<String>, methods: Vec<Method>) -> Self {
        let table = Self {
            owner: owner.into(),
            methods,
        };
        debug_assert!(
            table
                .methods
                .iter()
                .enumerate()
                .all(|(i, m)| table.methods[..i].iter().all(|n| n.operation != m.operation)),
            "duplicate operation in {}",
            table.owner
        );
        table
    }

    /// Number of methods, live or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns true if no method is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Adds a method.
    ///
    /// # Errors
    /// Returns `DuplicateOperation` if the operation is already defined.
    pub fn define(&mut self, method: Method) -> Result<()> {
        if self.get(method.operation).is_some() {
            return Err(Error::duplicate_operation(&self.owner, method.operation.name()));
        }
        self.methods.push(method);
        Ok(())
    }

    /// Looks up a method by operation.
    #[must_use]
    pub fn get(&self, operation: Operation) -> Option<&Method> {
        self.methods.iter().find(|m| m.operation == operation)
    }

    /// All methods in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter()
    }

    /// Methods emitted for `subject`.
    pub fn live<'a>(&'a self, subject: &Subject) -> impl Iterator<Item = &'a Method> + use<'a> {
        let subject = *subject;
        self.methods.iter().filter(move |m| m.is_live(&subject))
    }

    /// Returns true if `operation` is defined and live.
    #[must_use]
    pub fn is_live(&self, operation: Operation, subject: &Subject) -> bool {
        self.get(operation).is_some_and(|m| m.is_live(subject))
    }

    /// Registers every live method as a function entity that depends on
    /// `owner` and is referenced back by it. Dead methods are skipped.
    ///
    /// Public methods take the owner's `visibility`; hidden ones keep their own.
    ///
    /// # Errors
    /// Returns graph errors, for example `Frozen`.
    pub fn register(
        &self,
        graph: &mut EntityGraph,
        owner: EntityId,
        subject: &Subject,
        names: &Names,
        resolver: &dyn NameResolver,
        visibility: Visibility,
    ) -> Result<Vec<EntityId>> {
        let mut ids = Vec::new();
        for method in &self.methods {
            if !method.is_live(subject) {
                trace!(owner = %names.owner, method = %method.operation, "suppressed");
                continue;
            }
            let visibility = if method.visibility.is_public() {
                visibility
            } else {
                method.visibility
            };
            let signature = method.signature(&names.owner, names, resolver);
            let id = graph.register(Entity::function(signature).with_visibility(visibility))?;
            graph.add_dependency(id, owner)?;
            graph.add_reference(owner, id)?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Resolves an explicit request for `operation`.
    ///
    /// # Errors
    /// Returns `MissingCapability` naming the first unmet capability if the
    /// method is defined but dead, and `InvalidConfig` if it is switched off
    /// or not defined at all.
    pub fn require(&self, operation: Operation, subject: &Subject) -> Result<&Method> {
        let method = self.get(operation).ok_or_else(|| {
            Error::invalid_config(format!("{} has no operation {operation}", self.owner))
        })?;
        match method.requirement.unmet(subject) {
            None => Ok(method),
            Some(Unmet::Capability(role, capability)) => Err(Error::missing_capability(
                format!("{} ({role})", self.owner),
                operation.name(),
                capability,
            )),
            Some(Unmet::Disabled(switch)) => Err(Error::invalid_config(format!(
                "{operation} on {} is disabled by {switch:?}",
                self.owner
            ))),
        }
    }
}
