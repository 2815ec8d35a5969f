//! Range descriptors.
//!
//! Every container owns exactly one range type. The range's tier decides
//! which traversal operations it exposes, each tier extending the previous
//! one; associative ranges also expose the key at the front.

use std::fmt;

use stencil_foundation::{
    Binding, Capabilities, Capability, NameResolver, NamingStyle, Operation, Result,
    TypeDescriptor, TypeRef, Visibility,
};
use stencil_graph::{Entity, EntityGraph, EntityId};

use crate::method::{Method, MethodTable, Names, Requirement, Role, Subject};

/// Traversal tier, from weakest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RangeTier {
    /// Single pass: empty, pop, view and take at the front.
    Input,
    /// Input plus a cheap positional copy.
    Forward,
    /// Forward plus the same operations at the back.
    Bidirectional,
    /// Bidirectional plus size and indexed access.
    RandomAccess,
    /// Random access over contiguous storage.
    Contiguous,
}

impl RangeTier {
    /// Lowercase tier name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Forward => "forward",
            Self::Bidirectional => "bidirectional",
            Self::RandomAccess => "random_access",
            Self::Contiguous => "contiguous",
        }
    }

    /// Returns true if this tier offers everything `other` does.
    #[must_use]
    pub fn includes(self, other: Self) -> bool {
        self >= other
    }
}

impl fmt::Display for RangeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn catalogue(tier: RangeTier, associative: bool) -> Vec<Method> {
    use crate::method::Operand::{ConstRef, ConstTarget, Int, Iterable, Owned, Size, Target, Value, Void};
    let copyable = Requirement::element(Capability::Copyable);

    let mut methods = vec![
        Method::new(Operation::CustomCreate, Void)
            .param("range", Target)
            .param("iterable", Iterable),
        Method::new(Operation::New, Owned)
            .param("iterable", Iterable)
            .with_inline(true),
        Method::new(Operation::Copy, Void)
            .param("range", Target)
            .param("source", ConstTarget)
            .requires(Requirement::owner(Capability::Copyable)),
        Method::new(Operation::Empty, Int).param("range", ConstTarget),
        Method::new(Operation::PopFront, Void).param("range", Target),
        Method::new(Operation::ViewFront, ConstRef(Role::Element)).param("range", ConstTarget),
        Method::new(Operation::TakeFront, Value(Role::Element))
            .param("range", ConstTarget)
            .requires(copyable.clone()),
    ];
    if tier.includes(RangeTier::Bidirectional) {
        methods.extend([
            Method::new(Operation::PopBack, Void).param("range", Target),
            Method::new(Operation::ViewBack, ConstRef(Role::Element)).param("range", ConstTarget),
            Method::new(Operation::TakeBack, Value(Role::Element))
                .param("range", ConstTarget)
                .requires(copyable.clone()),
        ]);
    }
    if tier.includes(RangeTier::RandomAccess) {
        methods.extend([
            Method::new(Operation::Size, Size).param("range", ConstTarget),
            Method::new(Operation::Check, Int)
                .param("range", ConstTarget)
                .param("index", Size),
            Method::new(Operation::View, ConstRef(Role::Element))
                .param("range", ConstTarget)
                .param("index", Size),
            Method::new(Operation::Get, Value(Role::Element))
                .param("range", ConstTarget)
                .param("index", Size)
                .requires(copyable),
        ]);
    }
    if associative {
        methods.extend([
            Method::new(Operation::ViewKeyFront, ConstRef(Role::Key)).param("range", ConstTarget),
            Method::new(Operation::TakeKeyFront, Value(Role::Key))
                .param("range", ConstTarget)
                .requires(Requirement::key(Capability::Copyable)),
        ]);
    }
    methods
}

/// The range type of one container.
///
/// A range never owns its container. It is constructed from the container,
/// copyable from the forward tier up, and never needs a destructor.
#[derive(Debug)]
pub struct RangeDescriptor {
    name: String,
    iterable: String,
    element: TypeRef,
    key: Option<TypeRef>,
    tier: RangeTier,
    visibility: Visibility,
    naming: NamingStyle,
    methods: MethodTable,
}

impl RangeDescriptor {
    /// Creates the range over the named container.
    #[must_use]
    pub fn new(
        iterable: impl Into<String>,
        element: TypeRef,
        key: Option<TypeRef>,
        tier: RangeTier,
        naming: NamingStyle,
    ) -> Self {
        let iterable = iterable.into();
        let name = format!("{iterable}Range");
        let methods = MethodTable::with_methods(&name, catalogue(tier, key.is_some()));
        Self {
            name,
            iterable,
            element,
            key,
            tier,
            visibility: Visibility::Public,
            naming,
            methods,
        }
    }

    /// Builder method to set visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Range type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the iterated container.
    #[must_use]
    pub fn iterable(&self) -> &str {
        &self.iterable
    }

    /// Traversal tier.
    #[must_use]
    pub fn tier(&self) -> RangeTier {
        self.tier
    }

    /// Returns true for ranges exposing keys.
    #[must_use]
    pub fn is_associative(&self) -> bool {
        self.key.is_some()
    }

    /// Every defined method, live or not.
    #[must_use]
    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// Capability context the methods are evaluated against.
    #[must_use]
    pub fn subject(&self) -> Subject {
        Subject {
            owner: self.capabilities(),
            element: self.element.capabilities(),
            key: self.key.as_ref().map(|k| k.capabilities()).unwrap_or_default(),
            set_operations: false,
            auxiliaries: false,
        }
    }

    /// Methods emitted for this range.
    pub fn live_methods(&self) -> Vec<&Method> {
        let subject = self.subject();
        self.methods.live(&subject).collect()
    }

    fn names(&self) -> Names {
        Names {
            iterable: Some(self.iterable.clone()),
            element: Some(self.element.clone()),
            key: self.key.clone(),
            ..Names::owner(&self.name)
        }
    }

    fn resolver(&self) -> Box<dyn NameResolver> {
        self.naming.resolver()
    }

    /// Registers the range and its live methods.
    ///
    /// The range depends on its container, which references it back.
    ///
    /// # Errors
    /// Returns graph errors, for example `Frozen`.
    pub fn register(&self, graph: &mut EntityGraph, container: EntityId) -> Result<EntityId> {
        let before = graph.len();
        let id = graph.register(
            Entity::range(&self.name, &self.iterable, self.tier.name())
                .with_visibility(self.visibility),
        )?;
        if graph.len() == before {
            return Ok(id);
        }
        graph.add_dependency(id, container)?;
        graph.add_reference(container, id)?;

        self.methods.register(
            graph,
            id,
            &self.subject(),
            &self.names(),
            self.resolver().as_ref(),
            self.visibility,
        )?;
        Ok(id)
    }
}

impl TypeDescriptor for RangeDescriptor {
    fn signature(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        let copyable = if self.tier.includes(RangeTier::Forward) {
            Capabilities::COPYABLE
        } else {
            Capabilities::empty()
        };
        Capabilities::CUSTOM_CONSTRUCTIBLE | copyable
    }

    fn binding(&self, operation: Operation) -> Option<Binding> {
        let live = operation.is_lifecycle() && self.methods.is_live(operation, &self.subject());
        live.then(|| Binding::Function(self.resolver().resolve(&self.name, operation).to_string()))
    }

    fn constituents(&self) -> Vec<TypeRef> {
        vec![self.element.clone()]
    }
}
