//! Container descriptors.
//!
//! A [`Container`] ties a container family to its element (and key) types.
//! Construction validates the key, folds the constituent capabilities into
//! the container's own, and assembles the family's method catalogue.
//! Registration then emits the container, its internal node type, its live
//! methods and its range into an [`EntityGraph`].

use std::fmt;
use std::sync::OnceLock;

use stencil_foundation::{
    Binding, Capabilities, Capability, EngineConfig, Error, Operation, Result, TypeDescriptor,
    TypeRef, Visibility, lifecycle_capability,
};
use stencil_graph::{Entity, EntityGraph, EntityId, Module};
use tracing::debug;

use crate::catalogue;
use crate::constituent::{Constituent, definitions};
use crate::method::{Method, MethodTable, Names, Role, Subject};
use crate::range::{RangeDescriptor, RangeTier};
use crate::support;

// =============================================================================
// ContainerKind
// =============================================================================

/// A container family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Contiguous resizable array.
    Vector,
    /// Singly linked list.
    List,
    /// Doubly linked queue.
    Queue,
    /// Open-addressing hash set.
    HashSet,
    /// Open-addressing hash map.
    HashMap,
    /// Hash set marking free slots with sentinel element values.
    IntrusiveHashSet,
    /// Hash map marking free slots with sentinel key values.
    IntrusiveHashMap,
    /// Red-black tree set.
    TreeSet,
    /// Red-black tree map.
    TreeMap,
    /// Treap set.
    TreapSet,
    /// Treap map.
    TreapMap,
}

impl ContainerKind {
    /// All families.
    pub const ALL: [ContainerKind; 11] = [
        Self::Vector,
        Self::List,
        Self::Queue,
        Self::HashSet,
        Self::HashMap,
        Self::IntrusiveHashSet,
        Self::IntrusiveHashMap,
        Self::TreeSet,
        Self::TreeMap,
        Self::TreapSet,
        Self::TreapMap,
    ];

    /// Family name.
    #[must_use]
    pub const fn family(self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::List => "list",
            Self::Queue => "queue",
            Self::HashSet => "hash_set",
            Self::HashMap => "hash_map",
            Self::IntrusiveHashSet => "intrusive_hash_set",
            Self::IntrusiveHashMap => "intrusive_hash_map",
            Self::TreeSet => "tree_set",
            Self::TreeMap => "tree_map",
            Self::TreapSet => "treap_set",
            Self::TreapMap => "treap_map",
        }
    }

    /// Returns true for maps.
    #[must_use]
    pub const fn is_associative(self) -> bool {
        matches!(
            self,
            Self::HashMap | Self::IntrusiveHashMap | Self::TreeMap | Self::TreapMap
        )
    }

    /// Returns true for sets.
    #[must_use]
    pub const fn is_set(self) -> bool {
        matches!(
            self,
            Self::HashSet | Self::IntrusiveHashSet | Self::TreeSet | Self::TreapSet
        )
    }

    /// Returns true for the hash families.
    #[must_use]
    pub const fn is_hashed(self) -> bool {
        matches!(
            self,
            Self::HashSet | Self::HashMap | Self::IntrusiveHashSet | Self::IntrusiveHashMap
        )
    }

    /// Returns true for the sentinel-marking hash families.
    #[must_use]
    pub const fn is_intrusive(self) -> bool {
        matches!(self, Self::IntrusiveHashSet | Self::IntrusiveHashMap)
    }

    /// Capability the lookup type (set element or map key) must have.
    #[must_use]
    pub const fn key_capability(self) -> Option<Capability> {
        match self {
            Self::Vector | Self::List | Self::Queue => None,
            Self::HashSet | Self::HashMap | Self::IntrusiveHashSet | Self::IntrusiveHashMap => {
                Some(Capability::Hashable)
            }
            Self::TreeSet | Self::TreeMap | Self::TreapSet | Self::TreapMap => {
                Some(Capability::Orderable)
            }
        }
    }

    /// Tier of the family's range.
    #[must_use]
    pub const fn range_tier(self) -> RangeTier {
        match self {
            Self::Vector => RangeTier::Contiguous,
            Self::Queue => RangeTier::Bidirectional,
            _ => RangeTier::Forward,
        }
    }

    /// Bare name of the internal node or slot type, if the family has one.
    #[must_use]
    pub const fn node(self) -> Option<&'static str> {
        match self {
            Self::Vector | Self::IntrusiveHashSet | Self::IntrusiveHashMap => None,
            Self::HashSet => Some("_slot"),
            _ => Some("_node"),
        }
    }

    /// The operation implementing `custom_create` for this family.
    #[must_use]
    pub const fn custom_constructor(self) -> Option<Operation> {
        match self {
            Self::Vector => Some(Operation::CreateSize),
            Self::HashSet | Self::HashMap | Self::IntrusiveHashSet | Self::IntrusiveHashMap => {
                Some(Operation::CreateCapacity)
            }
            _ => None,
        }
    }

    /// Capabilities the family claims before folding its constituents.
    ///
    /// Every container owns storage and so needs a destructor. Sets and maps
    /// are never orderable. A vector can only be sized with default elements.
    #[must_use]
    pub fn own_capabilities(self, element: Capabilities) -> Capabilities {
        let base = Capabilities::CONJUNCTIVE | Capabilities::DESTRUCTIBLE;
        let unordered = base - Capabilities::ORDERABLE;
        match self {
            Self::Vector if element.has(Capability::DefaultConstructible) => {
                base | Capabilities::CUSTOM_CONSTRUCTIBLE
            }
            Self::Vector => base,
            Self::List | Self::Queue => base | Capabilities::DEFAULT_CONSTRUCTIBLE,
            Self::HashSet | Self::HashMap | Self::IntrusiveHashSet | Self::IntrusiveHashMap => {
                unordered | Capabilities::DEFAULT_CONSTRUCTIBLE | Capabilities::CUSTOM_CONSTRUCTIBLE
            }
            Self::TreeSet | Self::TreeMap | Self::TreapSet | Self::TreapMap => {
                unordered | Capabilities::DEFAULT_CONSTRUCTIBLE
            }
        }
    }

    /// Assembles the family's methods.
    ///
    /// # Errors
    /// Returns `DuplicateOperation` if two families define the same operation.
    pub fn catalogue(self, owner: &str) -> Result<MethodTable> {
        let mut table = MethodTable::new(owner);
        catalogue::lifecycle(&mut table)?;
        catalogue::collection(&mut table)?;
        let lookup = if self.is_associative() {
            Role::Key
        } else {
            Role::Element
        };
        match self {
            Self::Vector => catalogue::vector(&mut table)?,
            Self::List => catalogue::list(&mut table)?,
            Self::Queue => catalogue::queue(&mut table)?,
            Self::HashSet | Self::IntrusiveHashSet | Self::HashMap | Self::IntrusiveHashMap => {
                if self.is_set() {
                    catalogue::set(&mut table)?;
                } else {
                    catalogue::association(&mut table)?;
                }
                catalogue::hash(&mut table, lookup, self.is_intrusive())?;
                catalogue::diagnostics(&mut table, lookup)?;
            }
            Self::TreeSet | Self::TreapSet => {
                catalogue::set(&mut table)?;
                if self == Self::TreeSet {
                    catalogue::red_black(&mut table, lookup)?;
                } else {
                    catalogue::treap(&mut table, lookup)?;
                }
            }
            Self::TreeMap | Self::TreapMap => {
                catalogue::association(&mut table)?;
                if self == Self::TreeMap {
                    catalogue::red_black(&mut table, lookup)?;
                } else {
                    catalogue::treap(&mut table, lookup)?;
                }
            }
        }
        Ok(table)
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family())
    }
}

// =============================================================================
// Container
// =============================================================================

/// A container type over an element and, for maps, a key.
///
/// Containers are type descriptors themselves and can be nested.
#[derive(Debug)]
pub struct Container {
    kind: ContainerKind,
    name: String,
    element: Constituent,
    key: Option<Constituent>,
    visibility: Visibility,
    config: EngineConfig,
    capabilities: Capabilities,
    methods: MethodTable,
    range: OnceLock<RangeDescriptor>,
}

impl Container {
    /// Creates a sequence or set.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for a map family or an invalid configuration,
    /// and `IncompatibleKey` if a set element lacks the family's lookup
    /// capability.
    pub fn new(
        kind: ContainerKind,
        name: impl Into<String>,
        element: impl Into<Constituent>,
        config: &EngineConfig,
    ) -> Result<Self> {
        let name = name.into();
        if kind.is_associative() {
            return Err(Error::invalid_config(format!("{kind} {name} needs a key type")));
        }
        Self::build(kind, name, element.into(), None, config)
    }

    /// Creates a map.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for a non-map family or an invalid
    /// configuration, and `IncompatibleKey` if the key lacks the family's
    /// lookup capability.
    pub fn associative(
        kind: ContainerKind,
        name: impl Into<String>,
        key: impl Into<Constituent>,
        element: impl Into<Constituent>,
        config: &EngineConfig,
    ) -> Result<Self> {
        let name = name.into();
        if !kind.is_associative() {
            return Err(Error::invalid_config(format!("{kind} {name} takes no key type")));
        }
        Self::build(kind, name, element.into(), Some(key.into()), config)
    }

    fn build(
        kind: ContainerKind,
        name: String,
        element: Constituent,
        key: Option<Constituent>,
        config: &EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let lookup = key.as_ref().unwrap_or(&element).descriptor();
        if let Some(capability) = kind.key_capability() {
            if !lookup.capability(capability) {
                return Err(Error::incompatible_key(&name, lookup.signature(), capability));
            }
        }
        let element_caps = element.descriptor().capabilities();
        let constituents = std::iter::once(element_caps)
            .chain(key.as_ref().map(|k| k.descriptor().capabilities()));
        let capabilities =
            Capabilities::compose(kind.own_capabilities(element_caps), constituents);
        let methods = kind.catalogue(&name)?;
        debug!(container = %name, %kind, %capabilities, "container configured");
        Ok(Self {
            kind,
            name,
            element,
            key,
            visibility: Visibility::Public,
            config: config.clone(),
            capabilities,
            methods,
            range: OnceLock::new(),
        })
    }

    /// Builder method to set visibility. The range inherits it.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self.range = OnceLock::new();
        self
    }

    /// Container family.
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Container type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element type.
    #[must_use]
    pub fn element(&self) -> &Constituent {
        &self.element
    }

    /// Key type of a map.
    #[must_use]
    pub fn key(&self) -> Option<&Constituent> {
        self.key.as_ref()
    }

    /// Visibility.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Every defined method, live or not.
    #[must_use]
    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// The container's range, created on first use.
    pub fn range(&self) -> &RangeDescriptor {
        self.range.get_or_init(|| {
            RangeDescriptor::new(
                &self.name,
                self.element.descriptor(),
                self.key.as_ref().map(Constituent::descriptor),
                self.kind.range_tier(),
                self.config.naming,
            )
            .with_visibility(self.visibility)
        })
    }

    /// Capability context the methods are evaluated against.
    #[must_use]
    pub fn subject(&self) -> Subject {
        Subject {
            owner: self.capabilities,
            element: self.element.descriptor().capabilities(),
            key: self
                .key
                .as_ref()
                .map(|k| k.descriptor().capabilities())
                .unwrap_or_default(),
            set_operations: self.config.set_operations,
            auxiliaries: self.config.auxiliaries,
        }
    }

    /// Methods emitted for this container.
    pub fn live_methods(&self) -> Vec<&Method> {
        self.methods.live(&self.subject()).collect()
    }

    /// Returns true if `operation` is emitted.
    #[must_use]
    pub fn has(&self, operation: Operation) -> bool {
        self.methods.is_live(operation, &self.subject())
    }

    /// Resolves an explicit request for `operation`.
    ///
    /// # Errors
    /// Returns `MissingCapability` if the operation exists for the family but
    /// a constituent lacks what it needs.
    pub fn require(&self, operation: Operation) -> Result<&Method> {
        self.methods.require(operation, &self.subject())
    }

    /// Name of the internal node or slot type.
    #[must_use]
    pub fn node_name(&self) -> Option<String> {
        let bare = self.kind.node()?;
        Some(self.config.resolver().decorate(&self.name, bare, true).to_string())
    }

    fn names(&self) -> Names {
        let node = if self.kind.is_intrusive() {
            Some(self.key.as_ref().unwrap_or(&self.element).signature())
        } else {
            self.node_name()
        };
        Names {
            node,
            element: Some(self.element.descriptor()),
            key: self.key.as_ref().map(Constituent::descriptor),
            ..Names::owner(&self.name)
        }
    }

    /// Registers the container, its constituents, node type, live methods
    /// and range. Registering an already present container is a lookup.
    ///
    /// # Errors
    /// Returns graph errors, for example `Frozen`.
    #[tracing::instrument(level = "debug", skip_all, fields(container = %self.name))]
    pub fn register(&self, graph: &mut EntityGraph) -> Result<EntityId> {
        let before = graph.len();
        let id = graph.register(
            Entity::container(&self.name, self.kind.family()).with_visibility(self.visibility),
        )?;
        if graph.len() == before {
            return Ok(id);
        }

        let mut needs = vec![
            graph.register(definitions())?,
            support::allocator(graph, self.config.allocator)?,
        ];
        if self.kind.is_hashed() {
            needs.push(support::hasher(graph, self.config.hash.hasher)?);
            if self.config.auxiliaries {
                needs.push(graph.register(Entity::system_header("stdio.h"))?);
            }
        }
        needs.extend(self.element.register(graph)?);
        if let Some(key) = &self.key {
            needs.extend(key.register(graph)?);
        }
        if let Some(node) = self.node_name() {
            let node = graph.register(Entity::type_def(node, None).with_visibility(Visibility::Private))?;
            for constituent in needs.clone() {
                graph.add_dependency(node, constituent)?;
            }
            needs.push(node);
        }
        for need in needs {
            graph.add_dependency(id, need)?;
        }

        let functions = self.methods.register(
            graph,
            id,
            &self.subject(),
            &self.names(),
            self.config.resolver().as_ref(),
            self.visibility,
        )?;
        self.range().register(graph, id)?;
        debug!(functions = functions.len(), "container registered");
        Ok(id)
    }

    /// Registers the container and marks it as a root of `module`.
    ///
    /// # Errors
    /// Returns graph errors, for example `Frozen`.
    pub fn add_to(&self, module: &mut Module) -> Result<EntityId> {
        let id = self.register(module.graph_mut())?;
        module.add_root(id);
        Ok(id)
    }
}

impl TypeDescriptor for Container {
    fn signature(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn binding(&self, operation: Operation) -> Option<Binding> {
        let implemented = match operation {
            Operation::CustomCreate => self.kind.custom_constructor()?,
            op if op.is_lifecycle() => op,
            _ => return None,
        };
        let live = self.capabilities.has(lifecycle_capability(operation)?)
            && self.has(implemented);
        live.then(|| {
            Binding::Function(self.config.resolver().resolve(&self.name, implemented).to_string())
        })
    }

    fn constituents(&self) -> Vec<TypeRef> {
        std::iter::once(self.element.descriptor())
            .chain(self.key.as_ref().map(Constituent::descriptor))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use stencil_foundation::{ErrorKind, Primitive, UserType};
    use stencil_graph::EntityKind;

    fn int_container(kind: ContainerKind, name: &str) -> Container {
        let config = EngineConfig::default();
        if kind.is_associative() {
            Container::associative(kind, name, Primitive::int(), Primitive::int(), &config)
        } else {
            Container::new(kind, name, Primitive::int(), &config)
        }
        .unwrap()
    }

    fn point() -> TypeRef {
        Arc::new(
            UserType::new("Point")
                .default_create("PointCreate")
                .copy("PointCopy")
                .equal("PointEqual"),
        )
    }

    #[test]
    fn every_family_builds_over_int() {
        for kind in ContainerKind::ALL {
            let c = int_container(kind, &format!("int_{kind}"));
            assert!(c.is_destructible(), "{kind}");
            assert!(c.is_copyable(), "{kind}");
            assert!(c.has(Operation::Size), "{kind}");
        }
    }

    #[test]
    fn hash_set_needs_hashable_element() {
        let err = Container::new(ContainerKind::HashSet, "PointSet", point(), &EngineConfig::default())
            .unwrap_err();
        match err.kind {
            ErrorKind::IncompatibleKey { container, key, capability } => {
                assert_eq!(container, "PointSet");
                assert_eq!(key, "Point");
                assert_eq!(capability, Capability::Hashable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn tree_map_needs_orderable_key() {
        let err = Container::associative(
            ContainerKind::TreeMap,
            "PointIntMap",
            point(),
            Primitive::int(),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IncompatibleKey { .. }));
    }

    #[test]
    fn map_family_requires_key_and_sequence_rejects_one() {
        let config = EngineConfig::default();
        assert!(Container::new(ContainerKind::HashMap, "M", Primitive::int(), &config).is_err());
        assert!(
            Container::associative(ContainerKind::List, "L", Primitive::int(), Primitive::int(), &config)
                .is_err()
        );
    }

    #[test]
    fn capabilities_fold_over_element() {
        let list = Container::new(ContainerKind::List, "PointList", point(), &EngineConfig::default()).unwrap();
        assert!(list.is_copyable());
        assert!(list.is_comparable());
        assert!(!list.is_hashable());
        assert!(!list.is_orderable());
        assert!(list.has(Operation::Equal));
        assert!(!list.has(Operation::HashCode));
        assert!(list.has(Operation::Contains));
    }

    #[test]
    fn sets_are_never_orderable() {
        let set = int_container(ContainerKind::TreeSet, "IntTreeSet");
        assert!(!set.is_orderable());
        assert!(!set.has(Operation::Compare));
        assert!(set.is_hashable());
    }

    #[test]
    fn sized_vector_without_default_elements_has_no_constructor() {
        let blob: TypeRef = Arc::new(UserType::new("Blob").copy("BlobCopy"));
        let v = Container::new(ContainerKind::Vector, "BlobVector", blob, &EngineConfig::default()).unwrap();
        assert!(!v.is_default_constructible());
        assert!(!v.is_custom_constructible());
        assert!(!v.has(Operation::CreateSize));
        assert!(!v.has(Operation::Resize));
        assert!(v.has(Operation::CreateSet));
        assert!(v.has(Operation::Copy));

        let v = int_container(ContainerKind::Vector, "IntVector");
        assert!(v.is_custom_constructible());
        assert_eq!(
            v.binding(Operation::CustomCreate),
            Some(Binding::Function("IntVectorCreateSize".to_string()))
        );
        assert_eq!(
            v.binding(Operation::Destroy),
            Some(Binding::Function("IntVectorDestroy".to_string()))
        );
    }

    #[test]
    fn set_operations_follow_config() {
        let off = EngineConfig::default().with_set_operations(false);
        let set = Container::new(ContainerKind::HashSet, "IntSet", Primitive::int(), &off).unwrap();
        assert!(!set.has(Operation::Join));
        assert!(set.has(Operation::Put));
        assert!(int_container(ContainerKind::HashSet, "IntSet").has(Operation::CreateIntersection));
    }

    #[test]
    fn diagnostics_follow_config() {
        let set = Container::new(
            ContainerKind::HashSet,
            "IntSet",
            Primitive::int(),
            &EngineConfig::diagnostic(),
        )
        .unwrap();
        assert!(set.has(Operation::PrintStats));
        assert!(!int_container(ContainerKind::HashSet, "IntSet").has(Operation::PrintStats));

        let mut graph = EntityGraph::new();
        set.register(&mut graph).unwrap();
        let stats = graph.find("fn:IntSetPrintStats").unwrap();
        assert_eq!(graph.get(stats).unwrap().visibility(), Visibility::Public);
        let probes = graph.find("fn:_IntSetCountProbes").unwrap();
        assert_eq!(graph.get(probes).unwrap().visibility(), Visibility::Internal);
    }

    #[test]
    fn require_reports_missing_capability() {
        let blob: TypeRef = Arc::new(UserType::new("Blob").copy("BlobCopy"));
        let list = Container::new(ContainerKind::List, "BlobList", blob, &EngineConfig::default()).unwrap();
        let err = list.require(Operation::Remove).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::MissingCapability { capability: Capability::Comparable, .. }
        ));
        assert!(list.require(Operation::PushFront).is_ok());
    }

    #[test]
    fn range_tier_follows_family() {
        let vector = int_container(ContainerKind::Vector, "IntVector");
        assert_eq!(vector.range().tier(), RangeTier::Contiguous);
        let queue = int_container(ContainerKind::Queue, "IntQueue");
        assert_eq!(queue.range().tier(), RangeTier::Bidirectional);
        let map = int_container(ContainerKind::TreapMap, "IntIntMap");
        assert_eq!(map.range().tier(), RangeTier::Forward);
        assert!(map.range().is_associative());
        assert!(std::ptr::eq(map.range(), map.range()));
    }

    #[test]
    fn register_emits_container_node_methods_and_range() {
        let mut graph = EntityGraph::new();
        let c = int_container(ContainerKind::TreeSet, "IntTreeSet");
        let id = c.register(&mut graph).unwrap();
        assert_eq!(graph.get(id).unwrap().kind(), EntityKind::Container);

        let node = graph.find("type:_IntTreeSetN").unwrap();
        assert!(graph.get(id).unwrap().dependencies().any(|d| d == node));
        assert!(graph.find("fn:IntTreeSetPut").is_some());
        assert!(graph.find("fn:_IntTreeSetRotateLeft").is_some());
        assert!(graph.find("range:IntTreeSetRange").is_some());
        assert!(graph.find("fn:IntTreeSetCompare").is_none());

        let len = graph.len();
        assert_eq!(c.register(&mut graph).unwrap(), id);
        assert_eq!(graph.len(), len);
    }

    #[test]
    fn support_code_follows_config() {
        use stencil_foundation::{AllocatorPolicy, HashConfig, HasherPolicy};

        let config = EngineConfig::default()
            .with_allocator(AllocatorPolicy::Collected)
            .with_hash(HashConfig::default().with_hasher(HasherPolicy::Seeded(5)));
        let mut graph = EntityGraph::new();
        let set = Container::new(ContainerKind::HashSet, "IntSet", Primitive::int(), &config).unwrap();
        let tree = Container::new(ContainerKind::TreeSet, "IntTreeSet", Primitive::int(), &config).unwrap();
        let set_id = set.register(&mut graph).unwrap();
        let tree_id = tree.register(&mut graph).unwrap();

        let hasher = support::hasher(&mut graph, HasherPolicy::Seeded(5)).unwrap();
        let allocator = support::allocator(&mut graph, AllocatorPolicy::Collected).unwrap();
        let depends = |id: EntityId, on: EntityId| graph.get(id).unwrap().dependencies().any(|d| d == on);
        assert!(depends(set_id, hasher));
        assert!(!depends(tree_id, hasher));
        assert!(depends(set_id, allocator));
        assert!(depends(tree_id, allocator));
        assert!(graph.find("code:#include <stdlib.h>\n||").is_none());
    }

    #[test]
    fn strings_key_hashed_and_ordered_containers() {
        use crate::cstring::CString;

        let config = EngineConfig::default();
        let text = Arc::new(CString::new(&config).unwrap());
        let set = Container::new(ContainerKind::HashSet, "TextSet", text.clone(), &config).unwrap();
        let map = Container::associative(ContainerKind::TreapMap, "TextIntMap", text, Primitive::int(), &config)
            .unwrap();
        assert!(set.is_destructible());
        assert!(set.has(Operation::Contains));
        assert!(map.has(Operation::ContainsKey));

        let mut graph = EntityGraph::new();
        let set_id = set.register(&mut graph).unwrap();
        let map_id = map.register(&mut graph).unwrap();
        let text_id = graph.find("code:typedef char* CString;\n||").unwrap();
        assert!(graph.total_dependencies(set_id).contains(&text_id));
        assert!(graph.total_dependencies(map_id).contains(&text_id));
        assert!(graph.find("fn:CStringHashCode").is_some());
        assert!(graph.find("fn:CStringCompare").is_some());

        let put = set.require(Operation::Put).unwrap();
        let sig = put.signature("TextSet", &set.names(), config.resolver().as_ref());
        assert_eq!(sig.parameters[1].ty, "const CString*");
    }

    #[test]
    fn nested_containers_register_inner_first() {
        let config = EngineConfig::default();
        let inner = Arc::new(Container::new(ContainerKind::Vector, "IntVector", Primitive::int(), &config).unwrap());
        let outer = Container::new(ContainerKind::List, "IntVectorList", inner.clone(), &config).unwrap();
        assert!(outer.is_copyable());
        assert!(outer.is_default_constructible());

        let mut graph = EntityGraph::new();
        let id = outer.register(&mut graph).unwrap();
        let inner_id = graph.find("container:IntVector").unwrap();
        assert!(graph.total_dependencies(id).contains(&inner_id));
    }
}
