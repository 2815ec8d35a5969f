//! Null-terminated character strings.
//!
//! A [`CString`] is a `char*` owning its characters. It has no parameterless
//! constructor: values are built from a `const char*` source, copied by
//! duplicating the characters and released through the configured allocator.

use stencil_foundation::{
    AllocatorPolicy, Binding, Capabilities, Capability, EngineConfig, NamingStyle, Operation,
    Result, TypeDescriptor, Visibility, lifecycle_capability,
};
use stencil_graph::{Entity, EntityGraph, EntityId};
use tracing::debug;

use crate::catalogue;
use crate::constituent::definitions;
use crate::method::{Method, MethodTable, Names, Operand, Requirement, Subject};
use crate::support;

/// A string type over `char*`.
#[derive(Debug)]
pub struct CString {
    name: String,
    visibility: Visibility,
    naming: NamingStyle,
    allocator: AllocatorPolicy,
    methods: MethodTable,
}

impl CString {
    /// Creates the string type named `CString`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for an invalid configuration.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        Self::named("CString", config)
    }

    /// Creates a string type under another name, for example `String`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for an invalid configuration.
    pub fn named(name: impl Into<String>, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let name = name.into();
        let mut methods = MethodTable::new(&name);
        catalogue::lifecycle(&mut methods)?;
        methods.define(
            Method::new(Operation::CustomCreate, Operand::Void)
                .param("target", Operand::Target)
                .param("source", Operand::Raw("const char*".to_string()))
                .requires(Requirement::owner(Capability::CustomConstructible)),
        )?;
        methods.define(
            Method::new(Operation::Empty, Operand::Int)
                .param("target", Operand::ConstTarget)
                .with_inline(true),
        )?;
        methods.define(Method::new(Operation::Size, Operand::Size).param("target", Operand::ConstTarget))?;
        debug!(string = %name, "string configured");
        Ok(Self {
            name,
            visibility: Visibility::Public,
            naming: config.naming,
            allocator: config.allocator,
            methods,
        })
    }

    /// Builder method to set visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every defined method.
    #[must_use]
    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// Capability context the methods are evaluated against.
    #[must_use]
    pub fn subject(&self) -> Subject {
        Subject {
            owner: self.capabilities(),
            ..Subject::default()
        }
    }

    /// Returns true if `operation` is emitted.
    #[must_use]
    pub fn has(&self, operation: Operation) -> bool {
        self.methods.is_live(operation, &self.subject())
    }

    /// Registers the typedef, the headers it needs and its methods.
    ///
    /// # Errors
    /// Returns graph errors, for example `Frozen`.
    pub fn register(&self, graph: &mut EntityGraph) -> Result<EntityId> {
        let before = graph.len();
        let id = graph.register(
            Entity::code(Some(&format!("typedef char* {};\n", self.name)), None, None)
                .with_visibility(self.visibility),
        )?;
        if graph.len() == before {
            return Ok(id);
        }
        let needs = [
            graph.register(definitions())?,
            graph.register(Entity::system_header("string.h"))?,
            support::allocator(graph, self.allocator)?,
        ];
        for need in needs {
            graph.add_dependency(id, need)?;
        }
        self.methods.register(
            graph,
            id,
            &self.subject(),
            &Names::owner(&self.name),
            self.naming.resolver().as_ref(),
            self.visibility,
        )?;
        Ok(id)
    }
}

impl TypeDescriptor for CString {
    fn signature(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::SCALAR.with(Capability::DefaultConstructible, false) | Capabilities::DESTRUCTIBLE
    }

    fn binding(&self, operation: Operation) -> Option<Binding> {
        let live = self.capabilities().has(lifecycle_capability(operation)?) && self.has(operation);
        live.then(|| Binding::Function(self.naming.resolver().resolve(&self.name, operation).to_string()))
    }
}
