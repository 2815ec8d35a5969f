//! Variant descriptors: tagged unions over named alternatives.

use std::collections::BTreeSet;

use stencil_foundation::{
    Binding, Capabilities, Error, NamingStyle, Operation, Result, TypeDescriptor,
    TypeRef, Visibility, lifecycle_capability,
};
use stencil_graph::{Entity, EntityGraph, EntityId, FunctionSignature};
use tracing::debug;

use crate::catalogue;
use crate::constituent::{Constituent, definitions};
use crate::method::{Method, MethodTable, Names, Operand, Subject};

/// A union holding exactly one of its alternatives, or nothing.
///
/// A freshly created variant is empty. Every alternative gets a view
/// accessor, and copyable alternatives also get `get_` and `set_`.
#[derive(Debug)]
pub struct Variant {
    name: String,
    alternatives: Vec<(String, Constituent)>,
    visibility: Visibility,
    naming: NamingStyle,
    capabilities: Capabilities,
    methods: MethodTable,
}

impl Variant {
    /// Creates a variant.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for an empty alternative list or a repeated
    /// alternative name.
    pub fn new<N, A>(
        name: impl Into<String>,
        alternatives: impl IntoIterator<Item = (N, A)>,
        naming: NamingStyle,
    ) -> Result<Self>
    where
        N: Into<String>,
        A: Into<Constituent>,
    {
        let name = name.into();
        let alternatives: Vec<(String, Constituent)> = alternatives
            .into_iter()
            .map(|(n, a)| (n.into(), a.into()))
            .collect();
        if alternatives.is_empty() {
            return Err(Error::invalid_config(format!("variant {name} has no alternatives")));
        }
        let mut seen = BTreeSet::new();
        if let Some((alternative, _)) = alternatives.iter().find(|(n, _)| !seen.insert(n.as_str())) {
            return Err(Error::invalid_config(format!(
                "variant {name} repeats alternative {alternative}"
            )));
        }

        let own = Capabilities::CONJUNCTIVE | Capabilities::DEFAULT_CONSTRUCTIBLE;
        let capabilities = Capabilities::compose(
            own,
            alternatives.iter().map(|(_, a)| a.descriptor().capabilities()),
        );

        let mut methods = MethodTable::new(&name);
        catalogue::lifecycle(&mut methods)?;
        methods.define(
            Method::new(Operation::Tag, Operand::Int)
                .param("target", Operand::ConstTarget)
                .with_inline(true),
        )?;
        methods.define(Method::new(Operation::Purge, Operand::Void).param("target", Operand::Target))?;

        debug!(variant = %name, alternatives = alternatives.len(), %capabilities, "variant configured");
        Ok(Self {
            name,
            alternatives,
            visibility: Visibility::Public,
            naming,
            capabilities,
            methods,
        })
    }

    /// Builder method to set visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Variant type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternatives in declaration order. Tags count from one.
    #[must_use]
    pub fn alternatives(&self) -> &[(String, Constituent)] {
        &self.alternatives
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
            owner: self.capabilities,
            ..Subject::default()
        }
    }

    /// Returns true if `operation` is emitted.
    #[must_use]
    pub fn has(&self, operation: Operation) -> bool {
        self.methods.is_live(operation, &self.subject())
    }

    /// Per-alternative accessors.
    #[must_use]
    pub fn accessors(&self) -> Vec<FunctionSignature> {
        let resolver = self.naming.resolver();
        let target = format!("{}*", self.name);
        let const_target = format!("const {}*", self.name);
        let mut accessors = Vec::new();
        for (alternative, ty) in &self.alternatives {
            let signature = ty.signature();
            let decorate = |verb: &str| resolver.decorate(&self.name, &format!("{verb}_{alternative}"), false);
            accessors.push(
                FunctionSignature::new(format!("const {signature}*"), decorate("view"))
                    .with_parameter("target", &const_target)
                    .with_owner(self.name.clone()),
            );
            if !ty.descriptor().is_copyable() {
                continue;
            }
            let value = if ty.is_intrinsic() {
                format!("const {signature}")
            } else {
                format!("const {signature}*")
            };
            accessors.push(
                FunctionSignature::new(signature.clone(), decorate("get"))
                    .with_parameter("target", &const_target)
                    .with_owner(self.name.clone()),
            );
            accessors.push(
                FunctionSignature::new("void", decorate("set"))
                    .with_parameter("target", &target)
                    .with_parameter("value", value)
                    .with_owner(self.name.clone()),
            );
        }
        accessors
    }

    /// Registers the variant type, its alternatives, its live methods and
    /// its accessors.
    ///
    /// # Errors
    /// Returns graph errors, for example `Frozen`.
    pub fn register(&self, graph: &mut EntityGraph) -> Result<EntityId> {
        let before = graph.len();
        let id = graph.register(Entity::type_def(&self.name, None).with_visibility(self.visibility))?;
        if graph.len() == before {
            return Ok(id);
        }
        let definitions = graph.register(definitions())?;
        graph.add_dependency(id, definitions)?;
        for (_, alternative) in &self.alternatives {
            if let Some(dependency) = alternative.register(graph)? {
                graph.add_dependency(id, dependency)?;
            }
        }
        self.methods.register(
            graph,
            id,
            &self.subject(),
            &Names::owner(&self.name),
            self.naming.resolver().as_ref(),
            self.visibility,
        )?;
        for accessor in self.accessors() {
            let function = graph.register(Entity::function(accessor).with_visibility(self.visibility))?;
            graph.add_dependency(function, id)?;
            graph.add_reference(id, function)?;
        }
        Ok(id)
    }
}

impl TypeDescriptor for Variant {
    fn signature(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn binding(&self, operation: Operation) -> Option<Binding> {
        let live = self.capabilities.has(lifecycle_capability(operation)?) && self.has(operation);
        live.then(|| Binding::Function(self.naming.resolver().resolve(&self.name, operation).to_string()))
    }

    fn constituents(&self) -> Vec<TypeRef> {
        self.alternatives.iter().map(|(_, a)| a.descriptor()).collect()
    }
}
