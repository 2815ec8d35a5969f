//! Record descriptors: composites over named fields.

use std::collections::BTreeSet;

use stencil_foundation::{
    Binding, Capabilities, Capability, Error, NamingStyle, Operation, Result, TypeDescriptor,
    TypeRef, Visibility, lifecycle_capability,
};
use stencil_graph::{Entity, EntityGraph, EntityId};
use tracing::debug;

use crate::catalogue;
use crate::constituent::{Constituent, definitions};
use crate::method::{Method, MethodTable, Names, Operand, Requirement, Subject};

/// A structure type whose lifecycle is derived from its fields.
#[derive(Debug)]
pub struct Record {
    name: String,
    fields: Vec<(String, Constituent)>,
    visibility: Visibility,
    naming: NamingStyle,
    capabilities: Capabilities,
    methods: MethodTable,
}

impl Record {
    /// Creates a record.
    ///
    /// The record can be default constructed when every field can, and is
    /// custom constructed from one value per field when every field is
    /// copyable. Records are never orderable.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for an empty field list or a repeated field
    /// name.
    pub fn new<N, F>(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (N, F)>,
        naming: NamingStyle,
    ) -> Result<Self>
    where
        N: Into<String>,
        F: Into<Constituent>,
    {
        let name = name.into();
        let fields: Vec<(String, Constituent)> = fields
            .into_iter()
            .map(|(n, f)| (n.into(), f.into()))
            .collect();
        if fields.is_empty() {
            return Err(Error::invalid_config(format!("record {name} has no fields")));
        }
        let mut seen = BTreeSet::new();
        if let Some((field, _)) = fields.iter().find(|(n, _)| !seen.insert(n.as_str())) {
            return Err(Error::invalid_config(format!(
                "record {name} repeats field {field}"
            )));
        }

        let parts: Vec<Capabilities> = fields
            .iter()
            .map(|(_, f)| f.descriptor().capabilities())
            .collect();
        let all = |c: Capability| parts.iter().all(|p| p.has(c));
        let own = (Capabilities::CONJUNCTIVE - Capabilities::ORDERABLE)
            .with(
                Capability::DefaultConstructible,
                all(Capability::DefaultConstructible),
            )
            .with(Capability::CustomConstructible, all(Capability::Copyable));
        let capabilities = Capabilities::compose(own, parts);

        let mut methods = MethodTable::new(&name);
        catalogue::lifecycle(&mut methods)?;
        let constructor = fields.iter().fold(
            Method::new(Operation::CustomCreate, Operand::Void)
                .param("target", Operand::Target)
                .requires(Requirement::owner(Capability::CustomConstructible)),
            |method, (field, ty)| {
                let spelling = if ty.is_intrinsic() {
                    format!("const {}", ty.signature())
                } else {
                    format!("const {}*", ty.signature())
                };
                method.param(field.as_str(), Operand::Raw(spelling))
            },
        );
        methods.define(constructor)?;

        debug!(record = %name, fields = fields.len(), %capabilities, "record configured");
        Ok(Self {
            name,
            fields,
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

    /// Record type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[(String, Constituent)] {
        &self.fields
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

    /// Registers the record type, its fields and its live methods.
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
        for (_, field) in &self.fields {
            if let Some(dependency) = field.register(graph)? {
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
        Ok(id)
    }
}

impl TypeDescriptor for Record {
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
        self.fields.iter().map(|(_, f)| f.descriptor()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use stencil_foundation::{ErrorKind, Primitive, UserType};
    use stencil_graph::FunctionSignature;

    fn pair() -> Record {
        Record::new(
            "Pair",
            [("first", Primitive::int()), ("second", Primitive::double())],
            NamingStyle::CamelCase,
        )
        .unwrap()
    }

    #[test]
    fn scalar_record_is_everything_but_orderable_and_destructible() {
        let r = pair();
        assert!(r.is_default_constructible());
        assert!(r.is_custom_constructible());
        assert!(r.is_copyable());
        assert!(r.is_comparable());
        assert!(r.is_hashable());
        assert!(!r.is_orderable());
        assert!(!r.is_destructible());
        assert_eq!(r.binding(Operation::Compare), None);
        assert_eq!(
            r.binding(Operation::HashCode),
            Some(Binding::Function("PairHashCode".to_string()))
        );
    }

    #[test]
    fn one_destructible_field_makes_record_destructible() {
        let text: TypeRef = Arc::new(
            UserType::new("Text")
                .default_create("TextCreate")
                .destroy("TextDestroy")
                .copy("TextCopy"),
        );
        let r = Record::new(
            "Labelled",
            [("label", text), ("value", Primitive::int())],
            NamingStyle::CamelCase,
        )
        .unwrap();
        assert!(r.is_destructible());
        assert!(r.is_copyable());
        assert!(!r.is_comparable());
        assert!(r.has(Operation::Destroy));
        assert!(!r.has(Operation::Equal));
    }

    #[test]
    fn uncopyable_field_removes_custom_constructor() {
        let handle: TypeRef = Arc::new(UserType::new("Handle").default_create("HandleOpen"));
        let r = Record::new("Wrapper", [("handle", handle)], NamingStyle::CamelCase).unwrap();
        assert!(r.is_default_constructible());
        assert!(!r.is_custom_constructible());
        assert!(!r.has(Operation::CustomCreate));
    }

    #[test]
    fn empty_and_repeated_fields_are_rejected() {
        let none: [(&str, TypeRef); 0] = [];
        let err = Record::new("Empty", none, NamingStyle::CamelCase).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidConfig(_)));

        let err = Record::new(
            "Twice",
            [("x", Primitive::int()), ("x", Primitive::int())],
            NamingStyle::CamelCase,
        )
        .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidConfig(ref m) if m.contains("repeats field x")));
    }

    #[test]
    fn custom_constructor_takes_one_parameter_per_field() {
        let r = pair();
        let method = r.methods().get(Operation::CustomCreate).unwrap();
        let signature: FunctionSignature = method.signature(
            r.name(),
            &Names::owner(r.name()),
            NamingStyle::CamelCase.resolver().as_ref(),
        );
        assert_eq!(
            signature.prototype(),
            "void PairCustomCreate(Pair* target, const int first, const double second)"
        );
    }

    #[test]
    fn register_emits_type_and_methods() {
        let mut graph = EntityGraph::new();
        let id = pair().register(&mut graph).unwrap();
        assert_eq!(graph.get(id).unwrap().name(), "Pair");
        assert!(graph.find("fn:PairEqual").is_some());
        assert!(graph.find("fn:PairCompare").is_none());
        assert!(graph.find("fn:PairDestroy").is_none());
    }
}
