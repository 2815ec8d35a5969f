//! Constituents: the element, key and field types a descriptor is built over.

use std::sync::Arc;

use stencil_foundation::{Binding, Operation, Result, TypeRef};
use stencil_graph::{Entity, EntityGraph, EntityId};

use crate::container::Container;
use crate::cstring::CString;
use crate::record::Record;
use crate::variant::Variant;

/// Shared macro definitions every synthesized type depends on.
#[must_use]
pub fn definitions() -> Entity {
    Entity::code(
        Some(concat!(
            "#ifndef STENCIL_INLINE\n",
            "  #define STENCIL_INLINE static inline\n",
            "#endif\n",
            "#ifndef STENCIL_EXTERN\n",
            "  #define STENCIL_EXTERN\n",
            "#endif\n",
        )),
        None,
        None,
    )
}

/// A type another descriptor is built over.
///
/// Synthesized constituents register their own entities, so a container of
/// containers emits the inner container first.
#[derive(Clone, Debug)]
pub enum Constituent {
    /// A primitive or user-supplied type.
    Type(TypeRef),
    /// A synthesized container.
    Container(Arc<Container>),
    /// A synthesized record.
    Record(Arc<Record>),
    /// A synthesized character string.
    String(Arc<CString>),
    /// A synthesized tagged union.
    Variant(Arc<Variant>),
}

impl Constituent {
    /// The type descriptor.
    #[must_use]
    pub fn descriptor(&self) -> TypeRef {
        match self {
            Self::Type(t) => t.clone(),
            Self::Container(c) => c.clone(),
            Self::Record(r) => r.clone(),
            Self::String(s) => s.clone(),
            Self::Variant(v) => v.clone(),
        }
    }

    /// Source-side signature.
    #[must_use]
    pub fn signature(&self) -> String {
        self.descriptor().signature().to_string()
    }

    /// Returns true for types handled entirely by language intrinsics.
    #[must_use]
    pub fn is_intrinsic(&self) -> bool {
        matches!(self, Self::Type(t) if t.binding(Operation::Copy) == Some(Binding::Intrinsic))
    }

    /// Registers the entity that must precede any user of this type.
    ///
    /// Intrinsic types contribute only their header, if any.
    ///
    /// # Errors
    /// Returns graph errors, for example `Frozen`.
    pub fn register(&self, graph: &mut EntityGraph) -> Result<Option<EntityId>> {
        match self {
            Self::Type(t) if self.is_intrinsic() => t
                .header()
                .map(|h| graph.register(Entity::system_header(h)))
                .transpose(),
            Self::Type(t) => graph
                .register(Entity::type_def(t.signature(), t.header()))
                .map(Some),
            Self::Container(c) => c.register(graph).map(Some),
            Self::Record(r) => r.register(graph).map(Some),
            Self::String(s) => s.register(graph).map(Some),
            Self::Variant(v) => v.register(graph).map(Some),
        }
    }
}

impl From<TypeRef> for Constituent {
    fn from(t: TypeRef) -> Self {
        Self::Type(t)
    }
}

impl From<Arc<Container>> for Constituent {
    fn from(c: Arc<Container>) -> Self {
        Self::Container(c)
    }
}

impl From<Container> for Constituent {
    fn from(c: Container) -> Self {
        Self::Container(Arc::new(c))
    }
}

impl From<Arc<Record>> for Constituent {
    fn from(r: Arc<Record>) -> Self {
        Self::Record(r)
    }
}

impl From<Record> for Constituent {
    fn from(r: Record) -> Self {
        Self::Record(Arc::new(r))
    }
}

impl From<Arc<CString>> for Constituent {
    fn from(s: Arc<CString>) -> Self {
        Self::String(s)
    }
}

impl From<CString> for Constituent {
    fn from(s: CString) -> Self {
        Self::String(Arc::new(s))
    }
}

impl From<Arc<Variant>> for Constituent {
    fn from(v: Arc<Variant>) -> Self {
        Self::Variant(v)
    }
}

impl From<Variant> for Constituent {
    fn from(v: Variant) -> Self {
        Self::Variant(Arc::new(v))
    }
}
