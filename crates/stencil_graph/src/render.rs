//! The renderer contract.
//!
//! The scheduler only decides ordering and partition assignment. Turning an
//! entity into text is delegated to a [`Renderer`], which is asked for three
//! sections: the shared interface, forward declarations, and definitions.

use stencil_foundation::Visibility;

use crate::entity::{Detail, Entity};

/// Turns entities into output text.
pub trait Renderer {
    /// Text for the shared interface partition.
    fn interface(&self, entity: &Entity, out: &mut String);

    /// Declarations a source partition needs before any definition that
    /// references this entity.
    fn forward_declarations(&self, entity: &Entity, out: &mut String);

    /// Definitions emitted into the one partition that owns the entity.
    fn implementation(&self, entity: &Entity, out: &mut String);

    /// Size estimate used for partitioning. The interface is shared and is
    /// not counted.
    fn size(&self, entity: &Entity) -> usize {
        let mut buf = String::new();
        self.forward_declarations(entity, &mut buf);
        self.implementation(entity, &mut buf);
        buf.len()
    }
}

/// Renders declarations and empty definition skeletons.
///
/// Public and internal functions are declared in the interface; private ones
/// are declared `static` in each source partition that references them.
/// Inline functions are defined in the interface.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutlineRenderer;

fn push_opt(out: &mut String, text: Option<&String>) {
    if let Some(text) = text {
        out.push_str(text);
    }
}

impl Renderer for OutlineRenderer {
    fn interface(&self, entity: &Entity, out: &mut String) {
        match entity.detail() {
            Detail::Code { interface, .. } => push_opt(out, interface.as_ref()),
            Detail::Type { name, header } => match header {
                Some(header) => out.push_str(&format!("#include <{header}>\n")),
                None if entity.visibility() != Visibility::Private => {
                    out.push_str(&format!("typedef struct {name} {name};\n"));
                }
                None => {}
            },
            Detail::Container { name, family } => {
                out.push_str(&format!("typedef struct {name} {name}; /* {family} */\n"));
            }
            Detail::Range {
                name,
                iterable,
                tier,
            } => {
                out.push_str(&format!(
                    "typedef struct {name} {name}; /* {tier} range over {iterable} */\n"
                ));
            }
            Detail::Function(f) if entity.visibility() != Visibility::Private => {
                if f.inline {
                    out.push_str(&format!("static inline {} {{}}\n", f.prototype()));
                } else {
                    out.push_str(&format!("{};\n", f.prototype()));
                }
            }
            Detail::Function(_) => {}
        }
    }

    fn forward_declarations(&self, entity: &Entity, out: &mut String) {
        match entity.detail() {
            Detail::Code { forward, .. } => push_opt(out, forward.as_ref()),
            Detail::Type { name, header: None } if entity.visibility() == Visibility::Private => {
                out.push_str(&format!("typedef struct {name} {name};\n"));
            }
            Detail::Function(f) if entity.visibility() == Visibility::Private => {
                out.push_str(&format!("static {};\n", f.prototype()));
            }
            _ => {}
        }
    }

    fn implementation(&self, entity: &Entity, out: &mut String) {
        match entity.detail() {
            Detail::Code { implementation, .. } => push_opt(out, implementation.as_ref()),
            Detail::Function(f) if !f.inline => {
                let storage = if entity.visibility() == Visibility::Private {
                    "static "
                } else {
                    ""
                };
                out.push_str(&format!("{storage}{} {{}}\n", f.prototype()));
            }
            _ => {}
        }
    }
}
