//! Identifier decoration.
//!
//! Synthesized functions and helper types get type-qualified identifiers
//! produced by a [`NameResolver`] from an owner prefix and a bare name.
//! The engine treats the result as opaque.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::operation::Operation;

/// A decorated identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Identifier(String);

impl Identifier {
    /// Wraps an already-decorated name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strategy turning `(owner prefix, bare name)` into an identifier.
pub trait NameResolver: fmt::Debug + Send + Sync {
    /// Decorates an arbitrary bare name.
    ///
    /// With `abbreviate` only the first letter of the bare name is kept,
    /// which is how internal node and slot types are named.
    fn decorate(&self, prefix: &str, bare: &str, abbreviate: bool) -> Identifier;

    /// Decorates an operation name.
    fn resolve(&self, prefix: &str, operation: Operation) -> Identifier {
        self.decorate(prefix, operation.name(), false)
    }
}

/// Splits a bare name into leading underscores, body, and trailing underscores.
fn split_underscores(bare: &str) -> (&str, &str, &str) {
    let body_start = bare.len() - bare.trim_start_matches('_').len();
    let (lead, rest) = bare.split_at(body_start);
    let body_end = rest.trim_end_matches('_').len();
    let (body, trail) = rest.split_at(body_end);
    (lead, body, trail)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `IntVector` + `hash_code` → `IntVectorHashCode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CamelCase;

impl NameResolver for CamelCase {
    fn decorate(&self, prefix: &str, bare: &str, abbreviate: bool) -> Identifier {
        let (lead, body, trail) = split_underscores(bare);
        let body = if abbreviate {
            body.get(..1).unwrap_or_default()
        } else {
            body
        };
        let camel: String = body.split('_').map(capitalize).collect();
        let id = format!("{prefix}{camel}");
        // The leading underscore survives only if the prefix does not carry one
        let lead = if prefix.starts_with('_') { "" } else { lead };
        Identifier(format!("{lead}{id}{trail}"))
    }
}

/// `int_vector` + `hash_code` → `int_vector_hash_code`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnakeCase;

impl NameResolver for SnakeCase {
    fn decorate(&self, prefix: &str, bare: &str, abbreviate: bool) -> Identifier {
        let (lead, body, trail) = split_underscores(bare);
        let id = if abbreviate {
            format!("{prefix}{}", body.get(..1).unwrap_or_default())
        } else {
            format!("{prefix}_{body}")
        };
        let lead = if prefix.starts_with('_') { "" } else { lead };
        Identifier(format!("{lead}{id}{trail}"))
    }
}
