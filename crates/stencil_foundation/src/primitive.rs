//! Built-in primitive (scalar) types.
//!
//! Primitives are default-constructible, copyable, comparable, orderable and
//! hashable by axiom, never need a destructor, and have every operation
//! performed intrinsically by the target language.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::operation::Operation;
use crate::types::{Binding, TypeDescriptor, TypeRef};

/// A built-in scalar type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Primitive {
    signature: String,
    prefix: String,
    header: Option<String>,
}

impl Primitive {
    /// Creates a primitive with the given signature and optional header.
    ///
    /// Multi-word signatures are not identifiers, so their prefix joins the
    /// capitalised words: `unsigned long` decorates as `UnsignedLong...`.
    #[must_use]
    pub fn new(signature: impl Into<String>, header: Option<&str>) -> Self {
        let signature = signature.into();
        let prefix = if signature.contains(char::is_whitespace) {
            signature
                .split_whitespace()
                .map(|word| {
                    let word = word.trim_start_matches('_');
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                        None => String::new(),
                    }
                })
                .collect::<String>()
        } else {
            signature.clone()
        };
        Self {
            signature,
            prefix,
            header: header.map(str::to_string),
        }
    }

    /// Looks up a primitive by name, normalising the usual spellings.
    ///
    /// `"signed long int"` and `"long"` both resolve to `long`;
    /// `"bool"` resolves to `_Bool`. Returns `None` for unknown names.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let words: Vec<&str> = name.split_whitespace().collect();
        let canonical = canonical_name(&words)?;
        CATALOGUE
            .iter()
            .find(|(sig, _)| *sig == canonical)
            .map(|(sig, header)| Self::new(*sig, *header))
    }

    /// Returns a shared handle to the primitive named `name`.
    ///
    /// # Panics
    /// Panics if `name` is not a known primitive. Intended for literals.
    #[must_use]
    pub fn of(name: &str) -> TypeRef {
        match Self::lookup(name) {
            Some(p) => Arc::new(p),
            None => panic!("unknown primitive type: {name}"),
        }
    }

    /// `int`.
    #[must_use]
    pub fn int() -> TypeRef {
        Self::of("int")
    }

    /// `size_t`.
    #[must_use]
    pub fn size_t() -> TypeRef {
        Self::of("size_t")
    }

    /// `char`.
    #[must_use]
    pub fn char() -> TypeRef {
        Self::of("char")
    }

    /// `double`.
    #[must_use]
    pub fn double() -> TypeRef {
        Self::of("double")
    }

    /// All catalogued signatures.
    pub fn catalogue() -> impl Iterator<Item = Self> {
        CATALOGUE.iter().map(|(sig, header)| Self::new(*sig, *header))
    }
}

impl TypeDescriptor for Primitive {
    fn signature(&self) -> &str {
        &self.signature
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::SCALAR
    }

    fn binding(&self, operation: Operation) -> Option<Binding> {
        match operation {
            Operation::Destroy => None,
            op if op.is_lifecycle() => Some(Binding::Intrinsic),
            _ => None,
        }
    }

    fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }
}

const STDDEF_H: Option<&str> = Some("stddef.h");
const INTTYPES_H: Option<&str> = Some("inttypes.h");
const MATH_H: Option<&str> = Some("math.h");
const COMPLEX_H: Option<&str> = Some("complex.h");

const CATALOGUE: &[(&str, Option<&str>)] = &[
    ("_Bool", Some("stdbool.h")),
    ("char", None),
    ("signed char", None),
    ("unsigned char", None),
    ("wchar_t", STDDEF_H),
    ("short", None),
    ("unsigned short", None),
    ("int", None),
    ("unsigned", None),
    ("long", None),
    ("unsigned long", None),
    ("long long", None),
    ("unsigned long long", None),
    ("size_t", STDDEF_H),
    ("ptrdiff_t", STDDEF_H),
    ("uintptr_t", STDDEF_H),
    ("intptr_t", INTTYPES_H),
    ("intmax_t", INTTYPES_H),
    ("uintmax_t", INTTYPES_H),
    ("float", None),
    ("double", None),
    ("long double", None),
    ("float_t", MATH_H),
    ("double_t", MATH_H),
    ("_Complex", COMPLEX_H),
    ("float _Complex", COMPLEX_H),
    ("double _Complex", COMPLEX_H),
    ("long double _Complex", COMPLEX_H),
    ("int8_t", INTTYPES_H),
    ("uint8_t", INTTYPES_H),
    ("int16_t", INTTYPES_H),
    ("uint16_t", INTTYPES_H),
    ("int32_t", INTTYPES_H),
    ("uint32_t", INTTYPES_H),
    ("int64_t", INTTYPES_H),
    ("uint64_t", INTTYPES_H),
];

/// Reduces the many spellings of a C scalar type to one catalogue entry.
fn canonical_name(words: &[&str]) -> Option<String> {
    let mut words: Vec<&str> = words.to_vec();
    if words.is_empty() {
        return None;
    }
    if words.len() == 1 {
        return Some(match words[0] {
            "bool" | "_Bool" => "_Bool".to_string(),
            "complex" => "_Complex".to_string(),
            "signed" => "int".to_string(),
            other => other.to_string(),
        });
    }
    if words == ["signed", "char"] {
        return Some("signed char".to_string());
    }
    let unsigned = words[0] == "unsigned";
    if words[0] == "signed" || unsigned {
        words.remove(0);
    }
    // `short int`, `long int`, `long long int`
    if words.len() > 1 && words.last() == Some(&"int") {
        words.pop();
    }
    if let Some(last) = words.last_mut() {
        if *last == "complex" {
            *last = "_Complex";
        }
    }
    let base = words.join(" ");
    let name = match (unsigned, base.as_str()) {
        (true, "int") => "unsigned".to_string(),
        (true, b) => format!("unsigned {b}"),
        (false, b) => b.to_string(),
    };
    Some(name)
}
