//! Integration tests for capabilities and type descriptors

use std::sync::Arc;

use stencil_foundation::{
    Binding, Capabilities, Capability, Operation, Primitive, TypeDescriptor, TypeRef, UserType,
    lifecycle_capability,
};

// =============================================================================
// Primitives
// =============================================================================

#[test]
fn every_primitive_is_a_trivial_scalar() {
    for primitive in Primitive::catalogue() {
        assert_eq!(primitive.capabilities(), Capabilities::SCALAR, "{}", primitive.signature());
        assert!(!primitive.is_destructible());
        assert_eq!(primitive.binding(Operation::Copy), Some(Binding::Intrinsic));
        assert_eq!(primitive.binding(Operation::Destroy), None);
    }
}

#[test]
fn primitive_spellings_normalise() {
    let cases = [
        ("unsigned int", "unsigned"),
        ("signed long int", "long"),
        ("long long int", "long long"),
        ("unsigned long long int", "unsigned long long"),
        ("signed char", "signed char"),
        ("bool", "_Bool"),
        ("signed", "int"),
    ];
    for (spelling, canonical) in cases {
        let p = Primitive::lookup(spelling).unwrap();
        assert_eq!(p.signature(), canonical, "{spelling}");
    }
    assert!(Primitive::lookup("string").is_none());
    assert!(Primitive::lookup("").is_none());
}

#[test]
fn primitive_headers() {
    assert_eq!(Primitive::size_t().header(), Some("stddef.h"));
    assert_eq!(Primitive::of("uint32_t").header(), Some("inttypes.h"));
    assert_eq!(Primitive::of("bool").header(), Some("stdbool.h"));
    assert_eq!(Primitive::int().header(), None);
}

#[test]
fn multi_word_primitives_get_identifier_prefixes() {
    assert_eq!(Primitive::of("unsigned long").prefix(), "UnsignedLong");
    assert_eq!(Primitive::int().prefix(), "int");
}

// =============================================================================
// User types
// =============================================================================

#[test]
fn user_type_capabilities_follow_bindings() {
    let t = UserType::new("Point")
        .default_create("PointCreate")
        .copy("PointCopy")
        .equal("PointEqual")
        .hash_code("PointHash");
    assert!(t.is_default_constructible());
    assert!(!t.is_custom_constructible());
    assert!(!t.is_destructible());
    assert!(t.is_copyable());
    assert!(t.is_comparable());
    assert!(t.is_hashable());
    assert!(!t.is_orderable());
    assert_eq!(
        t.binding(Operation::HashCode),
        Some(Binding::Function("PointHash".to_string()))
    );
}

#[test]
fn hash_without_equality_is_not_hashable() {
    let t = UserType::new("Blob").hash_code("BlobHash");
    assert!(!t.is_hashable());
    assert!(!t.is_comparable());
}

#[test]
fn lifecycle_operations_map_to_capabilities() {
    assert_eq!(lifecycle_capability(Operation::Create), Some(Capability::DefaultConstructible));
    assert_eq!(lifecycle_capability(Operation::CustomCreate), Some(Capability::CustomConstructible));
    assert_eq!(lifecycle_capability(Operation::HashCode), Some(Capability::Hashable));
    assert_eq!(lifecycle_capability(Operation::Put), None);
}

// =============================================================================
// Folding
// =============================================================================

#[test]
fn fold_over_descriptors() {
    let text: TypeRef = Arc::new(
        UserType::new("Text")
            .copy("TextCopy")
            .destroy("TextDestroy")
            .equal("TextEqual"),
    );
    let parts = [Primitive::int(), text];
    let folded = Capabilities::fold(parts.iter().map(|t| t.capabilities()));
    assert!(folded.has(Capability::Copyable));
    assert!(folded.has(Capability::Comparable));
    assert!(folded.has(Capability::Destructible));
    assert!(!folded.has(Capability::Orderable));
    assert!(!folded.has(Capability::Hashable));
    assert!(!folded.has(Capability::DefaultConstructible));
}

#[test]
fn compose_never_grants_what_owner_withholds() {
    let own = Capabilities::CONJUNCTIVE - Capabilities::ORDERABLE;
    let composed = Capabilities::compose(own, [Capabilities::SCALAR]);
    assert!(!composed.has(Capability::Orderable));
    assert!(composed.has(Capability::Hashable));
    assert!(!composed.has(Capability::DefaultConstructible));
}
