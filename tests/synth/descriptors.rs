//! Integration tests for descriptor capabilities and method liveness

use std::sync::Arc;

use stencil_foundation::{
    Capability, EngineConfig, ErrorKind, NamingStyle, Operation, Primitive, TypeDescriptor, TypeRef,
    UserType,
};
use stencil_synth::{Container, ContainerKind, Record};

fn config() -> EngineConfig {
    EngineConfig::default()
}

fn text() -> TypeRef {
    Arc::new(
        UserType::new("Text")
            .default_create("TextCreate")
            .destroy("TextDestroy")
            .copy("TextCopy")
            .equal("TextEqual")
            .hash_code("TextHash"),
    )
}

// =============================================================================
// Capability folding
// =============================================================================

#[test]
fn map_folds_key_into_every_conjunction() {
    let map = Container::associative(ContainerKind::TreeMap, "IntTextMap", Primitive::int(), text(), &config())
        .unwrap();
    assert!(map.is_hashable());
    assert!(map.is_destructible());

    let opaque: TypeRef = Arc::new(UserType::new("Opaque").compare("OpaqueCompare").copy("OpaqueCopy"));
    let map = Container::associative(ContainerKind::TreeMap, "OpaqueIntMap", opaque, Primitive::int(), &config())
        .unwrap();
    assert!(!map.is_hashable());
    assert!(!map.is_comparable());
    assert!(map.is_copyable());
    assert!(!map.has(Operation::HashCode));
    assert!(!map.has(Operation::Equal));
}

#[test]
fn hash_map_rejects_unhashable_key() {
    let opaque: TypeRef = Arc::new(UserType::new("Opaque").equal("OpaqueEqual"));
    let err = Container::associative(ContainerKind::HashMap, "OpaqueIntMap", opaque, Primitive::int(), &config())
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::IncompatibleKey { capability: Capability::Hashable, .. }
    ));
}

#[test]
fn nested_container_capabilities_fold_through() {
    let inner = Container::new(ContainerKind::HashSet, "TextSet", text(), &config()).unwrap();
    assert!(inner.is_hashable());
    let outer = Container::new(ContainerKind::HashSet, "TextSetSet", inner, &config()).unwrap();
    assert!(outer.is_hashable());
    assert!(outer.is_comparable());
    assert!(outer.has(Operation::Put));

    // A tree set is never orderable, so it cannot key a tree
    let tree = Container::new(ContainerKind::TreeSet, "IntTree", Primitive::int(), &config()).unwrap();
    let err = Container::new(ContainerKind::TreeSet, "IntTreeTree", tree, &config()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IncompatibleKey { .. }));
}

#[test]
fn sequences_are_orderable_over_orderable_elements() {
    let vector = Container::new(ContainerKind::Vector, "IntVector", Primitive::int(), &config()).unwrap();
    assert!(vector.is_orderable());
    assert!(vector.has(Operation::Compare));
    assert!(vector.has(Operation::Sort));

    let texts = Container::new(ContainerKind::Vector, "TextVector", text(), &config()).unwrap();
    assert!(!texts.is_orderable());
    assert!(!texts.has(Operation::Sort));
    assert!(texts.has(Operation::Resize));
}

// =============================================================================
// Explicit requests
// =============================================================================

#[test]
fn requesting_a_dead_operation_names_the_missing_capability() {
    let blob: TypeRef = Arc::new(UserType::new("Blob").copy("BlobCopy"));
    let list = Container::new(ContainerKind::Queue, "BlobQueue", blob, &config()).unwrap();
    let err = list.require(Operation::Contains).unwrap_err();
    match err.kind {
        ErrorKind::MissingCapability { capability, operation, .. } => {
            assert_eq!(capability, Capability::Comparable);
            assert_eq!(operation, "contains");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn requesting_a_foreign_operation_is_a_config_error() {
    let list = Container::new(ContainerKind::List, "IntList", Primitive::int(), &config()).unwrap();
    let err = list.require(Operation::Split).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidConfig(_)));
}

// =============================================================================
// Records
// =============================================================================

#[test]
fn record_in_a_container() {
    let pair = Record::new(
        "Entry",
        [("name", text()), ("count", Primitive::size_t())],
        NamingStyle::CamelCase,
    )
    .unwrap();
    assert!(pair.is_destructible());
    assert!(pair.is_hashable());
    assert!(!pair.is_orderable());

    let set = Container::new(ContainerKind::HashSet, "EntrySet", pair, &config()).unwrap();
    assert!(set.has(Operation::Put));
    let err = Container::new(
        ContainerKind::TreeSet,
        "EntryTree",
        Record::new("Entry", [("count", Primitive::size_t())], NamingStyle::CamelCase).unwrap(),
        &config(),
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IncompatibleKey { capability: Capability::Orderable, .. }));
}
