//! Integration tests for identifier decoration

use stencil_foundation::{CamelCase, EngineConfig, NameResolver, NamingStyle, Operation, SnakeCase};

#[test]
fn camel_case_operations() {
    let cases = [
        (Operation::HashCode, "IntVectorHashCode"),
        (Operation::Create, "IntVectorCreate"),
        (Operation::ViewKeyFront, "IntVectorViewKeyFront"),
        (Operation::Expand, "_IntVectorExpand"),
    ];
    for (op, expected) in cases {
        assert_eq!(CamelCase.resolve("IntVector", op).as_str(), expected);
    }
}

#[test]
fn snake_case_operations() {
    assert_eq!(SnakeCase.resolve("int_vector", Operation::HashCode).as_str(), "int_vector_hash_code");
    assert_eq!(SnakeCase.resolve("int_vector", Operation::Expand).as_str(), "_int_vector_expand");
}

#[test]
fn underscored_prefix_absorbs_leading_underscore() {
    assert_eq!(CamelCase.resolve("_IntSet", Operation::Slot).as_str(), "_IntSetSlot");
    assert_eq!(SnakeCase.resolve("_int_set", Operation::Slot).as_str(), "_int_set_slot");
}

#[test]
fn node_names_are_abbreviated() {
    assert_eq!(CamelCase.decorate("IntTreeSet", "_node", true).as_str(), "_IntTreeSetN");
    assert_eq!(CamelCase.decorate("IntSet", "_slot", true).as_str(), "_IntSetS");
}

#[test]
fn config_selects_style() {
    let config = EngineConfig::default().with_naming(NamingStyle::SnakeCase);
    assert_eq!(config.resolver().resolve("ints", Operation::Put).as_str(), "ints_put");
    assert_eq!(EngineConfig::default().resolver().resolve("Ints", Operation::Put).as_str(), "IntsPut");
}
