//! Integration tests for the entity registry

use stencil_foundation::{ErrorKind, Identifier};
use stencil_graph::{Entity, EntityGraph, EntityKind, FunctionSignature};

fn function(name: &str) -> Entity {
    Entity::function(FunctionSignature::new("void", Identifier::new(name)))
}

#[test]
fn structurally_equal_entities_share_an_id() {
    let mut graph = EntityGraph::new();
    let a = graph.register(Entity::system_header("stdio.h")).unwrap();
    let b = graph.register(Entity::system_header("stdio.h")).unwrap();
    let c = graph.register(Entity::system_header("stdlib.h")).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.get(a).unwrap().kind(), EntityKind::Code);
}

#[test]
fn kinds_do_not_collide() {
    let mut graph = EntityGraph::new();
    let ty = graph.register(Entity::type_def("IntSet", None)).unwrap();
    let container = graph.register(Entity::container("IntSet", "hash_set")).unwrap();
    let range = graph.register(Entity::range("IntSet", "IntSet", "forward")).unwrap();
    assert_ne!(ty, container);
    assert_ne!(container, range);
    assert_eq!(graph.find("container:IntSet"), Some(container));
}

#[test]
fn dependency_implies_reference() {
    let mut graph = EntityGraph::new();
    let a = graph.register(function("A")).unwrap();
    let b = graph.register(function("B")).unwrap();
    graph.add_dependency(a, b).unwrap();
    let entity = graph.get(a).unwrap();
    assert!(entity.dependencies().any(|d| d == b));
    assert!(entity.references().any(|r| r == b));
}

#[test]
fn cycles_are_rejected_with_their_path() {
    let mut graph = EntityGraph::new();
    let a = graph.register(function("A")).unwrap();
    let b = graph.register(function("B")).unwrap();
    let c = graph.register(function("C")).unwrap();
    graph.add_dependency(a, b).unwrap();
    graph.add_dependency(b, c).unwrap();

    let err = graph.add_dependency(c, a).unwrap_err();
    match err.kind {
        ErrorKind::DependencyCycle { entity, cycle } => {
            assert_eq!(entity, "C");
            assert_eq!(cycle, ["C", "A", "B", "C"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!graph.get(c).unwrap().dependencies().any(|d| d == a));
}

#[test]
fn mutual_references_are_allowed() {
    let mut graph = EntityGraph::new();
    let a = graph.register(function("A")).unwrap();
    let b = graph.register(function("B")).unwrap();
    graph.add_reference(a, b).unwrap();
    graph.add_reference(b, a).unwrap();
    assert_eq!(graph.total_references(a).len(), 2);
}

#[test]
fn frozen_graph_rejects_new_entities_but_not_lookups() {
    let mut graph = EntityGraph::new();
    let a = graph.register(function("A")).unwrap();
    graph.freeze();
    assert!(graph.is_frozen());
    assert_eq!(graph.register(function("A")).unwrap(), a);
    assert!(matches!(
        graph.register(function("B")).unwrap_err().kind,
        ErrorKind::Frozen(_)
    ));
    assert!(matches!(graph.add_reference(a, a).unwrap_err().kind, ErrorKind::Frozen(_)));
}
