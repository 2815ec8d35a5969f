//! Integration tests for the scheduler

use stencil_foundation::{ErrorKind, Identifier, PartitionPolicy};
use stencil_graph::{Entity, EntityGraph, EntityId, FunctionSignature, Scheduler};

fn function(graph: &mut EntityGraph, name: &str) -> EntityId {
    graph
        .register(Entity::function(FunctionSignature::new("void", Identifier::new(name))))
        .unwrap()
}

fn unit_size(_: &Entity) -> usize {
    1
}

#[test]
fn dependencies_precede_dependents() {
    let mut graph = EntityGraph::new();
    let leaf = function(&mut graph, "Leaf");
    let mid = function(&mut graph, "Mid");
    let root = function(&mut graph, "Root");
    graph.add_dependency(root, mid).unwrap();
    graph.add_dependency(mid, leaf).unwrap();

    let schedule = Scheduler::default().schedule(&graph, &[root], unit_size).unwrap();
    assert_eq!(schedule.order(), [leaf, mid, root]);
    assert_eq!(schedule.position(leaf), Some(1));
    assert_eq!(schedule.position(root), Some(3));
}

#[test]
fn only_referenced_entities_are_emitted() {
    let mut graph = EntityGraph::new();
    let root = function(&mut graph, "Root");
    let used = function(&mut graph, "Used");
    let unused = function(&mut graph, "Unused");
    graph.add_reference(root, used).unwrap();

    let schedule = Scheduler::default().schedule(&graph, &[root], unit_size).unwrap();
    assert!(schedule.position(used).is_some());
    assert!(schedule.position(unused).is_none());
}

#[test]
fn references_do_not_order() {
    let mut graph = EntityGraph::new();
    let a = function(&mut graph, "A");
    let b = function(&mut graph, "B");
    graph.add_reference(a, b).unwrap();
    graph.add_reference(b, a).unwrap();
    let schedule = Scheduler::default().schedule(&graph, &[a], unit_size).unwrap();
    assert_eq!(schedule.position(a), schedule.position(b));
}

#[test]
fn partitions_are_balanced() {
    let mut graph = EntityGraph::new();
    let root = function(&mut graph, "Root");
    for i in 0..9 {
        let f = function(&mut graph, &format!("F{i}"));
        graph.add_reference(root, f).unwrap();
    }
    let schedule = Scheduler::new(PartitionPolicy::Fixed(3))
        .schedule(&graph, &[root], unit_size)
        .unwrap();
    let sizes: Vec<usize> = schedule.partitions().iter().map(|p| p.size).collect();
    assert_eq!(sizes, [4, 3, 3]);
    assert_eq!(schedule.partition_of(root), Some(1));
}

#[test]
fn threshold_policy_derives_partition_count() {
    let mut graph = EntityGraph::new();
    let root = function(&mut graph, "Root");
    for i in 0..4 {
        let f = function(&mut graph, &format!("F{i}"));
        graph.add_reference(root, f).unwrap();
    }
    let schedule = Scheduler::new(PartitionPolicy::Threshold(2))
        .schedule(&graph, &[root], unit_size)
        .unwrap();
    assert_eq!(schedule.partitions().len(), 3);
}

#[test]
fn unknown_root_is_an_error() {
    let mut other = EntityGraph::new();
    function(&mut other, "A");
    let stray = function(&mut other, "B");
    let graph = EntityGraph::new();
    let err = Scheduler::default().schedule(&graph, &[stray], unit_size).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownEntity(_)));
}
