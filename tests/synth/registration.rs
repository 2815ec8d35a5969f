//! Integration tests for registering descriptors into an entity graph

use std::sync::Arc;

use stencil_foundation::{EngineConfig, NamingStyle, Primitive, TypeRef, UserType, Visibility};
use stencil_graph::{EntityGraph, EntityKind, Module, OutlineRenderer};
use stencil_synth::{Container, ContainerKind, Record};

fn point() -> TypeRef {
    Arc::new(
        UserType::new("Point")
            .with_header("point.h")
            .copy("PointCopy")
            .equal("PointEqual")
            .hash_code("PointHash"),
    )
}

#[test]
fn shared_element_is_registered_once() {
    let config = EngineConfig::default();
    let set = Container::new(ContainerKind::HashSet, "PointSet", point(), &config).unwrap();
    let list = Container::new(ContainerKind::List, "PointList", point(), &config).unwrap();

    let mut graph = EntityGraph::new();
    let set_id = set.register(&mut graph).unwrap();
    let list_id = list.register(&mut graph).unwrap();
    let types: Vec<_> = graph
        .iter()
        .filter(|(_, e)| e.kind() == EntityKind::Type && e.name() == "Point")
        .collect();
    assert_eq!(types.len(), 1);
    let point_id = types[0].0;
    assert!(graph.get(set_id).unwrap().dependencies().any(|d| d == point_id));
    assert!(graph.get(list_id).unwrap().dependencies().any(|d| d == point_id));
}

#[test]
fn dead_methods_are_absent_not_failing() {
    let config = EngineConfig::default();
    let list = Container::new(ContainerKind::List, "PointList", point(), &config).unwrap();
    let mut graph = EntityGraph::new();
    list.register(&mut graph).unwrap();
    assert!(graph.find("fn:PointListEqual").is_some());
    assert!(graph.find("fn:PointListHashCode").is_some());
    assert!(graph.find("fn:PointListCompare").is_none());
    assert!(graph.find("fn:PointListCreate").is_some());
}

#[test]
fn methods_and_range_hang_off_the_container() {
    let config = EngineConfig::default();
    let vector = Container::new(ContainerKind::Vector, "IntVector", Primitive::int(), &config).unwrap();
    let mut graph = EntityGraph::new();
    let id = vector.register(&mut graph).unwrap();

    let size = graph.find("fn:IntVectorSize").unwrap();
    assert!(graph.get(size).unwrap().dependencies().any(|d| d == id));
    let range = graph.find("range:IntVectorRange").unwrap();
    let reachable = graph.total_references(id);
    assert!(reachable.contains(&size));
    assert!(reachable.contains(&range));
    assert!(reachable.contains(&graph.find("fn:IntVectorRangeGet").unwrap()));
}

#[test]
fn snake_case_naming_flows_through_registration() {
    let config = EngineConfig::default().with_naming(NamingStyle::SnakeCase);
    let set = Container::new(ContainerKind::TreapSet, "int_treap", Primitive::int(), &config).unwrap();
    let mut graph = EntityGraph::new();
    set.register(&mut graph).unwrap();
    assert!(graph.find("fn:int_treap_put").is_some());
    assert!(graph.find("fn:_int_treap_split").is_some());
    assert!(graph.find("type:_int_treapn").is_some());
}

#[test]
fn visibility_propagates_to_public_methods() {
    let config = EngineConfig::default();
    let set = Container::new(ContainerKind::HashSet, "IntSet", Primitive::int(), &config)
        .unwrap()
        .with_visibility(Visibility::Internal);
    let mut graph = EntityGraph::new();
    set.register(&mut graph).unwrap();
    let put = graph.find("fn:IntSetPut").unwrap();
    assert_eq!(graph.get(put).unwrap().visibility(), Visibility::Internal);
    let slot = graph.find("fn:_IntSetSlot").unwrap();
    assert_eq!(graph.get(slot).unwrap().visibility(), Visibility::Internal);
    let expand = graph.find("fn:_IntSetExpand").unwrap();
    assert_eq!(graph.get(expand).unwrap().visibility(), Visibility::Private);
    let range = graph.find("range:IntSetRange").unwrap();
    assert_eq!(graph.get(range).unwrap().visibility(), Visibility::Internal);
}

#[test]
fn record_fields_precede_the_record() {
    let record = Record::new(
        "Segment",
        [("from", point()), ("to", point())],
        NamingStyle::CamelCase,
    )
    .unwrap();
    let mut module = Module::new("geometry", EngineConfig::default());
    let id = record.register(module.graph_mut()).unwrap();
    module.add_root(id);
    let rendered = module.render(&OutlineRenderer).unwrap();

    let header = &rendered.header.contents;
    let include = header.find("#include <point.h>").unwrap();
    let segment = header.find("typedef struct Segment Segment;").unwrap();
    let copy = header.find("void SegmentCopy(Segment* target, const Segment* source);").unwrap();
    assert!(include < segment && segment < copy);
    assert!(header.contains("void SegmentCustomCreate(Segment* target, const Point* from, const Point* to);"));
}
