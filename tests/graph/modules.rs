//! Integration tests for module rendering and output

use stencil_foundation::{EngineConfig, Identifier, PartitionPolicy, Visibility};
use stencil_graph::{BANNER, Entity, FunctionSignature, Module, OutlineRenderer};

fn module(config: EngineConfig) -> Module {
    let mut module = Module::new("demo", config);
    let header = module.add(Entity::system_header("stdio.h")).unwrap();
    let ty = module.add(Entity::type_def("Widget", None)).unwrap();
    let helper = module
        .graph_mut()
        .register(
            Entity::function(FunctionSignature::new("void", Identifier::new("_WidgetReset")))
                .with_visibility(Visibility::Private),
        )
        .unwrap();
    for name in ["WidgetCreate", "WidgetDestroy", "WidgetPrint"] {
        let f = FunctionSignature::new("void", Identifier::new(name)).with_parameter("target", "Widget*");
        let id = module.add(Entity::function(f)).unwrap();
        module.graph_mut().add_dependency(id, ty).unwrap();
        module.graph_mut().add_dependency(id, header).unwrap();
        module.graph_mut().add_reference(id, helper).unwrap();
    }
    module
}

#[test]
fn header_declares_public_entities_in_order() {
    let rendered = module(EngineConfig::default()).render(&OutlineRenderer).unwrap();
    let header = &rendered.header;
    assert_eq!(header.name, "demo_auto.h");
    assert!(header.contents.starts_with(BANNER));
    assert!(header.contents.contains("#ifndef DEMO_AUTO_H"));
    let typedef = header.contents.find("typedef struct Widget Widget;").unwrap();
    let create = header.contents.find("void WidgetCreate(Widget* target);").unwrap();
    assert!(typedef < create);
    assert!(!header.contents.contains("_WidgetReset"));
    assert!(header.contents.ends_with("#endif\n"));
}

#[test]
fn private_helpers_are_forward_declared_where_referenced() {
    let rendered = module(EngineConfig::default()).render(&OutlineRenderer).unwrap();
    assert_eq!(rendered.sources.len(), 1);
    let source = &rendered.sources[0];
    assert_eq!(source.name, "demo_auto.c");
    assert!(source.contents.contains("#include \"demo_auto.h\""));
    assert!(source.contents.contains("static void _WidgetReset(void);"));
}

#[test]
fn partitioned_sources_are_numbered() {
    let config = EngineConfig::default().with_partitions(PartitionPolicy::Fixed(2));
    let rendered = module(config).render(&OutlineRenderer).unwrap();
    let names: Vec<&str> = rendered.sources.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["demo_auto1.c", "demo_auto2.c"]);
    for source in &rendered.sources {
        assert!(source.contents.contains("#include \"demo_auto.h\""));
    }
}

#[test]
fn rendering_freezes_the_module() {
    let mut module = module(EngineConfig::default());
    module.render(&OutlineRenderer).unwrap();
    assert!(module.graph().is_frozen());
    assert!(module.add(Entity::system_header("math.h")).is_err());
}

#[test]
fn invalid_config_is_reported_with_module_context() {
    let config = EngineConfig::default().with_partitions(PartitionPolicy::Fixed(0));
    let err = module(config).render(&OutlineRenderer).unwrap_err();
    assert_eq!(err.context.unwrap().module.as_deref(), Some("demo"));
}

#[test]
fn write_to_skips_unchanged_files() {
    let dir = tempfile::tempdir().unwrap();
    let rendered = module(EngineConfig::default()).render(&OutlineRenderer).unwrap();

    let first = rendered.write_to(dir.path()).unwrap();
    assert_eq!(first.len(), 2);
    let header = std::fs::read_to_string(dir.path().join("demo_auto.h")).unwrap();
    assert_eq!(header, rendered.header.contents);

    let second = rendered.write_to(dir.path()).unwrap();
    assert!(second.is_empty());

    std::fs::write(dir.path().join("demo_auto.c"), "stale").unwrap();
    let third = rendered.write_to(dir.path()).unwrap();
    assert_eq!(third, [dir.path().join("demo_auto.c")]);
}
