//! End-to-end synthesis of container modules

use std::sync::Arc;

use stencil_foundation::{
    AllocatorPolicy, EngineConfig, HashConfig, HasherPolicy, PartitionPolicy, Primitive, TypeRef,
    UserType,
};
use stencil_graph::{Module, OutlineRenderer, RenderedModule};
use stencil_synth::{CString, Container, ContainerKind, Variant};

fn text() -> TypeRef {
    Arc::new(
        UserType::new("Text")
            .with_header("text.h")
            .default_create("TextCreate")
            .destroy("TextDestroy")
            .copy("TextCopy")
            .equal("TextEqual")
            .compare("TextCompare")
            .hash_code("TextHash"),
    )
}

fn build(config: &EngineConfig) -> Module {
    let mut module = Module::new("collections", config.clone());
    let words = Arc::new(Container::new(ContainerKind::HashSet, "TextSet", text(), config).unwrap());
    let index = Container::associative(ContainerKind::TreeMap, "TextIndex", text(), Primitive::size_t(), config)
        .unwrap();
    let shelves = Container::new(ContainerKind::Vector, "TextSetVector", words.clone(), config).unwrap();
    let queue = Container::new(ContainerKind::Queue, "IntQueue", Primitive::int(), config).unwrap();
    for container in [words.as_ref(), &index, &shelves, &queue] {
        container.add_to(&mut module).unwrap();
    }
    module
}

fn header_position(rendered: &RenderedModule, needle: &str) -> usize {
    rendered
        .header
        .contents
        .find(needle)
        .unwrap_or_else(|| panic!("{needle} missing from header"))
}

#[test]
fn interface_orders_types_before_their_users() {
    let rendered = build(&EngineConfig::default()).render(&OutlineRenderer).unwrap();
    let include = header_position(&rendered, "#include <text.h>");
    let words = header_position(&rendered, "typedef struct TextSet TextSet; /* hash_set */");
    let shelves = header_position(&rendered, "typedef struct TextSetVector TextSetVector; /* vector */");
    let put = header_position(&rendered, "int TextSetPut(TextSet* target, const Text* value);");
    assert!(include < words);
    assert!(words < shelves);
    assert!(words < put);
    header_position(&rendered, "/* contiguous range over TextSetVector */");
    header_position(&rendered, "/* bidirectional range over IntQueue */");
    header_position(&rendered, "#include <stddef.h>");
}

#[test]
fn private_helpers_stay_out_of_the_interface() {
    let rendered = build(&EngineConfig::default()).render(&OutlineRenderer).unwrap();
    assert!(!rendered.header.contents.contains("_TextSetExpand"));
    assert!(!rendered.header.contents.contains("_TextIndexRotateLeft"));
    let source = &rendered.sources[0].contents;
    assert!(source.contains("static void _TextSetExpand("));
    assert!(source.contains("typedef struct _TextIndexN _TextIndexN;"));
}

#[test]
fn identical_descriptors_collapse() {
    let config = EngineConfig::default();
    let mut module = build(&config);
    let before = module.graph().len();
    let again = Container::new(ContainerKind::HashSet, "TextSet", text(), &config).unwrap();
    again.add_to(&mut module).unwrap();
    assert_eq!(module.graph().len(), before);
}

#[test]
fn every_definition_lands_in_exactly_one_partition() {
    let config = EngineConfig::partitioned(512);
    let rendered = build(&config).render(&OutlineRenderer).unwrap();
    let schedule = &rendered.schedule;
    assert!(schedule.partitions().len() > 1);
    assert_eq!(rendered.sources.len(), schedule.partitions().len());
    for id in schedule.order() {
        let holders = schedule
            .partitions()
            .iter()
            .filter(|p| p.entities.contains(id))
            .count();
        assert_eq!(holders, 1);
    }
    assert_eq!(rendered.sources[0].name, "collections_auto1.c");
}

#[test]
fn rendering_is_deterministic() {
    let config = EngineConfig::default().with_partitions(PartitionPolicy::Fixed(3));
    let first = build(&config).render(&OutlineRenderer).unwrap();
    let second = build(&config).render(&OutlineRenderer).unwrap();
    assert_eq!(first.header, second.header);
    assert_eq!(first.sources, second.sources);
}

#[test]
fn diagnostics_are_opt_in() {
    let plain = build(&EngineConfig::default()).render(&OutlineRenderer).unwrap();
    assert!(!plain.header.contents.contains("TextSetPrintStats"));

    let diagnostic = build(&EngineConfig::diagnostic()).render(&OutlineRenderer).unwrap();
    assert!(diagnostic.header.contents.contains("TextSetPrintStats"));
    assert!(diagnostic.header.contents.contains("#include <stdio.h>"));
}

#[test]
fn support_code_precedes_the_containers_using_it() {
    let config = EngineConfig::default()
        .with_allocator(AllocatorPolicy::Collected)
        .with_hash(HashConfig::default().with_hasher(HasherPolicy::Randomized));
    let rendered = build(&config).render(&OutlineRenderer).unwrap();
    let gc = header_position(&rendered, "#include <gc.h>");
    let allocate = header_position(&rendered, "#define STENCIL_ALLOCATE(T, n) ((T*)GC_malloc(");
    let seed = header_position(&rendered, "#define STENCIL_HASHER_SEED _stencil_hasher_seed");
    let words = header_position(&rendered, "typedef struct TextSet TextSet;");
    assert!(gc < allocate && allocate < words);
    assert!(seed < words);
    assert!(rendered.sources[0].contents.contains("size_t _stencil_hasher_seed = 0;"));
    assert_eq!(rendered.header.contents.matches("#define STENCIL_ALLOCATE").count(), 1);
}

#[test]
fn strings_and_variants_precede_their_containers() {
    let config = EngineConfig::default();
    let text = Arc::new(CString::new(&config).unwrap());
    let token = Variant::new(
        "Token",
        [("number", stencil_synth::Constituent::from(Primitive::int())), ("word", text.clone().into())],
        config.naming,
    )
    .unwrap();
    let mut module = Module::new("tokens", config.clone());
    Container::new(ContainerKind::HashSet, "WordSet", text.clone(), &config)
        .unwrap()
        .add_to(&mut module)
        .unwrap();
    Container::associative(ContainerKind::TreapMap, "WordTokenMap", text, token, &config)
        .unwrap()
        .add_to(&mut module)
        .unwrap();
    let rendered = module.render(&OutlineRenderer).unwrap();

    let string = header_position(&rendered, "#include <string.h>");
    let typedef = header_position(&rendered, "typedef char* CString;");
    let token = header_position(&rendered, "typedef struct Token Token;");
    let words = header_position(&rendered, "typedef struct WordSet WordSet;");
    let map = header_position(&rendered, "typedef struct WordTokenMap WordTokenMap;");
    assert!(string < typedef);
    assert!(typedef < words && typedef < token);
    assert!(token < map);
    header_position(&rendered, "int WordSetPut(WordSet* target, const CString* value);");
    header_position(&rendered, "void TokenSetWord(Token* target, const CString* value);");
    assert_eq!(rendered.header.contents.matches("typedef char* CString;").count(), 1);
}

#[test]
fn module_is_written_and_rewritten_idempotently() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::default().with_partitions(PartitionPolicy::Fixed(2));
    let rendered = build(&config).render(&OutlineRenderer).unwrap();

    let written = rendered.write_to(dir.path()).unwrap();
    assert_eq!(written.len(), 3);
    for name in ["collections_auto.h", "collections_auto1.c", "collections_auto2.c"] {
        assert!(dir.path().join(name).exists(), "{name}");
    }

    let again = build(&config).render(&OutlineRenderer).unwrap();
    assert!(again.write_to(dir.path()).unwrap().is_empty());
}
