//! Support code selected by the engine configuration.
//!
//! Hashed containers hash through the rotate-xor hasher macros and every
//! container allocates through the allocator macros. Both are plain code
//! entities, so any number of containers share one emission.

use stencil_foundation::{AllocatorPolicy, HasherPolicy, Result};
use stencil_graph::{Entity, EntityGraph, EntityId};

const HASHER_UPDATE: &str = "#define STENCIL_HASHER_UPDATE(h, v) \
    ((h) = (((h) << 1) | ((h) >> (sizeof(h) * CHAR_BIT - 1))) ^ (v))\n";

const RANDOM_SEED_INTERFACE: &str = concat!(
    "extern size_t _stencil_hasher_seed;\n",
    "void _stencil_hasher_randomize_seed(void);\n",
    "#define STENCIL_HASHER_SEED _stencil_hasher_seed\n",
);

const RANDOM_SEED_IMPLEMENTATION: &str = concat!(
    "size_t _stencil_hasher_seed = 0;\n",
    "void _stencil_hasher_randomize_seed(void) {\n",
    "  srand((unsigned)time(NULL));\n",
    "  _stencil_hasher_seed = (size_t)rand();\n",
    "}\n",
);

/// Registers the hasher for `policy` together with the headers it needs.
///
/// # Errors
/// Returns graph errors, for example `Frozen`.
pub fn hasher(graph: &mut EntityGraph, policy: HasherPolicy) -> Result<EntityId> {
    let mut needs = vec![
        graph.register(Entity::system_header("limits.h"))?,
        graph.register(Entity::system_header("stddef.h"))?,
    ];
    let entity = match policy {
        HasherPolicy::Seeded(seed) => Entity::code(
            Some(&format!(
                "#define STENCIL_HASHER_SEED ((size_t){seed}ULL)\n{HASHER_UPDATE}"
            )),
            None,
            None,
        ),
        HasherPolicy::Randomized => {
            needs.push(graph.register(Entity::system_header("stdlib.h"))?);
            needs.push(graph.register(Entity::system_header("time.h"))?);
            Entity::code(
                Some(&format!("{RANDOM_SEED_INTERFACE}{HASHER_UPDATE}")),
                None,
                Some(RANDOM_SEED_IMPLEMENTATION),
            )
        }
    };
    let id = graph.register(entity)?;
    for need in needs {
        graph.add_dependency(id, need)?;
    }
    Ok(id)
}

/// Registers the allocation macros for `policy` and the header declaring
/// the functions behind them.
///
/// # Errors
/// Returns graph errors, for example `Frozen`.
pub fn allocator(graph: &mut EntityGraph, policy: AllocatorPolicy) -> Result<EntityId> {
    let header = graph.register(Entity::system_header(policy.header()))?;
    let free = match policy.free() {
        Some(free) => format!("#define STENCIL_FREE(p) {free}(p)\n"),
        None => "#define STENCIL_FREE(p) ((void)(p))\n".to_string(),
    };
    let macros = format!(
        "#define STENCIL_ALLOCATE(T, n) ((T*){}((n) * sizeof(T)))\n{free}",
        policy.allocate()
    );
    let id = graph.register(Entity::code(Some(&macros), None, None))?;
    graph.add_dependency(id, header)?;
    Ok(id)
}
