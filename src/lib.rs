//! Stencil - Synthesis engine for type-specialized generic containers
//!
//! This crate re-exports all layers of the Stencil system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: stencil_synth       - Container, range and record descriptors, method catalogues
//! Layer 1: stencil_graph       - Entity graph, emission scheduler, module rendering
//!          stencil_containers  - Container algorithms and the range hierarchy
//! Layer 0: stencil_foundation  - Capabilities, type descriptors, naming, config, errors
//! ```

pub use stencil_containers as containers;
pub use stencil_foundation as foundation;
pub use stencil_graph as graph;
pub use stencil_synth as synth;
