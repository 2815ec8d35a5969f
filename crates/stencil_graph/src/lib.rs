//! Entity graph, emission scheduler and module rendering for Stencil.
//!
//! This crate provides:
//! - [`Entity`] - Units of emission with structural identity
//! - [`EntityGraph`] - Deduplicating registry of dependency and reference edges
//! - [`Scheduler`] - Dependency ordering and size-balanced partitioning
//! - [`Renderer`] - The contract for turning entities into text
//! - [`Module`] - Header plus source partitions, written to disk

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod graph;
pub mod module;
pub mod render;
pub mod scheduler;

pub use entity::{Detail, Entity, EntityId, EntityKind, FunctionSignature, Parameter};
pub use graph::EntityGraph;
pub use module::{BANNER, Module, RenderedFile, RenderedModule};
pub use render::{OutlineRenderer, Renderer};
pub use scheduler::{Partition, Schedule, Scheduler};
