//! Capabilities, type descriptors, naming and configuration for Stencil.
//!
//! This crate provides:
//! - [`Capability`] and [`Capabilities`] - The capability model and its fold rules
//! - [`TypeDescriptor`] - Element, key and index type descriptions
//! - [`Primitive`] and [`UserType`] - Built-in and user-supplied descriptors
//! - [`Operation`] - Names of every synthesizable operation
//! - [`NameResolver`] - Identifier decoration strategies
//! - [`EngineConfig`] - Explicit engine configuration
//! - [`Error`] - Configuration errors with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod capability;
pub mod config;
pub mod error;
pub mod naming;
pub mod operation;
pub mod primitive;
pub mod types;

pub use capability::{Capabilities, Capability};
pub use config::{AllocatorPolicy, EngineConfig, HashConfig, HasherPolicy, NamingStyle, PartitionPolicy};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use naming::{CamelCase, Identifier, NameResolver, SnakeCase};
pub use operation::Operation;
pub use primitive::Primitive;
pub use types::{Binding, TypeDescriptor, TypeRef, UserType, Visibility, lifecycle_capability};
