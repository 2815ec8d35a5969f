//! Container, range and record descriptors for Stencil.
//!
//! This crate provides:
//! - [`Container`] - A container family specialized for an element and key
//! - [`RangeDescriptor`] - The traversal type every container owns
//! - [`Record`] - Composites over named fields
//! - [`CString`] - Null-terminated strings usable as keys
//! - [`Variant`] - Tagged unions over named alternatives
//! - [`MethodTable`] - Operations gated by capability requirements
//! - [`catalogue`] - The method families descriptors are assembled from
//! - [`support`] - Hasher and allocator code chosen by the configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalogue;
pub mod constituent;
pub mod container;
pub mod cstring;
pub mod method;
pub mod range;
pub mod record;
pub mod support;
pub mod variant;

pub use constituent::{Constituent, definitions};
pub use container::{Container, ContainerKind};
pub use cstring::CString;
pub use method::{Method, MethodTable, Names, Operand, Requirement, Role, Subject, Switch, Unmet};
pub use range::{RangeDescriptor, RangeTier};
pub use record::Record;
pub use variant::Variant;
