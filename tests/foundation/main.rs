//! Integration tests for Layer 0: Foundation
//!
//! Tests for the capability model, type descriptors, naming and errors.

mod capabilities;
mod errors;
mod naming;
