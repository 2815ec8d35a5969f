//! Integration tests for Layer 2: Graph
//!
//! Tests for entity registration, scheduling and module rendering.

mod modules;
mod registry;
mod scheduling;
