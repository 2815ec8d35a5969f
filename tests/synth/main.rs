//! Integration tests for Layer 2: Synthesis
//!
//! Tests for container and record descriptors, method liveness and
//! registration into an entity graph.

mod descriptors;
mod registration;
