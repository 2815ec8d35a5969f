//! Integration tests for Layer 1: Containers
//!
//! Tests for the container algorithms and the range hierarchy, exercised
//! across families through their shared contracts.

mod algebra;
mod ranges;
mod scenarios;
