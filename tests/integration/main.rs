//! End-to-end integration tests
//!
//! Tests that build descriptors, render whole modules and write them out.

mod end_to_end;
