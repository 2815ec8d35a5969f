//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use stencil_foundation::{Capability, EngineConfig, Error, ErrorContext, ErrorKind, HashConfig};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_dependency_cycle() {
    let err = Error::dependency_cycle("a", vec!["a".into(), "b".into(), "a".into()]);
    assert!(matches!(err.kind, ErrorKind::DependencyCycle { .. }));
    assert!(err.to_string().contains("a -> b -> a"));
}

#[test]
fn error_missing_capability() {
    let err = Error::missing_capability("Point", "hash_code", Capability::Hashable);
    assert!(matches!(
        err.kind,
        ErrorKind::MissingCapability { capability: Capability::Hashable, .. }
    ));
    let msg = err.to_string();
    assert!(msg.contains("hash_code"));
    assert!(msg.contains("Point"));
}

#[test]
fn error_incompatible_key() {
    let err = Error::incompatible_key("PointSet", "Point", Capability::Hashable);
    let msg = err.to_string();
    assert!(msg.contains("PointSet"));
    assert!(msg.contains("Point"));
}

#[test]
fn error_frozen_and_unknown() {
    assert!(matches!(Error::frozen("IntSet").kind, ErrorKind::Frozen(_)));
    assert!(Error::unknown_entity("#7").to_string().contains("#7"));
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn error_context_is_displayed() {
    let err = Error::invalid_config("bad")
        .with_context(ErrorContext::new().with_module("lib").with_frame("IntSet"));
    assert!(err.to_string().contains("bad"));
    let context = err.context.unwrap().to_string();
    assert!(context.contains("in module lib"));
    assert!(context.contains("while registering IntSet"));
}

#[test]
fn io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: Error = io.into();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn validation_rejects_bad_hash_tuning() {
    for load_factor in [0.0, -1.0, 1.5, f64::NAN] {
        let config = EngineConfig::default().with_hash(HashConfig::default().with_load_factor(load_factor));
        assert!(config.validate().is_err(), "{load_factor}");
    }
    let config = EngineConfig::default().with_hash(HashConfig::default().with_initial_capacity(0));
    assert!(matches!(config.validate().unwrap_err().kind, ErrorKind::InvalidConfig(_)));
}
