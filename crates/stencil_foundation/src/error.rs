//! Error types for the Stencil synthesis engine.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every error here is a configuration error: it is raised while descriptors
//! are built or entities are registered, before any output is produced.

use std::fmt;

use thiserror::Error;

use crate::capability::Capability;

/// The main error type for Stencil operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a dependency cycle error.
    ///
    /// `cycle` lists the entities along the cycle, starting and ending with `entity`.
    #[must_use]
    pub fn dependency_cycle(entity: impl Into<String>, cycle: Vec<String>) -> Self {
        Self::new(ErrorKind::DependencyCycle {
            entity: entity.into(),
            cycle,
        })
    }

    /// Creates a missing capability error.
    #[must_use]
    pub fn missing_capability(
        type_name: impl Into<String>,
        operation: impl Into<String>,
        capability: Capability,
    ) -> Self {
        Self::new(ErrorKind::MissingCapability {
            type_name: type_name.into(),
            operation: operation.into(),
            capability,
        })
    }

    /// Creates an incompatible key error.
    #[must_use]
    pub fn incompatible_key(
        container: impl Into<String>,
        key: impl Into<String>,
        capability: Capability,
    ) -> Self {
        Self::new(ErrorKind::IncompatibleKey {
            container: container.into(),
            key: key.into(),
            capability,
        })
    }

    /// Creates a duplicate operation error.
    #[must_use]
    pub fn duplicate_operation(owner: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateOperation {
            owner: owner.into(),
            operation: operation.into(),
        })
    }

    /// Creates an unknown entity error.
    #[must_use]
    pub fn unknown_entity(entity: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownEntity(entity.into()))
    }

    /// Creates an error for mutating a frozen graph.
    #[must_use]
    pub fn frozen(entity: impl Into<String>) -> Self {
        Self::new(ErrorKind::Frozen(entity.into()))
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig(message.into()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err.to_string()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The dependency relation between entities contains a cycle.
    #[error("dependency cycle detected at {entity}: {}", .cycle.join(" -> "))]
    DependencyCycle {
        /// The entity whose edge closed the cycle.
        entity: String,
        /// The entities along the cycle.
        cycle: Vec<String>,
    },

    /// An operation was requested on a type lacking the required capability.
    #[error("{operation} requires {type_name} to be {capability}")]
    MissingCapability {
        /// The type that lacks the capability.
        type_name: String,
        /// The operation that was requested.
        operation: String,
        /// The capability that is missing.
        capability: Capability,
    },

    /// A container was instantiated with a key type it cannot index by.
    #[error("{container} cannot be keyed by {key}: key is not {capability}")]
    IncompatibleKey {
        /// The container being configured.
        container: String,
        /// The offending key (or element) type.
        key: String,
        /// The capability the key lacks.
        capability: Capability,
    },

    /// The same operation was defined twice on one owner.
    #[error("operation {operation} redefined on {owner}")]
    DuplicateOperation {
        /// The owning type.
        owner: String,
        /// The operation name.
        operation: String,
    },

    /// An edge named an entity that is not registered.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// The graph has been frozen for scheduling and can no longer change.
    #[error("entity graph is frozen, cannot modify {0}")]
    Frozen(String),

    /// Configuration was rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing an output partition failed.
    #[error("i/o error: {0}")]
    Io(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Module being synthesized.
    pub module: Option<String>,
    /// Chain of entities being registered, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the module name.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Adds an entity frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(module) = &self.module {
            write!(f, "in module {module}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  while registering {frame}")?;
            }
        }
        Ok(())
    }
}

/// Result alias used throughout Stencil.
pub type Result<T> = std::result::Result<T, Error>;
