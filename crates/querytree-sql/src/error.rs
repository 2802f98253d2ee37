//! Error types for querytree-sql

use crate::context::Span;
use crate::kinds::NodeKind;
use serde::Serialize;
use thiserror::Error;

/// The result type for node lifecycle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while allocating, initializing, copying or cloning nodes.
///
/// None of these are recoverable inside the node layer: each one points at a
/// grammar or driver bug, and a tree that hit one must not reach later phases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The factory was asked for a kind tag that is not registered
    #[error("Unknown node kind: {0}")]
    UnknownKind(String),

    /// An initializer argument has the wrong dynamic type
    #[error("Type mismatch at argument {position}: expected {expected}, found {actual}")]
    TypeMismatch {
        position: usize,
        expected: String,
        actual: String,
    },

    /// A dynamic initializer received the wrong number of arguments
    #[error("{kind} expects {expected} arguments, found {actual}")]
    Arity {
        kind: NodeKind,
        expected: usize,
        actual: usize,
    },

    /// `initialize` was called on a node that is already initialized
    #[error("{0} node is already initialized")]
    AlreadyInitialized(NodeKind),

    /// A copy or initializer crossed node kinds
    #[error("Kind mismatch: expected {expected}, found {actual}")]
    KindMismatch { expected: NodeKind, actual: NodeKind },

    /// An uninitialized node was used as a copy or clone source
    #[error("Cannot clone uninitialized {0} node")]
    Uninitialized(NodeKind),

    /// The parse context backing a node has already been discarded
    #[error("Parse context is no longer available")]
    ContextDropped,

    /// Invalid context configuration
    #[error("Invalid options: {0}")]
    Options(String),

    /// A tree could not be rendered as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A node layer invariant did not hold
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a type mismatch error
    pub fn type_mismatch(
        position: usize,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Error::TypeMismatch {
            position,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an arity error
    pub fn arity(kind: NodeKind, expected: usize, actual: usize) -> Self {
        Error::Arity {
            kind,
            expected,
            actual,
        }
    }

    /// Create a kind mismatch error
    pub fn kind_mismatch(expected: NodeKind, actual: NodeKind) -> Self {
        Error::KindMismatch { expected, actual }
    }

    /// Create an unknown kind error
    pub fn unknown_kind(tag: impl Into<String>) -> Self {
        Error::UnknownKind(tag.into())
    }

    /// Create an options error
    pub fn options(message: impl Into<String>) -> Self {
        Error::Options(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }
}

/// Severity level for diagnostics collected on a parse context
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// The tree built by this session must not be used
    Error,
    /// Informational; the tree is still usable
    Warning,
}

/// A single diagnostic recorded against a parse session
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// The rendered message
    pub message: String,
    /// Source region the grammar driver was positioned on
    pub span: Span,
    /// Severity of the issue
    pub severity: DiagnosticSeverity,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            severity: DiagnosticSeverity::Error,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            severity: DiagnosticSeverity::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message() {
        let err = Error::type_mismatch(2, "boolean", "string");
        assert_eq!(
            err.to_string(),
            "Type mismatch at argument 2: expected boolean, found string"
        );
    }

    #[test]
    fn test_kind_mismatch_message() {
        let err = Error::kind_mismatch(NodeKind::Aggregate, NodeKind::CreateTrigger);
        assert_eq!(
            err.to_string(),
            "Kind mismatch: expected Aggregate, found CreateTrigger"
        );
    }
}
