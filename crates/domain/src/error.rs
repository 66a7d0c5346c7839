//! Unified error types for the domain layer
//!
//! Expected-absence lookups (missing catalog entry, unknown list-unit id)
//! degrade to `Option`/`false`/empty collections instead of erroring, and
//! rule violations surface through `AttachError` and `ValidationError`;
//! `DomainError` covers the cases that are genuinely a caller mistake,
//! such as feeding an unknown stat key to a parser.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
