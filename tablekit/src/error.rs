//! Error types for tablekit.

use crate::Shape;
use thiserror::Error;

/// All possible errors from tablekit operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Shape errors
    #[error("{operation} requires {expected} input")]
    InvalidShape {
        operation: &'static str,
        expected: Shape,
    },

    #[error("{operation} cannot decompose a value of type {type_name}")]
    UnsupportedType {
        operation: &'static str,
        type_name: &'static str,
    },

    /// Raised by user predicates. Returned to the caller untouched.
    #[error("callback failed: {0}")]
    Callback(String),

    // Resource errors
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    // Conversion errors
    #[error("cyclic table cannot be represented as JSON")]
    CyclicStructure,

    #[error("value cannot be represented as JSON: {0}")]
    Unrepresentable(String),
}

impl Error {
    /// Build a callback error from any message.
    pub fn callback(message: impl Into<String>) -> Self {
        Error::Callback(message.into())
    }
}

/// Result type for tablekit operations.
pub type Result<T> = std::result::Result<T, Error>;
