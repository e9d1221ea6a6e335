//! Error types for color-term inference
//!
//! Every fallible operation in the crate returns [`LuxResult`]. Inference is
//! pure computation, so none of these errors are transient: they describe
//! programmer or data mistakes and are never retried.

use std::fmt;

/// Result type alias for color-term operations
pub type LuxResult<T> = Result<T, LuxError>;

/// Error type for boundary construction, model lookup and inference
#[derive(Debug, Clone, PartialEq)]
pub enum LuxError {
    /// Requested component name is not part of the model vocabulary
    OutOfVocabulary { name: String, model: String },

    /// Observation shape matches neither the single nor the batched form
    ShapeMismatch {
        expected: String,
        got: String,
        context: String,
    },

    /// Every component scored zero for an observation row
    DegenerateNormalization { row: usize },

    /// Distribution lookup by an unknown name
    KeyNotFound { name: String },

    /// Invalid parameter value
    InvalidParameter {
        parameter: String,
        value: String,
        constraint: String,
    },

    /// Two components resolve to the same lookup key
    DuplicateComponent { name: String, existing: String },

    /// Model definition could not be decoded
    Definition { details: String },

    /// Underlying I/O failure while reading a definition
    Io { path: String, details: String },
}

impl LuxError {
    pub(crate) fn invalid_parameter(
        parameter: &str,
        value: impl fmt::Display,
        constraint: &str,
    ) -> Self {
        LuxError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

impl fmt::Display for LuxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LuxError::OutOfVocabulary { name, model } => {
                write!(f, "Out of vocabulary: '{}' is not a component of {}", name, model)
            }
            LuxError::ShapeMismatch {
                expected,
                got,
                context,
            } => {
                write!(
                    f,
                    "Shape mismatch in {}: expected {}, got {}",
                    context, expected, got
                )
            }
            LuxError::DegenerateNormalization { row } => {
                write!(
                    f,
                    "Degenerate normalization: every component scored zero for row {}",
                    row
                )
            }
            LuxError::KeyNotFound { name } => {
                write!(f, "Key not found in distribution: '{}'", name)
            }
            LuxError::InvalidParameter {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = '{}': must satisfy {}",
                    parameter, value, constraint
                )
            }
            LuxError::DuplicateComponent { name, existing } => {
                write!(
                    f,
                    "Duplicate component: '{}' collides with existing component '{}'",
                    name, existing
                )
            }
            LuxError::Definition { details } => {
                write!(f, "Invalid model definition: {}", details)
            }
            LuxError::Io { path, details } => {
                write!(f, "I/O error while reading '{}': {}", path, details)
            }
        }
    }
}

impl std::error::Error for LuxError {}

impl From<serde_json::Error> for LuxError {
    fn from(err: serde_json::Error) -> Self {
        LuxError::Definition {
            details: err.to_string(),
        }
    }
}
