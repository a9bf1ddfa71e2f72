//! Error types for recomendar operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for recomendar operations.
///
/// Covers contract violations by model authors (missing capabilities),
/// evaluation-set configuration errors, and worker-pool failures.
///
/// # Examples
///
/// ```
/// use recomendar::error::RecomendarError;
///
/// let err = RecomendarError::NotImplemented {
///     capability: "predict".to_string(),
/// };
/// assert!(err.to_string().contains("predict"));
/// ```
#[derive(Debug)]
pub enum RecomendarError {
    /// An abstract model capability was invoked without a concrete
    /// implementation.
    NotImplemented {
        /// Capability name (e.g., "train", "predict")
        capability: String,
    },

    /// No evaluated user has any held-out interaction, so neither recall
    /// nor precision is defined.
    EmptyEvaluationSet,

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Worker pool construction failed.
    WorkerPool {
        /// Error details from the pool builder
        message: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for RecomendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecomendarError::NotImplemented { capability } => {
                write!(f, "Capability not implemented: {capability}")
            }
            RecomendarError::EmptyEvaluationSet => {
                write!(
                    f,
                    "Test matrix has no held-out interactions for any evaluated user"
                )
            }
            RecomendarError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            RecomendarError::WorkerPool { message } => {
                write!(f, "Worker pool construction failed: {message}")
            }
            RecomendarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RecomendarError {}

impl From<&str> for RecomendarError {
    fn from(msg: &str) -> Self {
        RecomendarError::Other(msg.to_string())
    }
}

impl From<String> for RecomendarError {
    fn from(msg: String) -> Self {
        RecomendarError::Other(msg)
    }
}

impl RecomendarError {
    /// Create a not-implemented error for a named capability.
    #[must_use]
    pub fn not_implemented(capability: &str) -> Self {
        Self::NotImplemented {
            capability: capability.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, RecomendarError>;
