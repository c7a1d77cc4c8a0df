//! Error types produced while constructing or analyzing task sets.

use thiserror::Error;

/// Errors that can occur while assembling or querying the input to an
/// analysis.
///
/// Unlike [crate::fixed_point::SearchFailure], which reports that an
/// analysis did not converge, these errors reject malformed input before
/// any analysis is attempted.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ModelError {
    /// A policy required a task's relative deadline, but none was given.
    #[error("deadline parameter missing")]
    MissingDeadline,

    /// A policy required a task's priority, but none was given.
    #[error("priority parameter missing")]
    MissingPriority,

    /// A supply or execution model was constructed with parameters that
    /// violate its documented preconditions.
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
