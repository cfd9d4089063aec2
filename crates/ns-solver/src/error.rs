//! Error types for solver operations.

use ns_core::NsError;
use thiserror::Error;

/// Errors that stop a solve before it can report a result.
///
/// Failing to converge is not one of them; see [`crate::SolveReport`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Dimension mismatch: system has {expected} unknowns, guess has {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Non-finite residual at {what}")]
    NonFiniteResidual { what: &'static str },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("Core error: {0}")]
    Core(#[from] NsError),
}

pub type SolverResult<T> = Result<T, SolverError>;
