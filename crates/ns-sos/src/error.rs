//! Error types for the speed-of-sound model.

use ns_core::NsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SosError {
    #[error("Unit-cube coordinate {index} out of [0, 1]: {value}")]
    CubeOutOfRange { index: usize, value: f64 },

    #[error("Invalid energy-density grid: {what}")]
    InvalidGrid { what: &'static str },

    #[error("Invalid outer EOS: {what}")]
    InvalidBoundary { what: &'static str },

    #[error("Core error: {0}")]
    Core(#[from] NsError),
}

pub type SosResult<T> = Result<T, SosError>;
