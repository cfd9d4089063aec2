//! Error types for the RMF equation of state.

use ns_core::NsError;
use ns_solver::SolverError;
use thiserror::Error;

/// Errors that invalidate a whole RMF table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RmfError {
    #[error("Invalid crust table: {what}")]
    InvalidCrust { what: &'static str },

    #[error("No grid point beyond the crust (crust max energy density {crust_max:e} g/cm^3)")]
    NoMatchingRegion { crust_max: f64 },

    #[error(
        "Field equations did not converge at grid index {index} (rho = {rho} fm^-3, residual = {residual_norm:e})"
    )]
    UnconvergedCore {
        index: usize,
        rho: f64,
        residual_norm: f64,
    },

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Core error: {0}")]
    Core(#[from] NsError),
}

pub type RmfResult<T> = Result<T, RmfError>;

impl From<RmfError> for NsError {
    fn from(e: RmfError) -> Self {
        match e {
            RmfError::InvalidCrust { what } => NsError::InvalidArg { what },
            RmfError::NoMatchingRegion { .. } => NsError::Invariant {
                what: "no crust matching region",
            },
            RmfError::UnconvergedCore { .. } => NsError::Invariant {
                what: "unconverged core",
            },
            RmfError::Solver(_) => NsError::Invariant { what: "solver" },
            RmfError::Core(e) => e,
        }
    }
}
