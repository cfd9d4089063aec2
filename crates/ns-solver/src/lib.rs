//! Nonlinear-system solvers for the EOS models.
//!
//! Physics crates describe their equations through [`ResidualSystem`] and
//! hand them to any [`NonlinearSolver`] backend. Two backends ship here:
//! Levenberg–Marquardt (the default) and a damped Newton method. Neither
//! treats non-convergence as an error; callers read
//! [`SolveReport::converged`] and decide.

pub mod error;
pub mod jacobian;
pub mod levenberg;
pub mod newton;
pub mod system;

pub use error::{SolverError, SolverResult};
pub use jacobian::{central_difference_jacobian, finite_difference_jacobian};
pub use levenberg::{LevenbergMarquardt, LmConfig};
pub use newton::{DampedNewton, NewtonConfig};
pub use system::{NonlinearSolver, ResidualSystem, SolveReport};
