//! Residual-system and solver-backend abstractions.

use crate::error::{SolverError, SolverResult};
use nalgebra::DVector;

/// A system of equations `r(x) = 0`.
///
/// The solvers minimize `‖r(x)‖²`, so implementors return signed residual
/// components rather than their squares.
pub trait ResidualSystem {
    /// Number of unknowns.
    fn dimension(&self) -> usize;

    /// Evaluate the residual vector at `x`.
    fn residual(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>>;
}

/// Outcome of a single nonlinear solve.
#[derive(Clone, Debug)]
pub struct SolveReport {
    /// Last accepted iterate
    pub x: DVector<f64>,
    /// Euclidean norm of the residual at `x`
    pub residual_norm: f64,
    /// Number of iterations performed
    pub iterations: usize,
    /// Whether `residual_norm` met the absolute tolerance
    pub converged: bool,
}

/// A swappable nonlinear solver backend.
pub trait NonlinearSolver {
    /// Backend name (for logging).
    fn name(&self) -> &str;

    /// Solve `system` starting from `x0`.
    fn solve(&self, system: &dyn ResidualSystem, x0: DVector<f64>) -> SolverResult<SolveReport>;
}

pub(crate) fn check_dimension(system: &dyn ResidualSystem, x0: &DVector<f64>) -> SolverResult<()> {
    if system.dimension() != x0.len() {
        return Err(SolverError::DimensionMismatch {
            expected: system.dimension(),
            got: x0.len(),
        });
    }
    Ok(())
}

pub(crate) fn all_finite(v: &DVector<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shift;

    impl ResidualSystem for Shift {
        fn dimension(&self) -> usize {
            2
        }

        fn residual(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![x[0] - 1.0, x[1] + 1.0]))
        }
    }

    #[test]
    fn dimension_check() {
        assert!(check_dimension(&Shift, &DVector::zeros(2)).is_ok());
        let err = check_dimension(&Shift, &DVector::zeros(3)).unwrap_err();
        assert_eq!(
            err,
            SolverError::DimensionMismatch {
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn finiteness() {
        assert!(all_finite(&DVector::from_vec(vec![1.0, 2.0])));
        assert!(!all_finite(&DVector::from_vec(vec![1.0, f64::NAN])));
    }
}
