//! Damped Newton solver with backtracking line search.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::forward_difference_from;
use crate::system::{NonlinearSolver, ResidualSystem, SolveReport, all_finite, check_dimension};
use nalgebra::DVector;

/// Newton solver configuration.
#[derive(Clone, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative perturbation for the finite-difference Jacobian
    pub fd_epsilon: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: 1e-10,
            fd_epsilon: 1.49e-8,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
        }
    }
}

/// Newton backend for square systems.
#[derive(Clone, Debug, Default)]
pub struct DampedNewton {
    pub config: NewtonConfig,
}

impl DampedNewton {
    pub fn new(config: NewtonConfig) -> Self {
        Self { config }
    }
}

impl NonlinearSolver for DampedNewton {
    fn name(&self) -> &str {
        "damped-newton"
    }

    fn solve(&self, system: &dyn ResidualSystem, x0: DVector<f64>) -> SolverResult<SolveReport> {
        check_dimension(system, &x0)?;
        let config = &self.config;
        let residual_fn = |x: &DVector<f64>| system.residual(x);

        let mut x = x0;
        let mut r = residual_fn(&x)?;
        if !all_finite(&r) {
            return Err(SolverError::NonFiniteResidual {
                what: "initial guess",
            });
        }
        if r.len() != x.len() {
            return Err(SolverError::Numeric {
                what: format!("Newton needs a square system, got {} equations", r.len()),
            });
        }
        let mut r_norm = r.norm();

        for iter in 0..config.max_iterations {
            // Check convergence
            if r_norm < config.abs_tol {
                return Ok(SolveReport {
                    x,
                    residual_norm: r_norm,
                    iterations: iter,
                    converged: true,
                });
            }

            let jac = forward_difference_from(&x, &r, &residual_fn, config.fd_epsilon)?;

            // Solve J * dx = -r
            let Some(dx) = jac.lu().solve(&(-r.clone())) else {
                tracing::debug!(iter, "singular Jacobian");
                return Ok(SolveReport {
                    x,
                    residual_norm: r_norm,
                    iterations: iter,
                    converged: false,
                });
            };

            // Backtrack until the residual shrinks
            let mut alpha = 1.0;
            let mut improved = None;
            for _ in 0..config.max_line_search_iters {
                let x_new = &x + alpha * &dx;
                let r_new = residual_fn(&x_new)?;
                let r_new_norm = r_new.norm();
                if r_new_norm.is_finite() && r_new_norm < r_norm {
                    improved = Some((x_new, r_new, r_new_norm));
                    break;
                }
                alpha *= config.line_search_beta;
            }

            let Some((x_new, r_new, r_new_norm)) = improved else {
                tracing::debug!(iter, residual = r_norm, "line search stagnated");
                return Ok(SolveReport {
                    x,
                    residual_norm: r_norm,
                    iterations: iter + 1,
                    converged: false,
                });
            };

            x = x_new;
            r = r_new;
            r_norm = r_new_norm;
        }

        Ok(SolveReport {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
            converged: r_norm < config.abs_tol,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Quadratic;

    impl ResidualSystem for Quadratic {
        fn dimension(&self) -> usize {
            1
        }

        fn residual(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] - 4.0))
        }
    }

    #[test]
    fn simple_quadratic() {
        // Solve x^2 - 4 = 0 from x = 3
        let x0 = DVector::from_element(1, 3.0);
        let result = DampedNewton::default().solve(&Quadratic, x0).unwrap();

        assert!(result.converged);
        assert!((result.x[0] - 2.0).abs() < 1e-9);
    }

    struct NoRealRoot;

    impl ResidualSystem for NoRealRoot {
        fn dimension(&self) -> usize {
            1
        }

        fn residual(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] + 4.0))
        }
    }

    #[test]
    fn missing_root_is_reported_not_raised() {
        let x0 = DVector::from_element(1, 1.0);
        let result = DampedNewton::default().solve(&NoRealRoot, x0).unwrap();
        assert!(!result.converged);
        assert!(result.residual_norm >= 4.0);
    }
}
