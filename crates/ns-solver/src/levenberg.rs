//! Levenberg–Marquardt least-squares solver.
//!
//! Minimizes `½‖r(x)‖²` with Marquardt's diagonal scaling of the damping
//! term and a forward-difference Jacobian. The damping parameter is relaxed
//! after every accepted step and stiffened after every rejected one.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::forward_difference_from;
use crate::system::{NonlinearSolver, ResidualSystem, SolveReport, all_finite, check_dimension};
use nalgebra::DVector;

const MIN_LAMBDA: f64 = 1e-15;
const DIAG_FLOOR: f64 = 1e-30;

/// Levenberg–Marquardt configuration.
#[derive(Clone, Debug)]
pub struct LmConfig {
    /// Maximum outer iterations
    pub max_iterations: usize,
    /// Absolute tolerance on the residual norm
    pub abs_tol: f64,
    /// Relative step size below which iteration stops
    pub x_tol: f64,
    /// Relative perturbation for the finite-difference Jacobian
    pub fd_epsilon: f64,
    /// Starting damping parameter
    pub initial_lambda: f64,
    /// Damping multiplier after a rejected step
    pub lambda_up: f64,
    /// Damping divisor after an accepted step
    pub lambda_down: f64,
    /// Damping above which the solve is declared stagnated
    pub max_lambda: f64,
}

impl Default for LmConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            abs_tol: 1e-10,
            x_tol: 1e-15,
            fd_epsilon: 1.49e-8,
            initial_lambda: 1e-3,
            lambda_up: 10.0,
            lambda_down: 10.0,
            max_lambda: 1e16,
        }
    }
}

/// Levenberg–Marquardt backend.
#[derive(Clone, Debug, Default)]
pub struct LevenbergMarquardt {
    pub config: LmConfig,
}

impl LevenbergMarquardt {
    pub fn new(config: LmConfig) -> Self {
        Self { config }
    }

    fn report(x: DVector<f64>, cost: f64, iterations: usize, abs_tol: f64) -> SolveReport {
        let residual_norm = cost.sqrt();
        SolveReport {
            x,
            residual_norm,
            iterations,
            converged: residual_norm <= abs_tol,
        }
    }
}

impl NonlinearSolver for LevenbergMarquardt {
    fn name(&self) -> &str {
        "levenberg-marquardt"
    }

    fn solve(&self, system: &dyn ResidualSystem, x0: DVector<f64>) -> SolverResult<SolveReport> {
        check_dimension(system, &x0)?;
        let cfg = &self.config;
        let eval = |x: &DVector<f64>| system.residual(x);

        let mut x = x0;
        let mut r = eval(&x)?;
        if !all_finite(&r) {
            return Err(SolverError::NonFiniteResidual {
                what: "initial guess",
            });
        }
        let mut cost = r.norm_squared();
        let mut lambda = cfg.initial_lambda;
        let n = x.len();

        for iter in 0..cfg.max_iterations {
            if cost.sqrt() <= cfg.abs_tol {
                return Ok(Self::report(x, cost, iter, cfg.abs_tol));
            }

            let jac = forward_difference_from(&x, &r, &eval, cfg.fd_epsilon)?;
            if jac.iter().any(|v| !v.is_finite()) {
                tracing::debug!(iter, "non-finite Jacobian, stopping");
                return Ok(Self::report(x, cost, iter, cfg.abs_tol));
            }

            let jt = jac.transpose();
            let jtj = &jt * &jac;
            let neg_grad = -(&jt * &r);

            let mut accepted = None;
            while lambda <= cfg.max_lambda {
                let mut damped = jtj.clone();
                for i in 0..n {
                    damped[(i, i)] += lambda * jtj[(i, i)].max(DIAG_FLOOR);
                }

                let Some(dx) = damped.lu().solve(&neg_grad) else {
                    lambda *= cfg.lambda_up;
                    continue;
                };

                let x_trial = &x + &dx;
                let r_trial = eval(&x_trial)?;
                let cost_trial = r_trial.norm_squared();

                if cost_trial.is_finite() && cost_trial < cost {
                    lambda = (lambda / cfg.lambda_down).max(MIN_LAMBDA);
                    accepted = Some((x_trial, r_trial, cost_trial, dx.norm()));
                    break;
                }
                lambda *= cfg.lambda_up;
            }

            let Some((x_new, r_new, cost_new, step)) = accepted else {
                tracing::debug!(iter, residual = cost.sqrt(), "damping exhausted");
                return Ok(Self::report(x, cost, iter + 1, cfg.abs_tol));
            };

            x = x_new;
            r = r_new;
            cost = cost_new;

            if step <= cfg.x_tol * (x.norm() + cfg.x_tol) {
                return Ok(Self::report(x, cost, iter + 1, cfg.abs_tol));
            }
        }

        Ok(Self::report(x, cost, cfg.max_iterations, cfg.abs_tol))
    }
}
