//! Both solver backends agree on a small coupled system.

use nalgebra::DVector;
use ns_solver::{
    DampedNewton, LevenbergMarquardt, NonlinearSolver, ResidualSystem, SolverResult,
};
use proptest::prelude::*;

/// Circle of radius 2 intersected with the line y = x.
struct CircleLine;

impl ResidualSystem for CircleLine {
    fn dimension(&self) -> usize {
        2
    }

    fn residual(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        Ok(DVector::from_vec(vec![
            x[0] * x[0] + x[1] * x[1] - 4.0,
            x[1] - x[0],
        ]))
    }
}

#[test]
fn backends_are_swappable() {
    let backends: Vec<Box<dyn NonlinearSolver>> = vec![
        Box::new(LevenbergMarquardt::default()),
        Box::new(DampedNewton::default()),
    ];

    let root = 2.0_f64.sqrt();
    for solver in &backends {
        let report = solver
            .solve(&CircleLine, DVector::from_vec(vec![1.0, 0.5]))
            .unwrap();
        assert!(report.converged, "{} did not converge", solver.name());
        assert!((report.x[0] - root).abs() < 1e-8, "{}", solver.name());
        assert!((report.x[1] - root).abs() < 1e-8, "{}", solver.name());
        assert!(report.residual_norm < 1e-10);
    }
}

#[test]
fn warm_start_needs_fewer_iterations() {
    let solver = LevenbergMarquardt::default();
    let cold = solver
        .solve(&CircleLine, DVector::from_vec(vec![5.0, -3.0]))
        .unwrap();
    let warm = solver.solve(&CircleLine, cold.x.clone()).unwrap();

    assert!(cold.converged);
    assert!(warm.converged);
    assert!(warm.iterations <= cold.iterations);
    assert_eq!(warm.iterations, 0);
}

/// Cubic springs with a weak linear coupling. The Jacobian is symmetric
/// positive definite everywhere, so the root is unique.
struct CoupledCubic {
    b: [f64; 2],
}

impl ResidualSystem for CoupledCubic {
    fn dimension(&self) -> usize {
        2
    }

    fn residual(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        Ok(DVector::from_vec(vec![
            x[0] + 0.1 * x[0].powi(3) + 0.2 * x[1] - self.b[0],
            x[1] + 0.1 * x[1].powi(3) + 0.2 * x[0] - self.b[1],
        ]))
    }
}

proptest! {
    #[test]
    fn backends_agree_on_unique_root(
        b0 in -3.0f64..3.0,
        b1 in -3.0f64..3.0,
        x0 in -1.0f64..1.0,
        x1 in -1.0f64..1.0,
    ) {
        let system = CoupledCubic { b: [b0, b1] };
        let start = DVector::from_vec(vec![x0, x1]);
        let lm = LevenbergMarquardt::default().solve(&system, start.clone()).unwrap();
        let newton = DampedNewton::default().solve(&system, start).unwrap();

        prop_assert!(lm.converged);
        prop_assert!(newton.converged);
        prop_assert!((lm.x[0] - newton.x[0]).abs() < 1e-8);
        prop_assert!((lm.x[1] - newton.x[1]).abs() < 1e-8);
    }
}
