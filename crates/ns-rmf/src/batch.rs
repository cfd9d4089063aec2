//! Parallel evaluation of many parameter sets.
//!
//! Each evaluation owns its warm-start state, so parameter sets are
//! independent and need no locking.

use crate::driver::{CoreEos, SweepOptions, compute_eos_with};
use crate::error::RmfResult;
use crate::params::RmfParams;
use ns_core::EosTable;
use ns_solver::NonlinearSolver;
use rayon::prelude::*;

/// Compute one core table per parameter set, in input order.
pub fn compute_eos_batch<S>(
    crust: &EosTable,
    params: &[RmfParams],
    solver: &S,
    options: &SweepOptions,
) -> Vec<RmfResult<CoreEos>>
where
    S: NonlinearSolver + Sync,
{
    params
        .par_iter()
        .map(|p| compute_eos_with(crust, p, solver, options))
        .collect()
}
