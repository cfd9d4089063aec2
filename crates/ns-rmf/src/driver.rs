//! Continuation sweep over the density grid and crust matching.
//!
//! Each grid point is one [`step`]: a warm-started solve of the field
//! equations from the previous state. [`sweep`] threads the state through
//! the whole grid; [`compute_eos`] converts to cgs and keeps the part of
//! the table above the crust.

use crate::error::{RmfError, RmfResult};
use crate::field::FieldEquations;
use crate::grid::DensityGrid;
use crate::params::RmfParams;
use crate::state::FieldState;
use ns_core::{EosTable, Real, energy_density_to_cgs, pressure_to_cgs};
use ns_solver::{LevenbergMarquardt, NonlinearSolver};
use serde::{Deserialize, Serialize};

/// Grid indices up to and including this one never match the crust.
pub const CRUST_SKIP_INDEX: usize = 18;
/// Rows dropped past the first crossing index.
pub const CRUST_OFFSET: usize = 2;

/// Which state a grid row's energy density and pressure are evaluated at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotentialsAt {
    /// The warm-start seed, i.e. the solution of the previous grid point.
    #[default]
    PreSolve,
    /// The state just solved at this grid point.
    PostSolve,
}

/// Sweep options.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SweepOptions {
    pub potentials_at: PotentialsAt,
    /// Fail when any solve feeding the retained table did not converge.
    pub strict_tail: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            potentials_at: PotentialsAt::PreSolve,
            strict_tail: true,
        }
    }
}

/// Convergence record of one grid point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepDiagnostics {
    pub index: usize,
    pub rho: Real,
    pub converged: bool,
    pub iterations: usize,
    pub residual_norm: Real,
}

/// Result of one continuation step.
#[derive(Clone, Copy, Debug)]
pub struct StepOutcome {
    pub state: FieldState,
    pub diagnostics: StepDiagnostics,
}

/// Full 124-row sweep before crust matching.
#[derive(Clone, Debug)]
pub struct RawSweep {
    /// Energy density [g cm⁻³] per grid row
    pub energy_density: Vec<Real>,
    /// Pressure [dyn cm⁻²] per grid row
    pub pressure: Vec<Real>,
    /// Solved state per grid row
    pub states: Vec<FieldState>,
    pub diagnostics: Vec<StepDiagnostics>,
}

/// Matched core table with its provenance.
#[derive(Clone, Debug)]
pub struct CoreEos {
    pub table: EosTable,
    /// First grid row kept in `table`
    pub start_index: usize,
    pub diagnostics: Vec<StepDiagnostics>,
}

/// Solve the field equations at `rho`, warm-started from `seed`.
pub fn step(
    eqs: &FieldEquations,
    solver: &dyn NonlinearSolver,
    seed: &FieldState,
    index: usize,
    rho: Real,
) -> RmfResult<StepOutcome> {
    let system = eqs.at_density(rho);
    let report = solver.solve(&system, seed.to_vector())?;

    let diagnostics = StepDiagnostics {
        index,
        rho,
        converged: report.converged,
        iterations: report.iterations,
        residual_norm: report.residual_norm,
    };
    if report.converged {
        tracing::debug!(
            index,
            rho,
            iterations = report.iterations,
            residual = report.residual_norm,
            "grid point solved"
        );
    } else {
        tracing::warn!(
            index,
            rho,
            residual = report.residual_norm,
            solver = solver.name(),
            "field equations did not converge"
        );
    }

    Ok(StepOutcome {
        state: FieldState::from_vector(&report.x),
        diagnostics,
    })
}

/// Run the continuation over the whole density grid.
pub fn sweep(
    params: &RmfParams,
    solver: &dyn NonlinearSolver,
    options: &SweepOptions,
) -> RmfResult<RawSweep> {
    params.validate()?;
    let eqs = FieldEquations::new(*params);
    let c = eqs.constants;
    let grid = DensityGrid::new(&c);

    let mut out = RawSweep {
        energy_density: Vec::with_capacity(grid.points),
        pressure: Vec::with_capacity(grid.points),
        states: Vec::with_capacity(grid.points),
        diagnostics: Vec::with_capacity(grid.points),
    };

    let mut seed = eqs.initial_values(grid.seed_density());
    for (index, rho) in grid.iter() {
        let outcome = step(&eqs, solver, &seed, index, rho)?;
        let source = match options.potentials_at {
            PotentialsAt::PreSolve => seed,
            PotentialsAt::PostSolve => outcome.state,
        };
        let thermo = eqs.thermodynamic_potentials(&source);

        out.energy_density
            .push(energy_density_to_cgs(thermo.energy_density, &c));
        out.pressure.push(pressure_to_cgs(thermo.pressure, &c));
        out.states.push(outcome.state);
        out.diagnostics.push(outcome.diagnostics);

        seed = outcome.state;
    }

    Ok(out)
}

/// Index of the first row kept above the crust.
///
/// Scans all rows but the last for the first index above
/// [`CRUST_SKIP_INDEX`] whose energy density exceeds `crust_max`, and
/// returns that index plus [`CRUST_OFFSET`].
pub fn match_crust(energy_density: &[Real], crust_max: Real) -> RmfResult<usize> {
    let scan = energy_density.len().saturating_sub(1);
    (0..scan)
        .find(|&i| i > CRUST_SKIP_INDEX && energy_density[i] > crust_max)
        .map(|i| i + CRUST_OFFSET)
        .filter(|&start| start < energy_density.len())
        .ok_or(RmfError::NoMatchingRegion { crust_max })
}

fn crust_max(crust: &EosTable) -> RmfResult<Real> {
    let max = crust
        .max_energy_density()
        .ok_or(RmfError::InvalidCrust { what: "empty table" })?;
    if !max.is_finite() {
        return Err(RmfError::InvalidCrust {
            what: "non-finite energy density",
        });
    }
    Ok(max)
}

/// Grid rows whose solves determine rows `start..` of the table.
fn feeding_solves(start: usize, len: usize, at: PotentialsAt) -> std::ops::Range<usize> {
    match at {
        PotentialsAt::PreSolve => start.saturating_sub(1)..len.saturating_sub(1),
        PotentialsAt::PostSolve => start..len,
    }
}

/// RMF core table above `crust`, using the default Levenberg–Marquardt
/// backend and default options.
pub fn compute_eos(crust: &EosTable, params: &RmfParams) -> RmfResult<CoreEos> {
    compute_eos_with(
        crust,
        params,
        &LevenbergMarquardt::default(),
        &SweepOptions::default(),
    )
}

/// RMF core table above `crust` with an explicit backend and options.
pub fn compute_eos_with(
    crust: &EosTable,
    params: &RmfParams,
    solver: &dyn NonlinearSolver,
    options: &SweepOptions,
) -> RmfResult<CoreEos> {
    let crust_max = crust_max(crust)?;
    let raw = sweep(params, solver, options)?;
    let start = match_crust(&raw.energy_density, crust_max)?;

    let unconverged = raw.diagnostics.iter().filter(|d| !d.converged).count();
    if options.strict_tail {
        let feeding = feeding_solves(start, raw.diagnostics.len(), options.potentials_at);
        if let Some(d) = raw.diagnostics[feeding].iter().find(|d| !d.converged) {
            return Err(RmfError::UnconvergedCore {
                index: d.index,
                rho: d.rho,
                residual_norm: d.residual_norm,
            });
        }
    }

    let table = EosTable::new(
        raw.energy_density[start..].to_vec(),
        raw.pressure[start..].to_vec(),
    )?;
    tracing::info!(
        start_index = start,
        rows = table.len(),
        unconverged,
        "RMF core matched to crust"
    );

    Ok(CoreEos {
        table,
        start_index: start,
        diagnostics: raw.diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<Real> {
        (0..n).map(|i| i as Real * 10.0).collect()
    }

    #[test]
    fn match_skips_early_indices() {
        // Every row exceeds the crust, but rows 0..=18 are skipped.
        let energy = ramp(124);
        assert_eq!(match_crust(&energy, -1.0).unwrap(), 21);
    }

    #[test]
    fn match_first_crossing_plus_offset() {
        let energy = ramp(124);
        // First index with 10 i > 455 is 46.
        assert_eq!(match_crust(&energy, 455.0).unwrap(), 48);
    }

    #[test]
    fn no_crossing_is_reported() {
        let energy = ramp(124);
        let err = match_crust(&energy, 1e9).unwrap_err();
        assert_eq!(err, RmfError::NoMatchingRegion { crust_max: 1e9 });
    }

    #[test]
    fn last_row_never_matches() {
        // Only the final row crosses; the scan excludes it.
        let mut energy = vec![0.0; 124];
        energy[123] = 5.0;
        assert!(match_crust(&energy, 1.0).is_err());

        // A crossing at 122 would start past the end.
        energy[122] = 5.0;
        assert!(match_crust(&energy, 1.0).is_err());

        energy[121] = 5.0;
        assert_eq!(match_crust(&energy, 1.0).unwrap(), 123);
    }

    #[test]
    fn short_tables_never_match() {
        assert!(match_crust(&[], 0.0).is_err());
        assert!(match_crust(&ramp(19), -1.0).is_err());
    }

    #[test]
    fn feeding_ranges() {
        assert_eq!(feeding_solves(21, 124, PotentialsAt::PreSolve), 20..123);
        assert_eq!(feeding_solves(21, 124, PotentialsAt::PostSolve), 21..124);
    }

    #[test]
    fn empty_crust_rejected() {
        let err = crust_max(&EosTable::default()).unwrap_err();
        assert!(matches!(err, RmfError::InvalidCrust { .. }));
    }
}
