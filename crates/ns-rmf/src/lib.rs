//! Relativistic mean-field (RMF) equation of state for neutron-star cores.
//!
//! The crate splits into the field equations ([`field`]), pure functions of
//! a trial mean-field state, and the driver ([`driver`]) that warm-starts a
//! nonlinear solve at every point of a fixed baryon-density grid, converts
//! the result to cgs units and cuts it where it rises above a crust table.
//!
//! ```no_run
//! use ns_core::EosTable;
//! use ns_rmf::{RmfParams, compute_eos};
//!
//! let crust = EosTable::new(vec![1e6, 1e10, 1e13], vec![1e22, 1e28, 1e31]).unwrap();
//! let params = RmfParams::from_theta([
//!     2.5085, 3.96544, 3.86662, 10.3718, 13.5054, 14.3675,
//!     0.015665, -0.00168, 0.024, 0.045,
//! ]);
//! let core = compute_eos(&crust, &params).unwrap();
//! println!("{} core rows from grid index {}", core.table.len(), core.start_index);
//! ```

pub mod batch;
pub mod driver;
pub mod error;
pub mod field;
pub mod grid;
pub mod params;
pub mod species;
pub mod state;

pub use batch::compute_eos_batch;
pub use driver::{
    CRUST_OFFSET, CRUST_SKIP_INDEX, CoreEos, PotentialsAt, RawSweep, StepDiagnostics,
    StepOutcome, SweepOptions, compute_eos, compute_eos_with, match_crust, step, sweep,
};
pub use error::{RmfError, RmfResult};
pub use field::{AtDensity, FieldEquations, ThermoPoint};
pub use grid::{DensityGrid, GRID_POINTS, GRID_STEP};
pub use params::RmfParams;
pub use state::{Composition, FieldState};
