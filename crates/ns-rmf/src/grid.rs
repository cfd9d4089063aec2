//! Baryon density grid swept by the RMF driver.

use ns_core::{PhysicsConstants, Real};

/// Number of grid points.
pub const GRID_POINTS: usize = 124;
/// Grid spacing in units of ρ₀.
pub const GRID_STEP: Real = 0.05;
/// Density of the analytic seed, in units of ρ₀.
pub const SEED_DENSITY: Real = 0.1;

/// ρᵢ = i Δ ρ₀ for i = 1..=124.
#[derive(Clone, Copy, Debug)]
pub struct DensityGrid {
    pub rho_0: Real,
    pub step: Real,
    pub points: usize,
}

impl DensityGrid {
    pub fn new(constants: &PhysicsConstants) -> Self {
        Self {
            rho_0: constants.rho_0,
            step: GRID_STEP,
            points: GRID_POINTS,
        }
    }

    /// Density at 0-based position `index`.
    pub fn density(&self, index: usize) -> Real {
        (index + 1) as Real * self.step * self.rho_0
    }

    pub fn seed_density(&self) -> Real {
        SEED_DENSITY * self.rho_0
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Real)> + '_ {
        (0..self.points).map(move |i| (i, self.density(i)))
    }
}
