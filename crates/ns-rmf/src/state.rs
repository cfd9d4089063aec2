//! Mean-field state at one baryon density.

use nalgebra::DVector;
use ns_core::Real;
use serde::{Deserialize, Serialize};

/// Solved (or trial) mean fields and chemical potentials, in fm⁻¹.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    pub sigma: Real,
    pub omega: Real,
    pub rho_03: Real,
    pub mu_n: Real,
    pub mu_e: Real,
}

impl FieldState {
    pub const DIM: usize = 5;

    pub fn to_vector(&self) -> DVector<Real> {
        DVector::from_vec(vec![
            self.sigma,
            self.omega,
            self.rho_03,
            self.mu_n,
            self.mu_e,
        ])
    }

    /// Inverse of [`FieldState::to_vector`]; `x` must have five entries.
    pub fn from_vector(x: &DVector<Real>) -> Self {
        Self {
            sigma: x[0],
            omega: x[1],
            rho_03: x[2],
            mu_n: x[3],
            mu_e: x[4],
        }
    }
}

/// Number densities [fm⁻³] of each species in a state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub proton: Real,
    pub neutron: Real,
    pub electron: Real,
    pub muon: Real,
}

impl Composition {
    pub fn baryon_density(&self) -> Real {
        self.proton + self.neutron
    }

    pub fn proton_fraction(&self) -> Real {
        let n_b = self.baryon_density();
        if n_b > 0.0 { self.proton / n_b } else { 0.0 }
    }

    /// Net electric charge density.
    pub fn charge_density(&self) -> Real {
        self.proton - self.electron - self.muon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_round_trip() {
        let s = FieldState {
            sigma: 0.1,
            omega: 0.2,
            rho_03: -0.03,
            mu_n: 4.9,
            mu_e: 0.5,
        };
        assert_eq!(FieldState::from_vector(&s.to_vector()), s);
    }

    #[test]
    fn empty_composition() {
        let c = Composition::default();
        assert_eq!(c.proton_fraction(), 0.0);
        assert_eq!(c.charge_density(), 0.0);
    }
}
