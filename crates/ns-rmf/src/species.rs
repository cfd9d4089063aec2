//! Quantum numbers of the particles in beta-equilibrated, charge-neutral
//! npeμ matter.

use ns_core::{PhysicsConstants, Real};
use std::f64::consts::PI;

/// Spin of every fermion species.
pub const SPIN: Real = 0.5;

/// Spin degeneracy 2J + 1.
pub const fn degeneracy() -> Real {
    2.0 * SPIN + 1.0
}

/// One row of the baryon table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Baryon {
    /// Coefficient of μ_n in this species' chemical potential
    pub neutron_mu: Real,
    /// Electric charge
    pub charge: Real,
    /// Isospin projection I₃
    pub isospin: Real,
    /// Weights of the σ, ω and ρ source terms
    pub sigma_weight: Real,
    pub omega_weight: Real,
    pub rho_weight: Real,
}

impl Baryon {
    /// μ_b = B μ_n − Q μ_e
    pub fn chemical_potential(&self, mu_n: Real, mu_e: Real) -> Real {
        self.neutron_mu * mu_n - self.charge * mu_e
    }
}

/// Proton, then neutron.
pub const BARYONS: [Baryon; 2] = [
    Baryon {
        neutron_mu: 1.0,
        charge: 1.0,
        isospin: 0.5,
        sigma_weight: 1.0,
        omega_weight: 1.0,
        rho_weight: 1.0,
    },
    Baryon {
        neutron_mu: 1.0,
        charge: 0.0,
        isospin: -0.5,
        sigma_weight: 1.0,
        omega_weight: 1.0,
        rho_weight: 1.0,
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LeptonKind {
    Electron,
    Muon,
}

/// One row of the lepton table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lepton {
    pub kind: LeptonKind,
    pub neutron_mu: Real,
    pub charge: Real,
}

impl Lepton {
    pub fn mass(&self, c: &PhysicsConstants) -> Real {
        match self.kind {
            LeptonKind::Electron => c.m_electron,
            LeptonKind::Muon => c.m_muon,
        }
    }

    /// μ_l = B μ_n − Q μ_e, which is μ_e for both leptons.
    pub fn chemical_potential(&self, mu_n: Real, mu_e: Real) -> Real {
        self.neutron_mu * mu_n - self.charge * mu_e
    }
}

pub const LEPTONS: [Lepton; 2] = [
    Lepton {
        kind: LeptonKind::Electron,
        neutron_mu: 0.0,
        charge: -1.0,
    },
    Lepton {
        kind: LeptonKind::Muon,
        neutron_mu: 0.0,
        charge: -1.0,
    },
];

/// A filled Fermi sea of one species.
///
/// When the single-particle energy lies below the mass the sea is empty:
/// k_F is clipped to zero and the energy pinned to the mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FermiSea {
    pub k_f: Real,
    pub e_f: Real,
    pub mass: Real,
}

impl FermiSea {
    pub fn new(energy: Real, mass: Real) -> Self {
        let k_sq = energy * energy - mass * mass;
        if k_sq < 0.0 {
            Self {
                k_f: 0.0,
                e_f: mass,
                mass,
            }
        } else {
            Self {
                k_f: k_sq.sqrt(),
                e_f: energy,
                mass,
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.k_f == 0.0
    }

    /// (2J+1) k³ / 6π²
    pub fn number_density(&self) -> Real {
        degeneracy() * self.k_f.powi(3) / (6.0 * PI * PI)
    }

    /// m/2π² [E k − m² ln((E + k)/m)]
    pub fn scalar_density(&self) -> Real {
        if self.is_empty() {
            return 0.0;
        }
        let m = self.mass;
        (m / (2.0 * PI * PI))
            * (self.e_f * self.k_f - m * m * ((self.e_f + self.k_f) / m).ln())
    }

    /// 1/8π² [k E³ + k³ E − m⁴ ln((k + E)/m)]
    pub fn energy_density(&self) -> Real {
        if self.is_empty() {
            return 0.0;
        }
        let (k, e, m) = (self.k_f, self.e_f, self.mass);
        (k * e.powi(3) + k.powi(3) * e - m.powi(4) * ((k + e) / m).ln()) / (8.0 * PI * PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proton_and_neutron_potentials() {
        let (mu_n, mu_e) = (5.0, 0.5);
        assert_eq!(BARYONS[0].chemical_potential(mu_n, mu_e), 4.5);
        assert_eq!(BARYONS[1].chemical_potential(mu_n, mu_e), 5.0);
        for lepton in LEPTONS {
            assert_eq!(lepton.chemical_potential(mu_n, mu_e), 0.5);
        }
    }

    #[test]
    fn empty_sea_below_mass() {
        let sea = FermiSea::new(0.9, 1.0);
        assert!(sea.is_empty());
        assert_eq!(sea.e_f, 1.0);
        assert_eq!(sea.number_density(), 0.0);
        assert_eq!(sea.scalar_density(), 0.0);
        assert_eq!(sea.energy_density(), 0.0);
    }

    #[test]
    fn massless_limit_matches_closed_form() {
        // m -> 0: ε = k⁴ / 4π², n = k³ / 3π²
        let k = 1.3;
        let sea = FermiSea::new(k, 1e-9);
        assert!((sea.energy_density() - k.powi(4) / (4.0 * PI * PI)).abs() < 1e-9);
        assert!((sea.number_density() - k.powi(3) / (3.0 * PI * PI)).abs() < 1e-12);
    }

    #[test]
    fn nonrelativistic_energy_is_rest_mass_dominated() {
        // k << m: ε ≈ m n
        let m: Real = 4.758;
        let sea = FermiSea::new((m * m + 0.01).sqrt(), m);
        let n = sea.number_density();
        assert!((sea.energy_density() / (m * n) - 1.0).abs() < 1e-3);
        assert!((sea.scalar_density() / n - 1.0).abs() < 1e-3);
    }

    #[test]
    fn lepton_below_threshold_carries_no_energy() {
        // Muon with μ_e under its mass, and a negative trial μ_e
        let m_mu = 0.53544;
        for mu in [0.3, 1e-6, -0.2] {
            let sea = FermiSea::new(mu, m_mu);
            assert!(sea.is_empty());
            assert_eq!(sea.e_f, m_mu);
            assert_eq!(sea.energy_density(), 0.0);
            assert_eq!(sea.number_density(), 0.0);
        }
    }
}
