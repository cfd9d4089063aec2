//! RMF field equations for npeμ matter.
//!
//! Pure functions of a trial [`FieldState`]: the analytic low-density seed,
//! the five coupled equations (σ, ω and ρ meson fields, baryon number,
//! charge neutrality) and the energy density / pressure of a solved state.
//! All quantities are in natural units (fm⁻¹, fm⁻³, fm⁻⁴).

use crate::params::RmfParams;
use crate::species::{BARYONS, FermiSea, LEPTONS};
use crate::state::{Composition, FieldState};
use nalgebra::DVector;
use ns_core::{PhysicsConstants, Real};
use ns_solver::{ResidualSystem, SolverResult};

/// Energy density and pressure [fm⁻⁴] of one state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermoPoint {
    pub energy_density: Real,
    pub pressure: Real,
}

/// Field equations for one parameter set.
#[derive(Clone, Copy, Debug)]
pub struct FieldEquations {
    pub params: RmfParams,
    pub constants: PhysicsConstants,
}

/// Per-species sums entering the field equations.
struct Sources {
    scalar: Real,
    vector: Real,
    isovector: Real,
    baryon: Real,
    charge: Real,
}

impl FieldEquations {
    pub fn new(params: RmfParams) -> Self {
        Self {
            params,
            constants: PhysicsConstants::STANDARD,
        }
    }

    pub fn with_constants(params: RmfParams, constants: PhysicsConstants) -> Self {
        Self { params, constants }
    }

    pub fn effective_mass(&self, sigma: Real) -> Real {
        self.constants.m_neutron - self.params.g_sigma * sigma
    }

    /// Analytic seed at low density, ignoring the nonlinear self-couplings
    /// except in the ω balance. Only meant as a starting guess.
    pub fn initial_values(&self, rho: Real) -> FieldState {
        let p = &self.params;
        let c = &self.constants;

        let sigma = p.g_sigma * rho / (p.m_sigma * p.m_sigma);
        let rho_03 = -p.g_rho * rho / (2.0 * p.m_rho * p.m_rho);
        let omega = rho
            / (p.m_omega * p.m_omega / p.g_omega
                + 2.0 * p.lambda_w * (p.g_rho * rho_03).powi(2) * p.g_omega);
        let m_eff = self.effective_mass(sigma);
        let mu_n = m_eff + p.g_omega * omega + p.g_rho * rho_03 * BARYONS[1].isospin;
        let mu_e = 0.12 * c.m_electron * (rho / c.rho_0).powf(2.0 / 3.0);

        FieldState {
            sigma,
            omega,
            rho_03,
            mu_n,
            mu_e,
        }
    }

    fn baryon_sea(&self, x: &FieldState, m_eff: Real, index: usize) -> (Real, FermiSea) {
        let p = &self.params;
        let b = &BARYONS[index];
        let mu_b = b.chemical_potential(x.mu_n, x.mu_e);
        let e_fb = mu_b - p.g_omega * x.omega - p.g_rho * x.rho_03 * b.isospin;
        (mu_b, FermiSea::new(e_fb, m_eff))
    }

    fn lepton_sea(&self, x: &FieldState, index: usize) -> (Real, FermiSea) {
        let l = &LEPTONS[index];
        let mu_l = l.chemical_potential(x.mu_n, x.mu_e);
        (mu_l, FermiSea::new(mu_l, l.mass(&self.constants)))
    }

    fn sources(&self, x: &FieldState) -> Sources {
        let m_eff = self.effective_mass(x.sigma);
        let mut s = Sources {
            scalar: 0.0,
            vector: 0.0,
            isovector: 0.0,
            baryon: 0.0,
            charge: 0.0,
        };

        for (i, b) in BARYONS.iter().enumerate() {
            let (_, sea) = self.baryon_sea(x, m_eff, i);
            let n_b = sea.number_density();
            s.scalar += sea.scalar_density() * b.sigma_weight;
            s.vector += n_b * b.omega_weight;
            s.isovector += n_b * b.rho_weight * b.isospin;
            s.baryon += n_b;
            s.charge += b.charge * n_b;
        }
        for (j, l) in LEPTONS.iter().enumerate() {
            let (_, sea) = self.lepton_sea(x, j);
            s.charge += l.charge * sea.number_density();
        }
        s
    }

    /// Signed residuals of the five field equations.
    pub fn signed_residual(&self, x: &FieldState, rho: Real) -> [Real; 5] {
        let p = &self.params;
        let s = self.sources(x);
        let g_sigma_sigma = p.g_sigma * x.sigma;
        let g_omega_omega = p.g_omega * x.omega;
        let g_rho_rho = p.g_rho * x.rho_03;

        [
            x.sigma * p.m_sigma * p.m_sigma / p.g_sigma - s.scalar
                + p.kappa * g_sigma_sigma.powi(2) / 2.0
                + p.lambda_0 * g_sigma_sigma.powi(3) / 6.0,
            x.omega * p.m_omega * p.m_omega / p.g_omega - s.vector
                + p.zeta * g_omega_omega.powi(3) / 6.0
                + 2.0 * p.lambda_w * p.g_omega * x.omega * g_rho_rho.powi(2),
            x.rho_03 * p.m_rho * p.m_rho / p.g_rho - s.isovector
                + 2.0 * p.lambda_w * p.g_rho * x.rho_03 * g_omega_omega.powi(2),
            rho - s.baryon,
            s.charge,
        ]
    }

    /// Squared residuals; all five vanish at a solution.
    pub fn residual(&self, x: &FieldState, rho: Real) -> [Real; 5] {
        self.signed_residual(x, rho).map(|r| r * r)
    }

    /// Species number densities of a state.
    pub fn composition(&self, x: &FieldState) -> Composition {
        let m_eff = self.effective_mass(x.sigma);
        let density = |sea: FermiSea| sea.number_density();
        Composition {
            proton: density(self.baryon_sea(x, m_eff, 0).1),
            neutron: density(self.baryon_sea(x, m_eff, 1).1),
            electron: density(self.lepton_sea(x, 0).1),
            muon: density(self.lepton_sea(x, 1).1),
        }
    }

    /// Energy density and pressure of a (solved) state.
    ///
    /// The pressure follows from `P = Σ μᵢ nᵢ − ε`, so the identity holds for
    /// any input state.
    pub fn thermodynamic_potentials(&self, x: &FieldState) -> ThermoPoint {
        let p = &self.params;
        let m_eff = self.effective_mass(x.sigma);

        let mut energy = 0.0;
        let mut chemical = 0.0;
        for i in 0..BARYONS.len() {
            let (mu_b, sea) = self.baryon_sea(x, m_eff, i);
            chemical += mu_b * sea.number_density();
            energy += sea.energy_density();
        }
        for j in 0..LEPTONS.len() {
            let (mu_l, sea) = self.lepton_sea(x, j);
            chemical += mu_l * sea.number_density();
            energy += sea.energy_density();
        }

        let g_sigma_sigma = p.g_sigma * x.sigma;
        let sigma_terms = 0.5 * (x.sigma * p.m_sigma).powi(2)
            + p.kappa * g_sigma_sigma.powi(3) / 6.0
            + p.lambda_0 * g_sigma_sigma.powi(4) / 24.0;
        let omega_terms =
            0.5 * (x.omega * p.m_omega).powi(2) + p.zeta * (p.g_omega * x.omega).powi(4) / 8.0;
        let rho_terms = 0.5 * (x.rho_03 * p.m_rho).powi(2)
            + 3.0 * p.lambda_w * (p.g_rho * x.rho_03 * p.g_omega * x.omega).powi(2);

        let energy_density = energy + sigma_terms + omega_terms + rho_terms;
        ThermoPoint {
            energy_density,
            pressure: chemical - energy_density,
        }
    }

    /// View of the equations at a fixed baryon density, for the solver.
    pub fn at_density(&self, rho: Real) -> AtDensity<'_> {
        AtDensity { eqs: self, rho }
    }
}

/// The field equations at one baryon density as a [`ResidualSystem`].
pub struct AtDensity<'a> {
    eqs: &'a FieldEquations,
    rho: Real,
}

impl ResidualSystem for AtDensity<'_> {
    fn dimension(&self) -> usize {
        FieldState::DIM
    }

    fn residual(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        let state = FieldState::from_vector(x);
        Ok(DVector::from_row_slice(
            &self.eqs.signed_residual(&state, self.rho),
        ))
    }
}
