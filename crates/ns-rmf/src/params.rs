//! RMF Lagrangian parameters.

use ns_core::{NsError, NsResult, Real, ensure_all_finite};
use serde::{Deserialize, Serialize};

/// The ten couplings of the RMF Lagrangian, in natural units (fm⁻¹ for
/// masses, dimensionless couplings, κ in fm⁻¹).
///
/// Field order matches the conventional theta vector:
/// `(m_σ, m_ω, m_ρ, g_σ, g_ω, g_ρ, κ, λ₀, ζ, Λ_w)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RmfParams {
    pub m_sigma: Real,
    pub m_omega: Real,
    pub m_rho: Real,
    pub g_sigma: Real,
    pub g_omega: Real,
    pub g_rho: Real,
    pub kappa: Real,
    pub lambda_0: Real,
    pub zeta: Real,
    pub lambda_w: Real,
}

impl RmfParams {
    pub const LEN: usize = 10;

    pub fn from_theta(theta: [Real; 10]) -> Self {
        let [
            m_sigma,
            m_omega,
            m_rho,
            g_sigma,
            g_omega,
            g_rho,
            kappa,
            lambda_0,
            zeta,
            lambda_w,
        ] = theta;
        Self {
            m_sigma,
            m_omega,
            m_rho,
            g_sigma,
            g_omega,
            g_rho,
            kappa,
            lambda_0,
            zeta,
            lambda_w,
        }
    }

    /// Build from a slice, as handed over by a sampler.
    pub fn from_slice(theta: &[Real]) -> NsResult<Self> {
        let arr: [Real; 10] = theta.try_into().map_err(|_| NsError::LengthMismatch {
            what: "RMF theta",
            expected: Self::LEN,
            got: theta.len(),
        })?;
        ensure_all_finite(&arr, "RMF theta")?;
        Ok(Self::from_theta(arr))
    }

    pub fn to_theta(&self) -> [Real; 10] {
        [
            self.m_sigma,
            self.m_omega,
            self.m_rho,
            self.g_sigma,
            self.g_omega,
            self.g_rho,
            self.kappa,
            self.lambda_0,
            self.zeta,
            self.lambda_w,
        ]
    }

    /// Reject parameter sets the field equations cannot be evaluated with
    /// (the meson masses and couplings appear as divisors).
    pub fn validate(&self) -> NsResult<()> {
        ensure_all_finite(&self.to_theta(), "RMF theta")?;
        let divisors = [
            self.m_sigma,
            self.m_omega,
            self.m_rho,
            self.g_sigma,
            self.g_omega,
            self.g_rho,
        ];
        if divisors.iter().any(|&v| v == 0.0) {
            return Err(NsError::InvalidArg {
                what: "meson masses and couplings must be non-zero",
            });
        }
        Ok(())
    }
}
