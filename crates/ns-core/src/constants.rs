//! Physical constants shared by every EOS model.
//!
//! Masses are expressed in natural units (fm⁻¹, ħ = c = 1). Conversion
//! factors go from MeV fm⁻³ to cgs.

use crate::numeric::Real;

/// Immutable set of physical constants.
///
/// One value, [`PhysicsConstants::STANDARD`], is used process-wide. It is
/// `Copy` so models can hold it by value without sharing state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConstants {
    /// Electron mass [fm⁻¹]
    pub m_electron: Real,
    /// Muon mass [fm⁻¹]
    pub m_muon: Real,
    /// Nucleon mass [fm⁻¹], shared by proton and neutron
    pub m_neutron: Real,
    /// Nuclear saturation density ρ₀ [fm⁻³]
    pub rho_0: Real,
    /// ħc [MeV fm]
    pub hbar_c: Real,
    /// Energy density of saturated nuclear matter ε₀ [MeV fm⁻³]
    pub e0: Real,
    /// 1 MeV fm⁻³ expressed as a mass density [g cm⁻³]
    pub mev_fm3_to_g_cm3: Real,
    /// 1 MeV fm⁻³ expressed as a pressure [dyn cm⁻²]
    pub mev_fm3_to_dyn_cm2: Real,
}

impl PhysicsConstants {
    pub const STANDARD: Self = Self {
        m_electron: 2.5896e-3,
        m_muon: 0.53544,
        m_neutron: 4.758_369_077_2,
        rho_0: 0.1505,
        hbar_c: 197.33,
        e0: 150.0,
        mev_fm3_to_g_cm3: 1.7827e12,
        mev_fm3_to_dyn_cm2: 1.6022e33,
    };
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self::STANDARD
    }
}
