// ns-core/src/units.rs

//! Unit conversion between the natural units of the field equations
//! (fm⁻⁴), cgs tables (g cm⁻³, dyn cm⁻²) and the reduced units of the
//! speed-of-sound model (ε/ε₀).

use crate::constants::PhysicsConstants;
use crate::numeric::Real;
use uom::si::f64::{MassDensity as UomMassDensity, Pressure as UomPressure};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;

const KG_M3_PER_G_CM3: Real = 1.0e3;
const PA_PER_DYN_CM2: Real = 0.1;

#[inline]
pub fn g_cm3(v: Real) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v * KG_M3_PER_G_CM3)
}

#[inline]
pub fn dyn_cm2(v: Real) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v * PA_PER_DYN_CM2)
}

#[inline]
pub fn as_g_cm3(d: Density) -> Real {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    d.get::<kilogram_per_cubic_meter>() / KG_M3_PER_G_CM3
}

#[inline]
pub fn as_dyn_cm2(p: Pressure) -> Real {
    use uom::si::pressure::pascal;
    p.get::<pascal>() / PA_PER_DYN_CM2
}

/// Energy density [fm⁻⁴] -> mass density [g cm⁻³].
pub fn energy_density_to_cgs(e_fm4: Real, c: &PhysicsConstants) -> Real {
    e_fm4 * c.hbar_c * c.mev_fm3_to_g_cm3
}

/// Pressure [fm⁻⁴] -> [dyn cm⁻²].
pub fn pressure_to_cgs(p_fm4: Real, c: &PhysicsConstants) -> Real {
    p_fm4 * c.hbar_c * c.mev_fm3_to_dyn_cm2
}

/// Mass density [g cm⁻³] -> ε/ε₀.
pub fn energy_density_to_reduced(e_cgs: Real, c: &PhysicsConstants) -> Real {
    e_cgs / (c.e0 * c.mev_fm3_to_g_cm3)
}

pub fn energy_density_from_reduced(x: Real, c: &PhysicsConstants) -> Real {
    x * c.e0 * c.mev_fm3_to_g_cm3
}

/// Pressure [dyn cm⁻²] -> P/ε₀.
///
/// Both reduced quantities share the MeV fm⁻³ scale, so dP/dε is the
/// squared sound speed in units of c².
pub fn pressure_to_reduced(p_cgs: Real, c: &PhysicsConstants) -> Real {
    p_cgs / (c.e0 * c.mev_fm3_to_dyn_cm2)
}

pub fn pressure_from_reduced(y: Real, c: &PhysicsConstants) -> Real {
    y * c.e0 * c.mev_fm3_to_dyn_cm2
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const C: PhysicsConstants = PhysicsConstants::STANDARD;

    #[test]
    fn typed_constructors_round_trip() {
        let d = g_cm3(2.7e14);
        assert!((as_g_cm3(d) / 2.7e14 - 1.0).abs() < 1e-12);
        let p = dyn_cm2(3.3e34);
        assert!((as_dyn_cm2(p) / 3.3e34 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn saturation_energy_density_in_cgs() {
        // ε₀ = 150 MeV fm⁻³ is about 2.67e14 g cm⁻³
        let e0 = energy_density_from_reduced(1.0, &C);
        assert!((e0 - 2.674_05e14).abs() / e0 < 1e-4);
    }

    #[test]
    fn natural_units_scale_to_cgs() {
        // 1 fm⁻⁴ is ħc = 197.33 MeV fm⁻³
        let e = energy_density_to_cgs(1.0, &C);
        let p = pressure_to_cgs(1.0, &C);
        assert!((e / (197.33 * 1.7827e12) - 1.0).abs() < 1e-12);
        assert!((p / (197.33 * 1.6022e33) - 1.0).abs() < 1e-12);
    }

    fn close(a: Real, b: Real) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs())
    }

    proptest! {
        #[test]
        fn reduced_round_trip(v in 1e10f64..1e36) {
            let x = energy_density_from_reduced(energy_density_to_reduced(v, &C), &C);
            let y = pressure_from_reduced(pressure_to_reduced(v, &C), &C);
            prop_assert!(close(x, v));
            prop_assert!(close(y, v));
        }

        #[test]
        fn reduced_slope_is_unit_free(e in 1e13f64..1e16, p in 1e30f64..1e36) {
            // ε₀ cancels in P/ε
            let ratio = pressure_to_reduced(p, &C) / energy_density_to_reduced(e, &C);
            let expected = (p / 1.6022e33) / (e / 1.7827e12);
            prop_assert!(close(ratio, expected));
        }
    }
}
