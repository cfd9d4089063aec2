//! Parametric squared-sound-speed EOS.
//!
//! c²_s(x) is a Gaussian bump on top of a logistic step from a baseline
//! `a6` to the conformal value 1/3. Energy density `x` and pressure `y` are
//! in units of the saturation energy density ε₀, so dy/dx = c²_s.
//!
//! The model is appended to an outer EOS at `x_last`: `a6` is chosen so
//! that c²_s(x_last) equals the outer slope `dydx_last`, and the pressure
//! integral starts from `y_last`.

use crate::error::{SosError, SosResult};
use crate::integrate::cumulative_simpson;
use crate::params::{SosParams, bounds, uniform_prior};
use ns_core::{
    EosTable, PhysicsConstants, Real, energy_density_from_reduced, energy_density_to_reduced,
    linspace, pressure_from_reduced, pressure_to_reduced,
};
use serde::{Deserialize, Serialize};

/// Conformal limit of c²_s.
pub const CONFORMAL_CS2: Real = 1.0 / 3.0;
/// Upper bound on c²_s around saturation density.
pub const SATURATION_CS2_BOUND: Real = 0.163;
/// Samples per admissibility window.
pub const CHECK_SAMPLES: usize = 16;
/// Window around saturation density [ε₀].
pub const SATURATION_WINDOW: (Real, Real) = (0.5, 1.5);
/// Window at very high density [ε₀].
pub const HIGH_DENSITY_WINDOW: (Real, Real) = (49.0, 50.0);

/// Outcome of the admissibility checks, first failure wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Admissibility {
    Admissible,
    /// A parameter is NaN or infinite.
    NonFinite,
    /// Phase-transition exclusion is on and `a6 > 0`.
    PhaseTransition,
    /// c²_s exceeds 0.163 near saturation density.
    SaturationSoftness,
    /// `a6 > 1/3`.
    AsymptoticBound,
    /// c²_s exceeds 1/3 at very high density.
    HighDensityCausality,
}

/// Speed-of-sound EOS attached to an outer EOS at `(x_last, y_last)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedOfSoundEos {
    pub x_last: Real,
    pub y_last: Real,
    pub dydx_last: Real,
    #[serde(default)]
    pub enable_pt_check: bool,
}

fn gaussian(x: Real, a1: Real, a2: Real, a3: Real) -> Real {
    a1 * (-0.5 * ((x - a2) / a3).powi(2)).exp()
}

fn logistic(x: Real, a4: Real, a5: Real) -> Real {
    1.0 / (1.0 + (-a5 * (x - a4)).exp())
}

impl SpeedOfSoundEos {
    pub fn new(x_last: Real, y_last: Real, dydx_last: Real, enable_pt_check: bool) -> Self {
        Self {
            x_last,
            y_last,
            dydx_last,
            enable_pt_check,
        }
    }

    /// Boundary taken from the last two rows of a cgs table.
    pub fn from_outer_table(
        outer: &EosTable,
        enable_pt_check: bool,
        constants: &PhysicsConstants,
    ) -> SosResult<Self> {
        let n = outer.len();
        if n < 2 {
            return Err(SosError::InvalidBoundary {
                what: "need at least two rows",
            });
        }
        let x = |i: usize| energy_density_to_reduced(outer.energy_density[i], constants);
        let y = |i: usize| pressure_to_reduced(outer.pressure[i], constants);

        let dx = x(n - 1) - x(n - 2);
        if dx <= 0.0 {
            return Err(SosError::InvalidBoundary {
                what: "energy density must increase at the edge",
            });
        }
        let dydx = (y(n - 1) - y(n - 2)) / dx;
        Ok(Self::new(x(n - 1), y(n - 1), dydx, enable_pt_check))
    }

    /// c²_s(x), clipped to `[0, 1]`.
    pub fn cs2(&self, x: Real, a: &SosParams) -> Real {
        let ret = gaussian(x, a.a1, a.a2, a.a3)
            + a.a6
            + (CONFORMAL_CS2 - a.a6) * logistic(x, a.a4, a.a5);
        ret.clamp(0.0, 1.0)
    }

    /// The `a6` for which c²_s(x_last) equals `dydx_last`.
    ///
    /// c²_s(x_last) = A + B a6 with A the Gaussian plus the logistic part of
    /// the conformal term and B = 1 − logistic(x_last).
    pub fn cal_a6(&self, a1: Real, a2: Real, a3: Real, a4: Real, a5: Real) -> Real {
        let step = logistic(self.x_last, a4, a5);
        let a = gaussian(self.x_last, a1, a2, a3) + CONFORMAL_CS2 * step;
        let b = 1.0 - step;
        (self.dydx_last - a) / b
    }

    /// Map a point of the unit 5-cube to a full parameter set.
    pub fn gen_a(&self, cube: &[Real; 5]) -> SosResult<SosParams> {
        for (index, &value) in cube.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(SosError::CubeOutOfRange { index, value });
            }
        }

        let a1 = uniform_prior(bounds::A1.0, bounds::A1.1, cube[0]);
        let a2 = uniform_prior(bounds::A2.0, bounds::A2.1, cube[1]);
        let a3 = uniform_prior(
            bounds::A3_OVER_A2.0 * a2,
            bounds::A3_OVER_A2.1 * a2,
            cube[2],
        );
        let a4 = uniform_prior(bounds::A4.0, bounds::A4.1, cube[3]);
        let a5 = uniform_prior(bounds::A5.0, bounds::A5.1, cube[4]);
        let a6 = self.cal_a6(a1, a2, a3, a4, a5);

        Ok(SosParams {
            a1,
            a2,
            a3,
            a4,
            a5,
            a6,
        })
    }

    fn exceeds(&self, window: (Real, Real), bound: Real, a: &SosParams) -> bool {
        linspace(window.0, window.1, CHECK_SAMPLES)
            .into_iter()
            .any(|x| self.cs2(x, a) > bound)
    }

    /// Run the admissibility checks and name the first one that fails.
    pub fn classify_a(&self, a: &SosParams) -> Admissibility {
        if !a.is_finite() {
            return Admissibility::NonFinite;
        }
        if self.enable_pt_check && a.a6 > 0.0 {
            return Admissibility::PhaseTransition;
        }
        if self.exceeds(SATURATION_WINDOW, SATURATION_CS2_BOUND, a) {
            return Admissibility::SaturationSoftness;
        }
        if a.a6 > CONFORMAL_CS2 {
            return Admissibility::AsymptoticBound;
        }
        if self.exceeds(HIGH_DENSITY_WINDOW, CONFORMAL_CS2, a) {
            return Admissibility::HighDensityCausality;
        }
        Admissibility::Admissible
    }

    /// Necessary (not sufficient) physical admissibility of `a`.
    pub fn check_a(&self, a: &SosParams) -> bool {
        let verdict = self.classify_a(a);
        if verdict != Admissibility::Admissible {
            tracing::trace!(?verdict, "speed-of-sound parameters rejected");
        }
        verdict == Admissibility::Admissible
    }

    /// Pressure along `core_e` from dP/dε = c²_s, starting at `y_last`.
    pub fn cal_core_p(&self, core_e: &[Real], a: &SosParams) -> SosResult<Vec<Real>> {
        let cs2: Vec<Real> = core_e.iter().map(|&x| self.cs2(x, a)).collect();
        cumulative_simpson(&cs2, core_e, self.y_last)
    }

    /// Core table in cgs units on `points` evenly spaced energy densities
    /// from `x_last` to `x_end` [ε₀].
    pub fn core_table(
        &self,
        x_end: Real,
        points: usize,
        a: &SosParams,
        constants: &PhysicsConstants,
    ) -> SosResult<EosTable> {
        if x_end <= self.x_last || points < 2 {
            return Err(SosError::InvalidGrid {
                what: "core grid must extend past x_last with at least two points",
            });
        }
        let core_e = linspace(self.x_last, x_end, points);
        let core_p = self.cal_core_p(&core_e, a)?;
        let table = EosTable::new(
            core_e
                .iter()
                .map(|&x| energy_density_from_reduced(x, constants))
                .collect(),
            core_p
                .iter()
                .map(|&y| pressure_from_reduced(y, constants))
                .collect(),
        )?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn model() -> SpeedOfSoundEos {
        SpeedOfSoundEos::new(1.2, 0.01, 0.08, false)
    }

    #[test]
    fn conformal_limit_at_high_density() {
        let a = SosParams::from_array([0.0, 5.0, 1.0, 5.0, 1.0, 0.05]);
        assert!((model().cs2(200.0, &a) - CONFORMAL_CS2).abs() < 1e-12);
        // Far below the logistic centre the baseline dominates.
        assert!((model().cs2(-200.0, &a) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn clipped_to_unit_interval() {
        let m = model();
        let big = SosParams::from_array([5.0, 2.0, 1.0, 5.0, 1.0, 0.0]);
        assert_eq!(m.cs2(2.0, &big), 1.0);
        let negative = SosParams::from_array([0.0, 2.0, 1.0, 50.0, 1.0, -0.5]);
        assert_eq!(m.cs2(0.0, &negative), 0.0);
    }

    #[test]
    fn a6_matches_boundary_value() {
        let m = model();
        let a6 = m.cal_a6(0.5, 3.0, 1.0, 10.0, 0.4);
        let a = SosParams::from_array([0.5, 3.0, 1.0, 10.0, 0.4, a6]);
        assert!((m.cs2(m.x_last, &a) - m.dydx_last).abs() < 1e-12);
    }

    #[test]
    fn gen_a_respects_bounds() {
        let m = model();
        let lo = m.gen_a(&[0.0; 5]).unwrap();
        assert_eq!(lo.a1, 0.1);
        assert_eq!(lo.a2, 1.5);
        assert!((lo.a3 - 0.075).abs() < 1e-15);
        assert_eq!(lo.a4, 1.5);
        assert_eq!(lo.a5, 0.1);

        let hi = m.gen_a(&[1.0; 5]).unwrap();
        let expected = [1.5, 12.0, 24.0, 37.0, 1.0];
        for (got, want) in hi.to_array()[..5].iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} vs {want}");
        }
    }

    #[test]
    fn gen_a_rejects_points_outside_cube() {
        let err = model().gen_a(&[0.5, 0.5, 1.5, 0.5, 0.5]).unwrap_err();
        assert_eq!(
            err,
            SosError::CubeOutOfRange {
                index: 2,
                value: 1.5
            }
        );
        assert!(model().gen_a(&[Real::NAN, 0.5, 0.5, 0.5, 0.5]).is_err());
    }

    #[test]
    fn classification_order() {
        let m = SpeedOfSoundEos::new(1.2, 0.01, 0.08, true);
        // Positive baseline with the phase-transition check on
        let a = SosParams::from_array([0.1, 5.0, 1.0, 20.0, 0.5, 0.01]);
        assert_eq!(m.classify_a(&a), Admissibility::PhaseTransition);

        let m = model();
        // Stiff bump at saturation
        let a = SosParams::from_array([0.9, 1.0, 0.3, 20.0, 0.5, 0.0]);
        assert_eq!(m.classify_a(&a), Admissibility::SaturationSoftness);

        // Baseline above the conformal value, pulled down near saturation
        let a = SosParams::from_array([-0.3, 1.0, 10.0, 20.0, 0.5, 0.4]);
        assert_eq!(m.classify_a(&a), Admissibility::AsymptoticBound);

        // Bump sitting in the high-density window
        let a = SosParams::from_array([0.5, 49.5, 1.0, 20.0, 0.5, 0.0]);
        assert_eq!(m.classify_a(&a), Admissibility::HighDensityCausality);

        let a = SosParams::from_array([0.1, 5.0, 1.0, 20.0, 0.5, 0.05]);
        assert_eq!(m.classify_a(&a), Admissibility::Admissible);
        assert!(m.check_a(&a));

        let a = SosParams::from_array([0.1, 5.0, 1.0, 20.0, 0.5, Real::NAN]);
        assert_eq!(m.classify_a(&a), Admissibility::NonFinite);
        assert!(!m.check_a(&a));
    }

    #[test]
    fn core_pressure_starts_at_boundary() {
        let m = model();
        let a = m.gen_a(&[0.3, 0.4, 0.5, 0.6, 0.7]).unwrap();
        let grid = linspace(m.x_last, 40.0, 200);
        let p = m.cal_core_p(&grid, &a).unwrap();
        assert_eq!(p[0], m.y_last);
        assert!(p[p.len() - 1] > p[0]);
    }

    #[test]
    fn integrated_slope_matches_boundary() {
        let m = model();
        let a = m.gen_a(&[0.3, 0.4, 0.5, 0.6, 0.7]).unwrap();
        let h = 1e-4;
        let grid = linspace(m.x_last, m.x_last + 10.0 * h, 11);
        let p = m.cal_core_p(&grid, &a).unwrap();
        let slope = (p[1] - p[0]) / h;
        assert!((slope - m.dydx_last).abs() / m.dydx_last < 1e-4);
    }

    proptest! {
        #[test]
        fn cs2_is_clipped(
            x in -100.0f64..100.0,
            a1 in -5.0f64..5.0,
            a2 in -20.0f64..20.0,
            a3 in 0.01f64..20.0,
            a4 in -40.0f64..40.0,
            a5 in 0.0f64..5.0,
            a6 in -3.0f64..3.0,
        ) {
            let a = SosParams::from_array([a1, a2, a3, a4, a5, a6]);
            let v = model().cs2(x, &a);
            prop_assert!((0.0..=1.0).contains(&v));
        }

        #[test]
        fn large_baseline_always_rejected(
            cube in proptest::array::uniform5(0.0f64..=1.0),
            a6 in 0.3334f64..10.0,
        ) {
            let m = model();
            let mut a = m.gen_a(&cube).unwrap();
            a.a6 = a6;
            prop_assert!(!m.check_a(&a));
        }

        #[test]
        fn generated_a6_matches_slope(cube in proptest::array::uniform5(0.0f64..=1.0)) {
            let m = model();
            let a = m.gen_a(&cube).unwrap();
            let raw = gaussian(m.x_last, a.a1, a.a2, a.a3)
                + a.a6
                + (CONFORMAL_CS2 - a.a6) * logistic(m.x_last, a.a4, a.a5);
            prop_assert!((raw - m.dydx_last).abs() < 1e-9);
        }
    }
}
