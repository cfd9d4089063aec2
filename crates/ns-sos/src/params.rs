//! Parameters of the speed-of-sound family.

use ns_core::Real;
use serde::{Deserialize, Serialize};

/// `(a1, …, a6)`: Gaussian amplitude, centre and width, logistic centre and
/// steepness, and the low-density baseline `a6`.
///
/// `a6` is derived from the other five by the boundary-matching condition;
/// see [`crate::SpeedOfSoundEos::cal_a6`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SosParams {
    pub a1: Real,
    pub a2: Real,
    pub a3: Real,
    pub a4: Real,
    pub a5: Real,
    pub a6: Real,
}

impl SosParams {
    pub fn from_array(a: [Real; 6]) -> Self {
        let [a1, a2, a3, a4, a5, a6] = a;
        Self {
            a1,
            a2,
            a3,
            a4,
            a5,
            a6,
        }
    }

    pub fn to_array(&self) -> [Real; 6] {
        [self.a1, self.a2, self.a3, self.a4, self.a5, self.a6]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

/// Affine map of one unit-cube coordinate onto `[lo, hi]`.
pub fn uniform_prior(lo: Real, hi: Real, r: Real) -> Real {
    lo + (hi - lo) * r
}

/// Prior bounds applied by [`crate::SpeedOfSoundEos::gen_a`].
pub mod bounds {
    use ns_core::Real;

    pub const A1: (Real, Real) = (0.1, 1.5);
    pub const A2: (Real, Real) = (1.5, 12.0);
    /// Fractions of `a2`.
    pub const A3_OVER_A2: (Real, Real) = (0.05, 2.0);
    pub const A4: (Real, Real) = (1.5, 37.0);
    pub const A5: (Real, Real) = (0.1, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prior_endpoints() {
        assert_eq!(uniform_prior(1.5, 12.0, 0.0), 1.5);
        assert_eq!(uniform_prior(1.5, 12.0, 1.0), 12.0);
        assert_eq!(uniform_prior(0.0, 2.0, 0.25), 0.5);
    }

    #[test]
    fn array_round_trip() {
        let a = [0.5, 3.0, 1.0, 10.0, 0.4, 0.05];
        assert_eq!(SosParams::from_array(a).to_array(), a);
    }
}
