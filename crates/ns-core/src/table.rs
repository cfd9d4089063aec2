//! Energy-density / pressure tables exchanged between models and the
//! stellar-structure integrator.

use crate::error::{NsError, NsResult};
use crate::numeric::{Real, ensure_all_finite, is_non_decreasing};
use crate::units::{Density, Pressure, dyn_cm2, g_cm3};

/// Ordered (energy density [g cm⁻³], pressure [dyn cm⁻²]) pairs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EosTable {
    pub energy_density: Vec<Real>,
    pub pressure: Vec<Real>,
}

impl EosTable {
    /// Build a table, checking that both columns have the same length and
    /// hold only finite values.
    pub fn new(energy_density: Vec<Real>, pressure: Vec<Real>) -> NsResult<Self> {
        if energy_density.len() != pressure.len() {
            return Err(NsError::LengthMismatch {
                what: "pressure column",
                expected: energy_density.len(),
                got: pressure.len(),
            });
        }
        ensure_all_finite(&energy_density, "energy density")?;
        ensure_all_finite(&pressure, "pressure")?;
        Ok(Self {
            energy_density,
            pressure,
        })
    }

    pub fn len(&self) -> usize {
        self.energy_density.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy_density.is_empty()
    }

    /// Typed view of row `i`.
    pub fn point(&self, i: usize) -> Option<(Density, Pressure)> {
        let e = *self.energy_density.get(i)?;
        let p = *self.pressure.get(i)?;
        Some((g_cm3(e), dyn_cm2(p)))
    }

    /// Largest energy density in the table, `None` when empty.
    pub fn max_energy_density(&self) -> Option<Real> {
        self.energy_density.iter().copied().reduce(Real::max)
    }

    /// Both columns are non-decreasing.
    pub fn is_monotone(&self) -> bool {
        is_non_decreasing(&self.energy_density) && is_non_decreasing(&self.pressure)
    }
}
