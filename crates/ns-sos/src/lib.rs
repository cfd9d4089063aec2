//! Parametric speed-of-sound EOS for the high-density core.
//!
//! The squared sound speed is a Gaussian bump over a logistic step towards
//! the conformal limit. The model attaches to an outer EOS (a crust or a
//! low-density RMF table) by matching pressure and slope at the last outer
//! point, and integrates dP/dε = c²_s to build the core.
//!
//! Energy density and pressure are handled in units of ε₀ internally; see
//! [`ns_core::energy_density_to_reduced`].

pub mod error;
pub mod integrate;
pub mod model;
pub mod params;

pub use error::{SosError, SosResult};
pub use integrate::cumulative_simpson;
pub use model::{
    Admissibility, CHECK_SAMPLES, CONFORMAL_CS2, HIGH_DENSITY_WINDOW, SATURATION_CS2_BOUND,
    SATURATION_WINDOW, SpeedOfSoundEos,
};
pub use params::{SosParams, uniform_prior};
