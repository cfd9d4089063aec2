//! ns-core: stable foundation for the neutron-star EOS workspace.
//!
//! Contains:
//! - constants (one immutable physics-constants value)
//! - units (natural, cgs and reduced conversions)
//! - numeric (Real + tolerances + float helpers)
//! - table (energy density / pressure tables)
//! - error (shared error types)

pub mod constants;
pub mod error;
pub mod numeric;
pub mod table;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use constants::PhysicsConstants;
pub use error::{NsError, NsResult};
pub use numeric::*;
pub use table::EosTable;
pub use units::*;
