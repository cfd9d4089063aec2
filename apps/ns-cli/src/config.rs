//! Run-file schema.
//!
//! ```yaml
//! version: 1
//! name: fsu2
//! crust:
//!   energy_density: [1.0e6, 1.0e10, 1.0e14]
//!   pressure: [1.0e22, 1.0e28, 1.0e32]
//! model:
//!   type: rmf
//!   theta: [2.5085, 3.96544, 3.86662, 10.3718, 13.5054, 14.3675, 0.015665, -0.00168, 0.024, 0.045]
//!   solver: levenberg_marquardt
//! ```

use crate::error::{CliError, CliResult};
use ns_core::EosTable;
use ns_rmf::{RmfParams, SweepOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunFile {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crust: Option<EosTable>,
    pub model: ModelDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelDef {
    Rmf {
        theta: Vec<f64>,
        #[serde(default)]
        solver: SolverKind,
        #[serde(default)]
        options: Option<SweepOptionsDef>,
    },
    SpeedOfSound {
        /// Matching point in units of ε₀. Taken from the crust edge when
        /// absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        boundary: Option<BoundaryDef>,
        cube: [f64; 5],
        #[serde(default)]
        pt_check: bool,
        #[serde(default = "default_x_end")]
        x_end: f64,
        #[serde(default = "default_points")]
        points: usize,
    },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    #[default]
    LevenbergMarquardt,
    Newton,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SweepOptionsDef {
    #[serde(default)]
    pub potentials_at: ns_rmf::PotentialsAt,
    #[serde(default = "default_strict_tail")]
    pub strict_tail: bool,
}

impl From<SweepOptionsDef> for SweepOptions {
    fn from(def: SweepOptionsDef) -> Self {
        SweepOptions {
            potentials_at: def.potentials_at,
            strict_tail: def.strict_tail,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundaryDef {
    pub x_last: f64,
    pub y_last: f64,
    pub dydx_last: f64,
}

fn default_x_end() -> f64 {
    50.0
}

fn default_points() -> usize {
    1000
}

fn default_strict_tail() -> bool {
    true
}

pub fn load_run_file(path: &Path) -> CliResult<RunFile> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::RunFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_run_file(&content)
}

pub fn parse_run_file(content: &str) -> CliResult<RunFile> {
    let run: RunFile = serde_yaml::from_str(content)?;
    validate_run_file(&run)?;
    Ok(run)
}

pub fn validate_run_file(run: &RunFile) -> CliResult<()> {
    if run.version != 1 {
        return Err(CliError::Validation(format!(
            "unsupported version {}",
            run.version
        )));
    }
    if let Some(crust) = &run.crust {
        // Deserialisation bypasses EosTable::new.
        EosTable::new(crust.energy_density.clone(), crust.pressure.clone())?;
        if crust.is_empty() {
            return Err(CliError::Validation("crust table is empty".into()));
        }
    }

    match &run.model {
        ModelDef::Rmf { theta, .. } => {
            if run.crust.is_none() {
                return Err(CliError::Validation(
                    "rmf model needs a crust table".into(),
                ));
            }
            RmfParams::from_slice(theta)?.validate()?;
        }
        ModelDef::SpeedOfSound {
            boundary,
            cube,
            x_end,
            points,
            ..
        } => {
            match (boundary, &run.crust) {
                (None, None) => {
                    return Err(CliError::Validation(
                        "speed_of_sound model needs a boundary or a crust table".into(),
                    ));
                }
                (None, Some(crust)) if crust.len() < 2 => {
                    return Err(CliError::Validation(
                        "crust edge needs at least two rows".into(),
                    ));
                }
                _ => {}
            }
            if let Some((i, v)) = cube
                .iter()
                .enumerate()
                .find(|(_, v)| !(0.0..=1.0).contains(*v))
            {
                return Err(CliError::Validation(format!(
                    "cube[{i}] = {v} is outside [0, 1]"
                )));
            }
            if !x_end.is_finite() || *points < 2 {
                return Err(CliError::Validation(
                    "x_end must be finite and points at least 2".into(),
                ));
            }
        }
    }
    Ok(())
}
