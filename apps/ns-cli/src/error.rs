//! Error type for the command-line front end.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read run file: {path}")]
    RunFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid run file: {0}")]
    Validation(String),

    #[error("RMF error: {0}")]
    Rmf(#[from] ns_rmf::RmfError),

    #[error("Speed-of-sound error: {0}")]
    Sos(#[from] ns_sos::SosError),

    #[error("Core error: {0}")]
    Core(#[from] ns_core::NsError),
}

pub type CliResult<T> = Result<T, CliError>;
