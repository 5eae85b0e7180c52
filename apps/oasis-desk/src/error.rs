//! # Desk Error Type
//!
//! Everything that can stop a front-desk command before it prints a result.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  settings.toml ── toml ──┐                                              │
//! │  OASIS_* env ────────────┼── ConfigurationError ──┐                     │
//! │  cabin/draft .json ─ serde_json ──────────────────┼──► DeskError ──►    │
//! │  oasis-core ── CoreError ─────────────────────────┘    stderr, exit 1   │
//! │                                                                         │
//! │  A rejected draft is NOT an error: it is printed and exits with 2.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use oasis_core::{ConfigurationError, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskError {
    /// Engine failure (configuration, bad range, bad date).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file is not the JSON the command expects.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The settings file is not valid TOML.
    #[error("Invalid settings file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A result could not be rendered.
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<ConfigurationError> for DeskError {
    fn from(err: ConfigurationError) -> Self {
        DeskError::Core(CoreError::Configuration(err))
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
