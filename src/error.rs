//! Error types shared by the indentation core and its hosts

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Position;

/// Failure reported by a host when applying (or undoing) an edit batch.
///
/// A failed batch commits nothing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("edit rejected: {0}")]
    Rejected(String),

    #[error("invalid edit range {start:?}..{end:?}")]
    InvalidRange { start: Position, end: Position },

    #[error("edit cancelled by host")]
    Cancelled,
}

/// Failure loading or saving the indentation config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory available")]
    NoConfigDir,

    #[error("failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}
