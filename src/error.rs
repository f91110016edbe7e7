//! Error types for the preset store and alert sinks

use std::path::PathBuf;
use thiserror::Error;

/// Failure persisting a preset
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("failed to write preset to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove preset at {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize preset: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("preset store lock poisoned")]
    Poisoned,
}

/// Failure sounding the low-time alert
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("alert output unavailable: {0}")]
    Output(#[from] std::io::Error),
}
