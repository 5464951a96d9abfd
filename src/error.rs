//! Error types for snapshot loading and configuration
//!
//! The layout itself never fails; only reading input and settings can.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FamgraphError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot JSON could not be parsed
    #[error("Snapshot error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration YAML could not be parsed
    #[error("Config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration parsed but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type FamgraphResult<T> = Result<T, FamgraphError>;
