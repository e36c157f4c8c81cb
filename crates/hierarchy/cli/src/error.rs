//! CLI error types

use crate::config::ConfigError;
use crate::state::StateError;
use hierarchy_types::HierarchyError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Refused hierarchy operation; displays the reason string unchanged
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// State file error
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
