//! services/api/src/error.rs
//!
//! Defines the primary error type for starting the API service.

use crate::config::ConfigError;
use contract_openapi::ContractError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a failure while generating or persisting the OpenAPI document.
    #[error("OpenAPI generation error: {0}")]
    Contract(#[from] ContractError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
