//! crates/contract_openapi/src/error.rs
//!
//! Defines the error type shared by every stage of document generation.

/// A generic error type for contract-to-document generation.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// Two routes share an operation identifier while uniqueness is enforced.
    #[error("Route '{id}' already defined under {existing}")]
    DuplicateOperationId { id: String, existing: String },

    /// A path + method pair was registered twice in the same registry.
    #[error("Operation {method} {path} is already registered")]
    DuplicateRoute { method: String, path: String },

    /// The rendered document could not be serialized to YAML.
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The rendered document could not be written to disk.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience type alias for `Result<T, ContractError>`.
pub type ContractResult<T> = Result<T, ContractError>;
