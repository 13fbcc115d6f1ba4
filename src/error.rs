//! Custom error types for brewbundle.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrewfileError {
    #[error("Unsupported value kind in Brewfile option: {value}")]
    UnsupportedValueKind { value: String },

    #[error("Invalid restart_service value {value}: expected true, false or \"changed\"")]
    InvalidRestartService { value: String },

    #[error("Invalid Mac App Store id for '{name}': ids must be positive")]
    InvalidMasId { name: String },

    #[error("Unsupported config format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedConfigFormat { path: String },
}

pub type Result<T, E = BrewfileError> = std::result::Result<T, E>;
