//! Error types for energy ledger operations
//!
//! Reading and spending energy never fails; only building a ledger from a
//! bad configuration does.

use thiserror::Error;

/// Errors that can occur while setting up an energy ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnergyError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration is invalid
        reason: String,
    },

    /// Configuration could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EnergyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for energy operations
pub type EnergyResult<T> = Result<T, EnergyError>;
