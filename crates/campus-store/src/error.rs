//! Error types for store operations.

use campus_core::{DependencyId, EventId, Identity, ValidationError};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization of a collection failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Persisted value could not be parsed.
    #[error("malformed data under key {key}: {reason}")]
    Malformed {
        /// Storage key holding the value.
        key: String,
        /// Parser message.
        reason: String,
    },
    /// Storage key contains characters the backend cannot map safely.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    /// An account with this identity already exists.
    #[error("identity already registered: {0}")]
    DuplicateIdentity(Identity),
    /// An organizational unit with this acronym already exists.
    #[error("dependency acronym already registered: {0}")]
    DuplicateDependency(String),
    /// No account with this identity.
    #[error("account not found: {0}")]
    AccountNotFound(Identity),
    /// No event with this id.
    #[error("event not found: {0}")]
    EventNotFound(EventId),
    /// No organizational unit with this id.
    #[error("dependency not found: {0}")]
    DependencyNotFound(DependencyId),
    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}
