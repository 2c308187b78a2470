use campus_core::ValidationError;
use campus_store::StoreError;
use thiserror::Error;

/// Errors returned by session operations.
#[derive(Error, Debug)]
pub enum AccessError {
    /// Unknown identity or wrong password. The two are not distinguished.
    #[error("invalid identity or password")]
    CredentialMismatch,
    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    /// Underlying store error (duplicate identity, missing account, I/O).
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AccessError {
    /// Returns true if registration failed because the identity is taken.
    pub fn is_duplicate_identity(&self) -> bool {
        matches!(self, AccessError::Store(StoreError::DuplicateIdentity(_)))
    }
}
