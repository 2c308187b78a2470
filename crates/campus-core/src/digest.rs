//! Salted one-way password digests.
//!
//! Digest formula: `hex(sha256(password || identity))`. The identity is the
//! per-account salt, so two accounts sharing a password get different
//! digests. The salt is public and does not slow down dictionary attacks.

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::identifiers::Identity;
use crate::validation::ValidationError;

/// Lowercase hex-encoded SHA-256 credential digest (64 characters).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Constructs a validated digest from its hex form.
    pub fn new(hex: impl Into<String>) -> Result<Self, ValidationError> {
        let hex = hex.into();
        let re = Regex::new(r"^[0-9a-f]{64}$").expect("invalid regex");
        if !re.is_match(&hex) {
            return Err(ValidationError::PatternMismatch {
                field: "credential_digest",
                value: hex,
            });
        }
        Ok(PasswordDigest(hex))
    }

    /// Wraps a digest literal known to be well-formed.
    pub(crate) fn trusted(hex: &str) -> Self {
        PasswordDigest(hex.to_string())
    }

    /// Hex form of the digest.
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Compares two digests without short-circuiting on the first differing byte.
    pub fn matches(&self, other: &PasswordDigest) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

// Digests stay out of logs and debug dumps.
impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Computes the credential digest for `password` salted with `identity`.
pub fn digest(password: &str, identity: &Identity) -> PasswordDigest {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(identity.as_str().as_bytes());
    PasswordDigest(hex::encode(hasher.finalize()))
}
