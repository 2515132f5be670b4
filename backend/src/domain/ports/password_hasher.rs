//! Port abstraction for password hashing.
use async_trait::async_trait;

use crate::domain::CredentialHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum CredentialError {
        /// Hashing or verification could not run.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hash and verify account passwords.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash of `password`.
    async fn hash(&self, password: &str) -> Result<CredentialHash, CredentialError>;

    /// Check `password` against a stored hash.
    async fn verify(&self, password: &str, hash: &CredentialHash)
    -> Result<bool, CredentialError>;
}
