//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::CredentialHash;
use crate::domain::ports::{CredentialError, PasswordHasher};

/// Argon2id hasher producing PHC strings (`$argon2id$v=19$...`).
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2PasswordHasher {
    /// Hasher with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn engine(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, CredentialError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, CredentialError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| CredentialError::hashing(err.to_string()))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<CredentialHash, CredentialError> {
        let engine = self.engine();
        let password = Zeroizing::new(password.to_owned());
        run_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            engine
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| CredentialHash::new(hash.to_string()))
                .map_err(|err| CredentialError::hashing(err.to_string()))
        })
        .await
    }

    async fn verify(
        &self,
        password: &str,
        hash: &CredentialHash,
    ) -> Result<bool, CredentialError> {
        let engine = self.engine();
        let password = Zeroizing::new(password.to_owned());
        let stored = hash.as_str().to_owned();
        run_blocking(move || {
            let parsed = PasswordHash::new(&stored)
                .map_err(|err| CredentialError::malformed_hash(err.to_string()))?;
            match engine.verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(err) => Err(CredentialError::hashing(err.to_string())),
            }
        })
        .await
    }
}
