//! Port abstraction for account persistence.
use async_trait::async_trait;

use crate::domain::{CredentialHash, User, Username};

use super::LedgerError;

/// Account lookup and creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Point lookup by username. Takes no locks.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, LedgerError>;

    /// Insert a new account holding `initial_coins`.
    ///
    /// Returns [`LedgerError::Conflict`] when the username is already taken;
    /// the store's uniqueness constraint decides races between concurrent
    /// first logins.
    async fn create(
        &self,
        username: &Username,
        credential_hash: &CredentialHash,
        initial_coins: i64,
    ) -> Result<User, LedgerError>;
}
