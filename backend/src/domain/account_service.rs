//! Account lookup, creation and the login use-case.
//!
//! Unknown usernames are registered on their first successful login with the
//! configured starting grant. Two concurrent first logins race on the store's
//! uniqueness constraint; the loser re-reads the winner's row and verifies
//! the password against it like any later login.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CredentialError, LedgerError, LoginService, PasswordHasher, TokenError, TokenIssuer,
    UserRepository,
};
use crate::domain::{AuthToken, CredentialHash, Error, LoginCredentials, User, Username};

/// Account service implementing [`LoginService`].
#[derive(Clone)]
pub struct AccountService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    initial_coins: i64,
}

impl<U, H, T> AccountService<U, H, T> {
    /// Create a service granting `initial_coins` to new accounts.
    pub const fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, initial_coins: i64) -> Self {
        Self {
            users,
            hasher,
            tokens,
            initial_coins,
        }
    }
}

impl<U, H, T> AccountService<U, H, T>
where
    U: UserRepository,
{
    /// Point lookup of an account.
    pub async fn get_user_by_username(&self, username: &Username) -> Result<User, LedgerError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| LedgerError::user_not_found(username.as_str()))
    }

    /// Insert an account with the starting grant.
    ///
    /// Fails with [`LedgerError::Conflict`] when the username exists.
    pub async fn create_user(
        &self,
        username: &Username,
        credential_hash: &CredentialHash,
    ) -> Result<User, LedgerError> {
        self.users
            .create(username, credential_hash, self.initial_coins)
            .await
    }
}

impl<U, H, T> AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = credentials.username();
        let hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(map_credential_error)?;

        match self.create_user(username, &hash).await {
            Ok(user) => {
                info!(
                    username = %username,
                    coins = user.coins(),
                    "registered account on first login"
                );
                Ok(user)
            }
            Err(LedgerError::Conflict { .. }) => {
                debug!(username = %username, "concurrent first login won the race; re-reading");
                let user = self.get_user_by_username(username).await?;
                self.verify(credentials, &user).await?;
                Ok(user)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn verify(&self, credentials: &LoginCredentials, user: &User) -> Result<(), Error> {
        let matches = self
            .hasher
            .verify(credentials.password(), user.credential_hash())
            .await
            .map_err(map_credential_error)?;
        if matches {
            Ok(())
        } else {
            debug!(username = %user.username(), "password mismatch");
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

fn map_credential_error(error: CredentialError) -> Error {
    Error::internal(format!("credential check failed: {error}"))
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(format!("token issuance failed: {error}"))
}

#[async_trait]
impl<U, H, T> LoginService for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error> {
        let username = credentials.username();
        match self.users.find_by_username(username).await? {
            Some(user) => self.verify(credentials, &user).await?,
            None => {
                self.register(credentials).await?;
            }
        }
        self.tokens.issue(username).map_err(map_token_error)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
