//! Driving port for the login use-case.
//!
//! Inbound adapters call it to exchange credentials for a bearer token
//! without knowing the backing infrastructure.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Authenticate, creating the account on first login, and issue a token.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error>;
}
