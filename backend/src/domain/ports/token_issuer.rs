//! Port abstraction for bearer token issuance and resolution.
use crate::domain::{AuthToken, Username};

use super::define_port_error;

define_port_error! {
    /// Failures raised by token adapters.
    pub enum TokenError {
        /// The token is malformed, has a bad signature or names no valid user.
        Invalid { message: String } => "invalid bearer token: {message}",
        /// The token's expiry has passed.
        Expired => "bearer token expired",
        /// A token could not be produced.
        Encoding { message: String } => "failed to issue bearer token: {message}",
    }
}

/// Issue bearer tokens and resolve them back to a username.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a token whose subject is `username`.
    fn issue(&self, username: &Username) -> Result<AuthToken, TokenError>;

    /// Validate `token` and return the username it was issued for.
    fn resolve(&self, token: &str) -> Result<Username, TokenError>;
}
