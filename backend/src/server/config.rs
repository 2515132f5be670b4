//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use coinshop::domain::TransferPolicy;
use coinshop::outbound::credentials::{Argon2PasswordHasher, JwtTokenIssuer};
use coinshop::outbound::persistence::{DbPool, DieselLedgerRepository};

/// Builder-style configuration for [`create_server`](super::create_server).
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) tokens: Arc<JwtTokenIssuer>,
    pub(crate) hasher: Argon2PasswordHasher,
    pub(crate) initial_coins: i64,
    pub(crate) transfer_policy: TransferPolicy,
    pub(crate) lock_timeout: Duration,
}

impl ServerConfig {
    /// Configuration with the default grant, policy and lock timeout.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, tokens: JwtTokenIssuer) -> Self {
        Self {
            bind_addr,
            db_pool,
            tokens: Arc::new(tokens),
            hasher: Argon2PasswordHasher::default(),
            initial_coins: 1000,
            transfer_policy: TransferPolicy::default(),
            lock_timeout: DieselLedgerRepository::DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Balance granted on first login.
    #[must_use]
    pub fn with_initial_coins(mut self, initial_coins: i64) -> Self {
        self.initial_coins = initial_coins;
        self
    }

    /// Self-transfer rule and retry budget for transfers and purchases.
    #[must_use]
    pub fn with_transfer_policy(mut self, policy: TransferPolicy) -> Self {
        self.transfer_policy = policy;
        self
    }

    /// Row lock wait per ledger transaction.
    #[must_use]
    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
