//! Runtime settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `COINSHOP_*` environment variables over
//! configuration files. Optional fields fall back to the defaults below
//! through accessor methods.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::{RetryPolicy, TransferPolicy};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_INITIAL_COINS: i64 = 1000;
const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

/// Settings that are missing or unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("database URL is not configured; set COINSHOP_DATABASE_URL")]
    MissingDatabaseUrl,
    #[error("listen host is not an IP address: {0}")]
    InvalidHost(String),
    #[error("initial coin grant must not be negative, got {0}")]
    NegativeInitialCoins(i64),
}

/// Coin shop server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COINSHOP")]
pub struct ShopSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Listen IP address.
    pub host: Option<String>,
    /// Listen port.
    pub port: Option<u16>,
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// Permit an ephemeral random signing secret when none is configured.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Bearer token lifetime in seconds.
    pub token_ttl_secs: Option<u64>,
    /// Balance granted to an account on first login.
    pub initial_coins: Option<i64>,
    /// Let users send coins to themselves.
    #[ortho_config(default = false)]
    pub allow_self_transfer: bool,
    /// Row lock wait per ledger transaction, in milliseconds.
    pub lock_timeout_ms: Option<u64>,
    /// Attempts per transfer or purchase, including the first.
    pub transfer_max_attempts: Option<u32>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl ShopSettings {
    /// # Errors
    ///
    /// [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// # Errors
    ///
    /// [`SettingsError::InvalidHost`] when the host is not an IP literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw
                .parse::<IpAddr>()
                .map_err(|_| SettingsError::InvalidHost(raw.to_owned()))?,
            _ => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Configured signing secret, if any. Blank values count as unset.
    pub fn jwt_secret(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.jwt_secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
            .map(|secret| Zeroizing::new(secret.as_bytes().to_vec()))
    }

    /// Bearer token lifetime; 24 hours unless configured.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS))
    }

    /// # Errors
    ///
    /// [`SettingsError::NegativeInitialCoins`] for a negative grant.
    pub fn initial_coins(&self) -> Result<i64, SettingsError> {
        match self.initial_coins.unwrap_or(DEFAULT_INITIAL_COINS) {
            coins if coins < 0 => Err(SettingsError::NegativeInitialCoins(coins)),
            coins => Ok(coins),
        }
    }

    /// Row lock wait per ledger transaction; 5 seconds unless configured.
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms.unwrap_or(DEFAULT_LOCK_TIMEOUT_MS))
    }

    /// Default backoff with the configured attempt budget.
    pub fn retry_policy(&self) -> RetryPolicy {
        let policy = RetryPolicy::default();
        match self.transfer_max_attempts {
            Some(attempts) => policy.with_max_attempts(attempts),
            None => policy,
        }
    }

    /// Self-transfer rule plus [`Self::retry_policy`].
    pub fn transfer_policy(&self) -> TransferPolicy {
        TransferPolicy {
            allow_self_transfer: self.allow_self_transfer,
            retry: self.retry_policy(),
        }
    }

    /// # Errors
    ///
    /// As [`Self::database_url`].
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let config = PoolConfig::new(self.database_url()?);
        Ok(match self.pool_max_size {
            Some(size) => config.with_max_size(size),
            None => config,
        })
    }
}
