//! Driving port for reading a user's wallet.

use async_trait::async_trait;

use crate::domain::{Error, Username, WalletInfo};

/// Query port backing `GET /api/info`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletQuery: Send + Sync {
    /// Balance, inventory and transfer history for `username`.
    async fn wallet_info(&self, username: &Username) -> Result<WalletInfo, Error>;
}
