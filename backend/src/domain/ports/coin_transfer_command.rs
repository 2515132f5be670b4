//! Driving port for sending coins.

use async_trait::async_trait;

use crate::domain::{Error, Username};

/// Command port backing `POST /api/sendCoin`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoinTransferCommand: Send + Sync {
    /// Send `amount` coins from `sender` to `receiver`.
    async fn send_coins(
        &self,
        sender: &Username,
        receiver: &Username,
        amount: i64,
    ) -> Result<(), Error>;
}
