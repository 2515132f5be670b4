//! Port abstraction for read-only wallet views.
use async_trait::async_trait;

use crate::domain::{CoinHistory, InventoryItem, UserId};

use super::LedgerError;

/// Inventory and history reads. Never locks rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// Items the user owns with a positive quantity, in catalog order.
    async fn inventory(&self, user_id: UserId) -> Result<Vec<InventoryItem>, LedgerError>;

    /// Received and sent transfers, oldest first.
    async fn coin_history(&self, user_id: UserId) -> Result<CoinHistory, LedgerError>;
}
