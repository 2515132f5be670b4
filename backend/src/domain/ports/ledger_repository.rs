//! Port abstraction for balance-mutating ledger operations.
//!
//! Implementations must run each operation as one store transaction that
//! row-locks every account it debits or credits, so a failed call leaves no
//! trace.
use async_trait::async_trait;

use crate::domain::{CoinAmount, Username};

use super::LedgerError;

/// Atomic coin transfers and purchases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Move `amount` coins from `sender` to `receiver` and log the transfer.
    ///
    /// Errors are checked in this order: missing sender
    /// ([`LedgerError::UserNotFound`]), short balance
    /// ([`LedgerError::InsufficientCoins`]), missing receiver.
    /// When `sender == receiver` the transfer is logged without changing the
    /// balance.
    async fn transfer_coins(
        &self,
        sender: &Username,
        receiver: &Username,
        amount: CoinAmount,
    ) -> Result<(), LedgerError>;

    /// Debit the item price from `buyer` and add one unit to their inventory.
    async fn purchase_item(&self, buyer: &Username, item: &str) -> Result<(), LedgerError>;
}
