//! Merch purchase use-case.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{LedgerError, LedgerRepository, PurchaseCommand};
use crate::domain::{Error, RetryPolicy, Username};

/// Purchase service implementing [`PurchaseCommand`].
#[derive(Clone)]
pub struct PurchaseService<L> {
    ledger: Arc<L>,
    retry: RetryPolicy,
}

impl<L> PurchaseService<L> {
    /// Create a service over a ledger store.
    pub const fn new(ledger: Arc<L>, retry: RetryPolicy) -> Self {
        Self { ledger, retry }
    }
}

impl<L> PurchaseService<L>
where
    L: LedgerRepository,
{
    /// Debit the price of `item` from `buyer` and add one unit to their
    /// inventory, atomically.
    pub async fn buy_item(&self, buyer: &Username, item: &str) -> Result<(), LedgerError> {
        if item.trim().is_empty() {
            return Err(LedgerError::item_not_found(item));
        }
        self.retry
            .run("buy_item", || self.ledger.purchase_item(buyer, item))
            .await?;
        info!(buyer = %buyer, item, "merch purchased");
        Ok(())
    }
}

#[async_trait]
impl<L> PurchaseCommand for PurchaseService<L>
where
    L: LedgerRepository,
{
    async fn buy_item(&self, buyer: &Username, item: &str) -> Result<(), Error> {
        Self::buy_item(self, buyer, item).await.map_err(Error::from)
    }
}
