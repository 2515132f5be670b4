//! Driving port for buying merch.

use async_trait::async_trait;

use crate::domain::{Error, Username};

/// Command port backing `GET /api/buy/{item}`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchaseCommand: Send + Sync {
    /// Buy one unit of `item` for `buyer`.
    async fn buy_item(&self, buyer: &Username, item: &str) -> Result<(), Error>;
}
