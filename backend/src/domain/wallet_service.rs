//! Read-side wallet assembly: balance, owned items and transfer history.
//!
//! Reads take no locks. A concurrent transfer may or may not be visible, but
//! rolled-back transfers never are because every query runs read-committed.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LedgerError, UserRepository, WalletQuery, WalletRepository};
use crate::domain::{CoinHistory, Error, InventoryItem, UserId, Username, WalletInfo};

/// Wallet service implementing [`WalletQuery`].
#[derive(Clone)]
pub struct WalletService<U, W> {
    users: Arc<U>,
    wallets: Arc<W>,
}

impl<U, W> WalletService<U, W> {
    /// Create a service over the account and wallet stores.
    pub const fn new(users: Arc<U>, wallets: Arc<W>) -> Self {
        Self { users, wallets }
    }
}

impl<U, W> WalletService<U, W>
where
    U: UserRepository,
    W: WalletRepository,
{
    /// Received and sent transfers, oldest first.
    pub async fn coin_history(&self, user_id: UserId) -> Result<CoinHistory, LedgerError> {
        self.wallets.coin_history(user_id).await
    }

    /// Items owned with a positive quantity.
    pub async fn inventory(&self, user_id: UserId) -> Result<Vec<InventoryItem>, LedgerError> {
        self.wallets.inventory(user_id).await
    }

    /// Balance, inventory and history of `username`.
    pub async fn wallet_info(&self, username: &Username) -> Result<WalletInfo, LedgerError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| LedgerError::user_not_found(username.as_str()))?;
        let inventory = self.inventory(user.id()).await?;
        let coin_history = self.coin_history(user.id()).await?;
        Ok(WalletInfo {
            coins: user.coins(),
            inventory,
            coin_history,
        })
    }
}

#[async_trait]
impl<U, W> WalletQuery for WalletService<U, W>
where
    U: UserRepository,
    W: WalletRepository,
{
    async fn wallet_info(&self, username: &Username) -> Result<WalletInfo, Error> {
        Self::wallet_info(self, username).await.map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockUserRepository, MockWalletRepository};
    use crate::domain::{CredentialHash, ErrorCode, ReceivedCoins, SentCoins, User};
    use rstest::rstest;

    fn alice() -> Username {
        Username::new("alice").expect("valid username")
    }

    #[rstest]
    #[tokio::test]
    async fn assembles_balance_inventory_and_history() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|name| {
            Ok(Some(User::new(
                UserId::new(3),
                name.clone(),
                CredentialHash::new("h"),
                720,
            )))
        });
        let mut wallets = MockWalletRepository::new();
        wallets
            .expect_inventory()
            .withf(|id| id.as_i64() == 3)
            .returning(|_| {
                Ok(vec![InventoryItem {
                    item_type: "t-shirt".to_owned(),
                    quantity: 1,
                }])
            });
        wallets.expect_coin_history().returning(|_| {
            Ok(CoinHistory {
                received: vec![ReceivedCoins {
                    from_user: "bob".to_owned(),
                    amount: 50,
                }],
                sent: vec![SentCoins {
                    to_user: "carol".to_owned(),
                    amount: 250,
                }],
            })
        });

        let service = WalletService::new(Arc::new(users), Arc::new(wallets));
        let info = service.wallet_info(&alice()).await.expect("wallet info");

        assert_eq!(info.coins, 720);
        assert_eq!(info.inventory.len(), 1);
        assert_eq!(info.coin_history.received.first().map(|r| r.amount), Some(50));
        assert_eq!(
            info.coin_history.sent.first().map(|s| s.to_user.as_str()),
            Some("carol")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_user_is_not_found_without_further_reads() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        let mut wallets = MockWalletRepository::new();
        wallets.expect_inventory().never();
        wallets.expect_coin_history().never();

        let service = WalletService::new(Arc::new(users), Arc::new(wallets));
        let error = WalletQuery::wallet_info(&service, &alice())
            .await
            .expect_err("missing user");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
