//! PostgreSQL-backed [`WalletRepository`].
//!
//! Plain read-committed selects; no row locks are taken, so wallet reads
//! never block transfers.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LedgerError, WalletRepository};
use crate::domain::{CoinHistory, InventoryItem, ReceivedCoins, SentCoins, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::{coin_transactions, merch_items, user_inventory, users};

/// Diesel adapter for inventory and transfer history reads.
#[derive(Clone)]
pub struct DieselWalletRepository {
    pool: DbPool,
}

impl DieselWalletRepository {
    /// Create a read-only wallet repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WalletRepository for DieselWalletRepository {
    async fn inventory(&self, user_id: UserId) -> Result<Vec<InventoryItem>, LedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = user_id.as_i64();

        let rows: Vec<(String, Option<i64>)> = merch_items::table
            .left_join(
                user_inventory::table.on(user_inventory::item_id
                    .eq(merch_items::id)
                    .and(user_inventory::user_id.eq(owner))),
            )
            .select((merch_items::name, user_inventory::quantity.nullable()))
            .order(merch_items::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(item_type, quantity)| {
                let quantity = quantity.unwrap_or(0);
                (quantity > 0).then_some(InventoryItem {
                    item_type,
                    quantity,
                })
            })
            .collect())
    }

    async fn coin_history(&self, user_id: UserId) -> Result<CoinHistory, LedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = user_id.as_i64();

        let received: Vec<(String, i64)> = coin_transactions::table
            .inner_join(users::table.on(users::id.eq(coin_transactions::sender_id)))
            .filter(coin_transactions::receiver_id.eq(owner))
            .select((users::username, coin_transactions::amount))
            .order(coin_transactions::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let sent: Vec<(String, i64)> = coin_transactions::table
            .inner_join(users::table.on(users::id.eq(coin_transactions::receiver_id)))
            .filter(coin_transactions::sender_id.eq(owner))
            .select((users::username, coin_transactions::amount))
            .order(coin_transactions::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(CoinHistory {
            received: received
                .into_iter()
                .map(|(from_user, amount)| ReceivedCoins { from_user, amount })
                .collect(),
            sent: sent
                .into_iter()
                .map(|(to_user, amount)| SentCoins { to_user, amount })
                .collect(),
        })
    }
}
