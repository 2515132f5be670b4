//! PostgreSQL-backed [`LedgerRepository`].
//!
//! Transfers and purchases each run in one transaction that starts with
//! `SET LOCAL lock_timeout`, row-locks every account it touches with
//! `SELECT ... FOR UPDATE`, checks balances against the locked values and
//! only then writes. Accounts are always locked in primary-key order, so two
//! reciprocal transfers queue on the same row instead of deadlocking.

use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_query;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{LedgerError, LedgerRepository};
use crate::domain::{CoinAmount, Username};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AccountBalanceRow, MerchItemRow, NewCoinTransactionRow, NewInventoryRow};
use super::pool::DbPool;
use super::schema::{coin_transactions, merch_items, user_inventory, users};

/// Why a ledger transaction did not commit.
#[derive(Debug)]
enum TransactionFailure {
    /// A business rule rejected the operation.
    Rejected(LedgerError),
    Database(DieselError),
}

impl From<DieselError> for TransactionFailure {
    fn from(value: DieselError) -> Self {
        Self::Database(value)
    }
}

impl From<LedgerError> for TransactionFailure {
    fn from(value: LedgerError) -> Self {
        Self::Rejected(value)
    }
}

fn map_transaction_failure(failure: TransactionFailure) -> LedgerError {
    match failure {
        TransactionFailure::Rejected(error) => error,
        TransactionFailure::Database(error) => map_diesel_error(error),
    }
}

/// Diesel adapter for balance-mutating ledger operations.
#[derive(Clone)]
pub struct DieselLedgerRepository {
    pool: DbPool,
    lock_timeout: Duration,
}

impl DieselLedgerRepository {
    /// Default bound on how long a transaction waits for a row lock.
    pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a repository using [`Self::DEFAULT_LOCK_TIMEOUT`].
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/coinshop")).await?;
    /// let ledger = DieselLedgerRepository::new(pool)
    ///     .with_lock_timeout(Duration::from_millis(500));
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            lock_timeout: Self::DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Override the per-transaction lock wait. Sub-millisecond values are
    /// raised to one millisecond; Postgres treats zero as "wait forever".
    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout.max(Duration::from_millis(1));
        self
    }
}

async fn set_lock_timeout(
    conn: &mut AsyncPgConnection,
    lock_timeout: Duration,
) -> Result<(), DieselError> {
    sql_query(format!(
        "SET LOCAL lock_timeout = '{}ms'",
        lock_timeout.as_millis()
    ))
    .execute(conn)
    .await?;
    Ok(())
}

async fn adjust_balance(
    conn: &mut AsyncPgConnection,
    user_id: i64,
    delta: i64,
) -> Result<(), DieselError> {
    diesel::update(users::table.filter(users::id.eq(user_id)))
        .set(users::coins.eq(users::coins + delta))
        .execute(conn)
        .await?;
    Ok(())
}

fn find_locked<'a>(rows: &'a [AccountBalanceRow], name: &str) -> Option<&'a AccountBalanceRow> {
    rows.iter().find(|row| row.username == name)
}

#[async_trait]
impl LedgerRepository for DieselLedgerRepository {
    async fn transfer_coins(
        &self,
        sender: &Username,
        receiver: &Username,
        amount: CoinAmount,
    ) -> Result<(), LedgerError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let lock_timeout = self.lock_timeout;
        let sender = sender.as_str();
        let receiver = receiver.as_str();
        let amount = amount.get();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                set_lock_timeout(conn, lock_timeout).await?;

                let locked = users::table
                    .filter(users::username.eq_any(vec![sender, receiver]))
                    .order(users::id.asc())
                    .select(AccountBalanceRow::as_select())
                    .for_update()
                    .load(conn)
                    .await?;

                let from = find_locked(&locked, sender)
                    .ok_or_else(|| LedgerError::user_not_found(sender))?;
                if from.coins < amount {
                    return Err(LedgerError::insufficient_coins(from.coins, amount).into());
                }
                let to = find_locked(&locked, receiver)
                    .ok_or_else(|| LedgerError::user_not_found(receiver))?;

                if from.id != to.id {
                    adjust_balance(conn, from.id, -amount).await?;
                    adjust_balance(conn, to.id, amount).await?;
                }

                diesel::insert_into(coin_transactions::table)
                    .values(&NewCoinTransactionRow {
                        sender_id: from.id,
                        receiver_id: to.id,
                        amount,
                    })
                    .execute(conn)
                    .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_transaction_failure)?;

        debug!(sender, receiver, amount, "transfer committed");
        Ok(())
    }

    async fn purchase_item(&self, buyer: &Username, item: &str) -> Result<(), LedgerError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let lock_timeout = self.lock_timeout;
        let buyer = buyer.as_str();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                set_lock_timeout(conn, lock_timeout).await?;

                let merch = merch_items::table
                    .filter(merch_items::name.eq(item))
                    .select(MerchItemRow::as_select())
                    .first(conn)
                    .await
                    .optional()?
                    .ok_or_else(|| LedgerError::item_not_found(item))?;

                let account = users::table
                    .filter(users::username.eq(buyer))
                    .select(AccountBalanceRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?
                    .ok_or_else(|| LedgerError::user_not_found(buyer))?;

                if account.coins < merch.price {
                    return Err(LedgerError::insufficient_coins(account.coins, merch.price).into());
                }

                adjust_balance(conn, account.id, -merch.price).await?;

                diesel::insert_into(user_inventory::table)
                    .values(&NewInventoryRow {
                        user_id: account.id,
                        item_id: merch.id,
                        quantity: 1,
                    })
                    .on_conflict((user_inventory::user_id, user_inventory::item_id))
                    .do_update()
                    .set(user_inventory::quantity.eq(user_inventory::quantity + 1_i64))
                    .execute(conn)
                    .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_transaction_failure)?;

        debug!(buyer, item, "purchase committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(id: i64, username: &str, coins: i64) -> AccountBalanceRow {
        AccountBalanceRow {
            id,
            username: username.to_owned(),
            coins,
        }
    }

    #[rstest]
    fn find_locked_matches_by_username() {
        let rows = vec![row(1, "bob", 10), row(7, "alice", 900)];

        assert_eq!(find_locked(&rows, "alice").map(|r| r.id), Some(7));
        assert!(find_locked(&rows, "carol").is_none());
    }

    #[rstest]
    fn rejected_transactions_keep_their_business_error() {
        let failure = TransactionFailure::from(LedgerError::insufficient_coins(5, 80));

        assert_eq!(
            map_transaction_failure(failure),
            LedgerError::insufficient_coins(5, 80)
        );
    }

    #[rstest]
    fn database_failures_go_through_diesel_mapping() {
        let failure = TransactionFailure::from(DieselError::DatabaseError(
            diesel::result::DatabaseErrorKind::Unknown,
            Box::new("deadlock detected".to_owned()),
        ));

        assert!(map_transaction_failure(failure).is_retryable());
    }
}
