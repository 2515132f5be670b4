//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain types before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::LedgerError;
use crate::domain::{CredentialHash, User, UserId, Username};

use super::schema::{coin_transactions, merch_items, user_inventory, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub coins: i64,
    #[expect(dead_code, reason = "selected for parity with the table; unused by the API")]
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = LedgerError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(&row.username)
            .map_err(|err| LedgerError::fatal(format!("stored username is invalid: {err}")))?;
        Ok(Self::new(
            UserId::new(row.id),
            username,
            CredentialHash::new(row.password_hash),
            row.coins,
        ))
    }
}

/// Insert into `users`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub coins: i64,
}

/// Row read from `merch_items`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = merch_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MerchItemRow {
    pub id: i64,
    #[expect(dead_code, reason = "purchases look items up by name already")]
    pub name: String,
    pub price: i64,
}

/// Insert into `user_inventory`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_inventory)]
pub(crate) struct NewInventoryRow {
    pub user_id: i64,
    pub item_id: i64,
    pub quantity: i64,
}

/// Insert into `coin_transactions`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = coin_transactions)]
pub(crate) struct NewCoinTransactionRow {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub amount: i64,
}

/// Balance-only projection of `users`, read under `FOR UPDATE`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountBalanceRow {
    pub id: i64,
    pub username: String,
    pub coins: i64,
}
