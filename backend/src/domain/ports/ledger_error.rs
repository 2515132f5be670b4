//! Typed failures shared by the ledger store ports and ledger services.

use serde_json::json;
use tracing::error;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Failures raised while reading or mutating the ledger.
    ///
    /// Every variant except `Transient` and `Fatal` is a business outcome:
    /// the enclosing store transaction was rolled back with no side effects.
    pub enum LedgerError {
        /// No account exists with the given username.
        UserNotFound { username: String } => "user not found: {username}",
        /// No catalog entry exists with the given name.
        ItemNotFound { item: String } => "merch item not found: {item}",
        /// The balance does not cover the requested debit.
        InsufficientCoins { available: i64, required: i64 } =>
            "insufficient coins: balance {available}, required {required}",
        /// Transfer amounts must be strictly positive.
        InvalidAmount { amount: i64 } => "amount must be positive, got {amount}",
        /// Sender and receiver are the same account and policy forbids it.
        SelfTransfer { username: String } => "cannot transfer coins to yourself: {username}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "ledger conflict: {message}",
        /// Deadlock, lock timeout, serialization failure or pool exhaustion.
        /// Safe to retry the whole operation.
        Transient { message: String } => "transient ledger store failure: {message}",
        /// Unrecoverable store failure such as a missing schema.
        Fatal { message: String } => "ledger store failure: {message}",
    }
}

impl LedgerError {
    /// Whether re-running the whole operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

impl From<LedgerError> for Error {
    fn from(value: LedgerError) -> Self {
        match value {
            LedgerError::UserNotFound { username } => {
                Self::not_found(format!("user {username} not found"))
                    .with_details(json!({ "code": "user_not_found", "username": username }))
            }
            LedgerError::ItemNotFound { item } => {
                Self::not_found(format!("merch item {item} not found"))
                    .with_details(json!({ "code": "item_not_found", "item": item }))
            }
            LedgerError::InsufficientCoins {
                available,
                required,
            } => Self::invalid_request("insufficient coins").with_details(json!({
                "code": "insufficient_coins",
                "balance": available,
                "required": required,
            })),
            LedgerError::InvalidAmount { amount } => {
                Self::invalid_request("amount must be a positive integer").with_details(json!({
                    "code": "invalid_amount",
                    "field": "amount",
                    "amount": amount,
                }))
            }
            LedgerError::SelfTransfer { .. } => {
                Self::invalid_request("cannot send coins to yourself").with_details(json!({
                    "code": "self_transfer",
                    "field": "toUser",
                }))
            }
            LedgerError::Conflict { message } => Self::conflict(message),
            LedgerError::Transient { .. } => {
                Self::service_unavailable("ledger is busy, retry the request")
            }
            LedgerError::Fatal { message } => {
                error!(%message, "ledger store failure");
                Self::internal(message)
            }
        }
    }
}
