//! Ledger value types: transfer amounts, inventory and history views.

use super::ports::LedgerError;

/// Strictly positive number of coins moved by a transfer.
///
/// # Examples
/// ```
/// use coinshop::domain::CoinAmount;
///
/// assert_eq!(CoinAmount::new(200).map(CoinAmount::get), Ok(200));
/// assert!(CoinAmount::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CoinAmount(i64);

impl CoinAmount {
    /// Validate a raw amount.
    pub fn new(amount: i64) -> Result<Self, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::invalid_amount(amount));
        }
        Ok(Self(amount))
    }

    /// The amount as a signed integer, matching the store column type.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// One owned merch item and how many the user holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    /// Catalog name of the item.
    pub item_type: String,
    /// Number owned; always positive in reader output.
    pub quantity: i64,
}

/// Incoming transfer as seen by the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedCoins {
    /// Username of the sender.
    pub from_user: String,
    /// Coins received.
    pub amount: i64,
}

/// Outgoing transfer as seen by the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCoins {
    /// Username of the receiver.
    pub to_user: String,
    /// Coins sent.
    pub amount: i64,
}

/// A user's transfer history, oldest entry first in both lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinHistory {
    /// Transfers where the user was the receiver.
    pub received: Vec<ReceivedCoins>,
    /// Transfers where the user was the sender.
    pub sent: Vec<SentCoins>,
}

/// Balance, owned items and transfer history of one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletInfo {
    /// Current balance.
    pub coins: i64,
    /// Items with a positive quantity, in catalog order.
    pub inventory: Vec<InventoryItem>,
    /// Transfer history.
    pub coin_history: CoinHistory,
}
