//! Domain primitives, ledger services and ports.
//!
//! Purpose: keep the ledger rules (positive amounts, self-transfer policy,
//! retry of transient failures, first-login registration) independent of
//! HTTP and Diesel. Inbound adapters call the driving ports; outbound
//! adapters implement the driven ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-neutral failure payload.
//! - User / Username / UserId / CredentialHash: account model.
//! - CoinAmount / WalletInfo / CoinHistory / InventoryItem: ledger views.
//! - AccountService, TransferService, PurchaseService, WalletService.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ledger;
pub mod ports;
pub mod purchase_service;
pub mod retry;
pub mod trace_id;
pub mod transfer_service;
pub mod user;
pub mod wallet_service;

pub use self::account_service::AccountService;
pub use self::auth::{AuthToken, LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ledger::{
    CoinAmount, CoinHistory, InventoryItem, ReceivedCoins, SentCoins, WalletInfo,
};
pub use self::purchase_service::PurchaseService;
pub use self::retry::RetryPolicy;
pub use self::trace_id::TraceId;
pub use self::transfer_service::{TransferPolicy, TransferService};
pub use self::user::{CredentialHash, User, UserId, Username, UsernameValidationError};
pub use self::wallet_service::WalletService;
