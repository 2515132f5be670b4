//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`TokenIssuer`]) are
//! implemented by outbound adapters. Driving ports ([`LoginService`],
//! [`WalletQuery`], [`CoinTransferCommand`], [`PurchaseCommand`]) are
//! implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod coin_transfer_command;
mod ledger_error;
mod ledger_repository;
mod login_service;
mod password_hasher;
mod purchase_command;
mod token_issuer;
mod user_repository;
mod wallet_query;
mod wallet_repository;

pub use coin_transfer_command::CoinTransferCommand;
#[cfg(test)]
pub use coin_transfer_command::MockCoinTransferCommand;
pub use ledger_error::LedgerError;
pub use ledger_repository::LedgerRepository;
#[cfg(test)]
pub use ledger_repository::MockLedgerRepository;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{CredentialError, PasswordHasher};
#[cfg(test)]
pub use purchase_command::MockPurchaseCommand;
pub use purchase_command::PurchaseCommand;
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
#[cfg(test)]
pub use wallet_query::MockWalletQuery;
pub use wallet_query::WalletQuery;
#[cfg(test)]
pub use wallet_repository::MockWalletRepository;
pub use wallet_repository::WalletRepository;
