//! PostgreSQL ledger stores built on Diesel, `diesel-async` and bb8.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain types. Balance rules that need row locks live in the SQL
//!   transaction; everything else stays in the domain services.
//! - **Internal models**: `models.rs` and `schema.rs` never leave this
//!   module.
//! - **Typed errors**: every Diesel and pool failure becomes a
//!   [`LedgerError`](crate::domain::ports::LedgerError) classified as
//!   conflict, transient or fatal.
//!
//! ```ignore
//! use coinshop::outbound::persistence::{DbPool, DieselLedgerRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/coinshop")).await?;
//! let ledger = DieselLedgerRepository::new(pool).with_lock_timeout(Duration::from_secs(2));
//! ```

mod diesel_error_mapping;
mod diesel_ledger_repository;
mod diesel_user_repository;
mod diesel_wallet_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_ledger_repository::DieselLedgerRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_wallet_repository::DieselWalletRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations, run_migrations_async};
pub use pool::{DbPool, PoolConfig, PoolError};
