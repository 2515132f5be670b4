//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL ledger stores on Diesel and bb8.
//! - **credentials**: Argon2id password hashing and HS256 bearer tokens.
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business rules.

pub mod credentials;
pub mod persistence;
