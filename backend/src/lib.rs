//! Coin ledger and merch shop backend.
//!
//! - [`domain`]: ledger rules, services and ports.
//! - [`inbound`]: Actix HTTP adapter.
//! - [`outbound`]: PostgreSQL stores and credential adapters.
//! - [`config`]: layered runtime settings.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
