//! HTTP inbound adapter exposing the coin shop REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod schemas;
pub mod shop;
pub mod state;

pub use error::ApiResult;
