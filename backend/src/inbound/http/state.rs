//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on domain
//! ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CoinTransferCommand, LoginService, PurchaseCommand, TokenIssuer, WalletQuery,
};

/// Port implementations used by the shop handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub wallet: Arc<dyn WalletQuery>,
    pub transfers: Arc<dyn CoinTransferCommand>,
    pub purchases: Arc<dyn PurchaseCommand>,
    /// Resolves bearer tokens for the [`BearerUser`](super::auth::BearerUser)
    /// extractor.
    pub tokens: Arc<dyn TokenIssuer>,
}
