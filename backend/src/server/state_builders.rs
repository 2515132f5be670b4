//! Wire Diesel stores and credential adapters into the HTTP port bundle.

use std::sync::Arc;

use actix_web::web;

use coinshop::domain::{AccountService, PurchaseService, TransferService, WalletService};
use coinshop::inbound::http::state::HttpState;
use coinshop::outbound::persistence::{
    DieselLedgerRepository, DieselUserRepository, DieselWalletRepository,
};

use super::ServerConfig;

/// Build the shared handler state. Every service shares the one pool.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let pool = config.db_pool.clone();
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let wallets = Arc::new(DieselWalletRepository::new(pool.clone()));
    let ledger =
        Arc::new(DieselLedgerRepository::new(pool).with_lock_timeout(config.lock_timeout));

    let accounts = AccountService::new(
        users.clone(),
        Arc::new(config.hasher.clone()),
        config.tokens.clone(),
        config.initial_coins,
    );
    let transfers = TransferService::new(ledger.clone(), config.transfer_policy.clone());
    let purchases = PurchaseService::new(ledger, config.transfer_policy.retry.clone());
    let wallet = WalletService::new(users, wallets);

    web::Data::new(HttpState {
        login: Arc::new(accounts),
        wallet: Arc::new(wallet),
        transfers: Arc::new(transfers),
        purchases: Arc::new(purchases),
        tokens: config.tokens.clone(),
    })
}
