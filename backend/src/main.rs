//! Coin shop entry-point: loads settings, migrates the schema, then serves
//! the REST API until a shutdown signal arrives, withdrawing readiness
//! before connections drain.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Report, Result, eyre};
use ortho_config::OrthoConfig;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use coinshop::config::ShopSettings;
use coinshop::inbound::http::health::HealthState;
use coinshop::outbound::credentials::JwtTokenIssuer;
use coinshop::outbound::persistence::{DbPool, run_migrations_async};
use server::{ServerConfig, create_server, drain_on};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

const EPHEMERAL_SECRET_LEN: usize = 32;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ShopSettings::load().map_err(|err| eyre!("failed to load coinshop settings: {err}"))?;
    let database_url = settings.database_url()?.to_owned();
    let bind_addr = settings.bind_addr()?;

    let applied = run_migrations_async(database_url)
        .await
        .wrap_err("failed to apply database migrations")?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(settings.pool_config()?)
        .await
        .map_err(|err| Report::new(err).wrap_err("failed to build database pool"))?;

    let tokens = JwtTokenIssuer::new(&signing_secret(&settings)?, settings.token_ttl());
    info!(key_fingerprint = tokens.key_fingerprint(), "token signing key loaded");

    let config = ServerConfig::new(bind_addr, pool, tokens)
        .with_initial_coins(settings.initial_coins()?)
        .with_transfer_policy(settings.transfer_policy())
        .with_lock_timeout(settings.lock_timeout());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    actix_web::rt::spawn(drain_on(
        shutdown_signal(),
        server.handle(),
        health_state.clone(),
    ));

    health_state.mark_ready();
    info!(%bind_addr, "coinshop listening");
    server.await.wrap_err("server terminated abnormally")?;
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM. If no handler can be installed
/// the server runs until killed.
async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let interrupt = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}

/// Configured signing secret, or a random one in development.
fn signing_secret(settings: &ShopSettings) -> Result<Zeroizing<Vec<u8>>> {
    if let Some(secret) = settings.jwt_secret() {
        return Ok(secret);
    }
    if !(cfg!(debug_assertions) || settings.allow_ephemeral_secret) {
        return Err(eyre!(
            "no JWT secret configured; set COINSHOP_JWT_SECRET or COINSHOP_ALLOW_EPHEMERAL_SECRET"
        ));
    }
    warn!("using temporary JWT signing secret (dev only); tokens die with the process");
    let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
    OsRng.fill_bytes(secret.as_mut_slice());
    Ok(secret)
}
