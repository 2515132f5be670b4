//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::future::Future;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use coinshop::Trace;
#[cfg(debug_assertions)]
use coinshop::doc::ApiDoc;
use coinshop::inbound::http::error::{json_error_handler, path_error_handler};
use coinshop::inbound::http::health::{HealthState, live, ready};
use coinshop::inbound::http::shop::{auth, buy, info, send_coin};
use coinshop::inbound::http::state::HttpState;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api")
        .service(auth)
        .service(info)
        .service(send_coin)
        .service(buy);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    app
}

/// Bind the listener and build the Actix server.
///
/// Readiness is left to the caller, which marks it once start-up work such
/// as migrations has finished. Signal handling is disabled; pair the server
/// with [`drain_on`] so readiness drops before connections stop.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    Ok(server)
}

/// Wait for `signal`, withdraw readiness, then stop accepting connections and
/// let in-flight requests finish.
pub async fn drain_on<F>(signal: F, handle: ServerHandle, health_state: web::Data<HealthState>)
where
    F: Future<Output = ()>,
{
    signal.await;
    health_state.mark_draining();
    info!("shutdown requested; draining in-flight requests");
    handle.stop(true).await;
}
