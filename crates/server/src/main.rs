use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    response::Response,
    routing::get,
    Router,
};
use interactors::in_process_interactors;
use shared::protocol::{HEALTH_ROUTE, STATE_ROUTE};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};

mod config;
mod controller;
mod logging;

use config::load_settings;
use controller::StateController;
use logging::{init_tracing, TracingLogger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    init_tracing(&settings.log_filter);

    let (update_state, get_state) = in_process_interactors(&settings.initial_state);
    let controller = StateController::new(
        update_state,
        get_state,
        Arc::new(TracingLogger::new("state_controller")),
    );
    let app = build_router(Arc::new(controller), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, initial_state = %settings.initial_state, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

fn build_router(controller: Arc<StateController>, max_body_bytes: usize) -> Router {
    Router::new()
        .route(HEALTH_ROUTE, get(healthz))
        .route(STATE_ROUTE, get(http_get_state).put(http_update_state))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(controller)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_get_state(State(controller): State<Arc<StateController>>) -> Response {
    controller.get().await
}

async fn http_update_state(
    State(controller): State<Arc<StateController>>,
    body: Bytes,
) -> Response {
    controller.update(&body).await
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
