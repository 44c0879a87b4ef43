pub mod handlers;
pub mod openapi;
pub mod services;
pub mod state;
pub mod types;

use axum::{
    Router,
    body::Body,
    http::{Method, Request},
    middleware::{Next, from_fn},
    response::Response,
    routing::get,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

use anyhow::Context;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

/// Whole microseconds, saturating at `u64::MAX`
fn micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// Axum middleware: one access log line per request.
async fn access_log(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_us = micros(started.elapsed()),
        "request"
    );
    response
}

/// Build the complete router (routes, docs, fallback, middleware)
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Dishes (never deleted)
        .route(
            "/dishes",
            get(handlers::list_dishes).post(handlers::create_dish),
        )
        .route(
            "/dishes/{dish_id}",
            get(handlers::read_dish).put(handlers::update_dish),
        )
        // Orders
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/orders/{order_id}",
            get(handlers::read_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        // OpenAPI / Swagger UI
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .fallback(handlers::path_not_found)
        .with_state(state)
        .layer(from_fn(access_log))
        .layer(cors)
}

/// Resolves on Ctrl-C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, draining connections"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}

/// Start HTTP Gateway server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.with_context(|| {
        format!(
            "Failed to bind to {} (port {} may already be in use)",
            addr, port
        )
    })?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Gateway stopped");
    Ok(())
}
