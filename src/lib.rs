//! CRM API Library
//!
//! Customers, products, orders and email campaign activities exposed over REST.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{
    http::{header, HeaderName, Method},
    response::Json,
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// Entity routes, one nest per capitalised entity segment
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/Customer", handlers::customers::customers_routes())
        .nest("/Product", handlers::products::products_routes())
        .nest("/Order", handlers::orders::orders_routes())
        .nest("/Activity", handlers::activities::activities_routes())
}

/// Complete application: entity routes, operational endpoints, docs and the HTTP middleware stack
pub fn app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let timeout = state.config.request_timeout();
    let health = health::health_routes(state.db.clone());

    let mut app = api_routes()
        .route("/status", get(api_status))
        .nest("/health", health)
        .with_state(state)
        .merge(openapi::swagger_ui())
        .layer(axum::middleware::from_fn(request_logging_middleware))
        .layer(crate::tracing::configure_http_tracing())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .layer(cors);

    if let Some(timeout) = timeout {
        app = app.layer(TimeoutLayer::new(timeout));
    }

    app
}

/// CORS for the configured front-end origin (`*` allows any)
pub fn cors_layer(config: &config::AppConfig) -> CorsLayer {
    let allow_origin = match config.frontend_origin_header() {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .expose_headers([
            header::LOCATION,
            HeaderName::from_static(middleware_helpers::request_id::REQUEST_ID_HEADER),
        ])
}

async fn api_status() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let git = option_env!("GIT_HASH").unwrap_or("unknown");
    let build_time = option_env!("BUILD_TIME").unwrap_or("unknown");
    Json(json!({
        "status": "ok",
        "version": version,
        "git": git,
        "build_time": build_time,
        "service": "crm-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// Request logging middleware
async fn request_logging_middleware(
    request: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    ::tracing::info!(method = %method, uri = %uri, "Incoming request");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    ::tracing::info!(
        method = %method,
        uri = %uri,
        status = status.as_u16(),
        elapsed_ms = duration.as_millis() as u64,
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(origin: &str) -> config::AppConfig {
        let mut cfg = config::AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            8080,
            "development".into(),
        );
        cfg.frontend_origin = origin.into();
        cfg
    }

    #[test]
    fn cors_layer_builds_for_exact_and_wildcard_origins() {
        let _ = cors_layer(&config("http://localhost:30754"));
        let _ = cors_layer(&config("*"));
    }

    #[tokio::test]
    async fn status_reports_service_name() {
        let Json(value) = api_status().await;
        assert_eq!(value["service"], "crm-api");
        assert_eq!(value["status"], "ok");
    }
}
