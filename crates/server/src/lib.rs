//! healthcare-server library crate
//!
//! Exposes `build_app`, the upstream clients and `config` for integration
//! tests. The actual binary entrypoint is in `main.rs`.

pub mod ai;
pub mod config;
mod error;
pub mod identity;
pub mod location;
mod middleware;
pub mod places;
mod routes;
pub mod session;
pub mod state;

use axum::{Extension, Router, middleware as axum_mw, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use state::AppState;

pub use error::APOLOGY;
pub use routes::chat::DOCTOR_SEARCH_UNAVAILABLE;

/// Build the full application router from configuration.
pub fn build_app(config: &Config) -> Router {
    router(AppState::from_config(config), config)
}

/// Build the router around prepared state.
///
/// Split from `build_app` so tests can inject stub providers and point the
/// clients at mock servers without binding to a TCP port.
pub fn router(state: AppState, config: &Config) -> Router {
    let rate_limiter = middleware::create_rate_limiter(config.rate_limit_rps);

    // Chat routes are rate limited; upstream calls cost money
    let chat_routes = routes::chat_routes()
        .layer(axum_mw::from_fn(middleware::rate_limit_middleware))
        .layer(Extension(rate_limiter));

    // Install Prometheus metrics recorder.
    // Use build_recorder() + set_global_recorder() so that repeated calls
    // (e.g. in integration tests) don't panic; the second install is
    // ignored and we still get a valid handle for /metrics.
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let prometheus_handle = recorder.handle();
    let _ = metrics::set_global_recorder(recorder);

    let public_routes = Router::new()
        .route("/", get(routes::root::get))
        .route("/health", get(routes::health::check))
        .route("/metrics", get(routes::metrics::get))
        .layer(Extension(prometheus_handle));

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(public_routes)
        .merge(chat_routes)
        .with_state(state)
        .layer(axum_mw::from_fn(middleware::client_ip_middleware))
        .layer(axum_mw::from_fn(middleware::metrics_middleware))
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
