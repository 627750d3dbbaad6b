use std::time::Duration;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler;
use crate::middleware::cache_responses;
use crate::state::AppState;

/// Build the axum router with all tokenview endpoints.
///
/// Token routes are mounted under `config.route_prefix` and sit behind the
/// cache gate when caching is enabled; `/health` and `/info` are always at
/// the root and never cached.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let mut api = Router::new()
        .route("/tokens", get(handler::list_tokens))
        .route("/tokens/:ticker", get(handler::token_details))
        .route("/tokens/:ticker/holders", get(handler::token_holders))
        .route("/balances/:address", get(handler::address_balances));
    if let Some(gate) = state.gate.clone() {
        api = api.route_layer(from_fn_with_state(gate, cache_responses));
    }
    let api = api.with_state(state.clone());

    let service = Router::new()
        .route("/health", get(handler::health))
        .route("/info", get(handler::info))
        .with_state(state);

    let app = if config.route_prefix.is_empty() {
        service.merge(api)
    } else {
        service.nest(&config.route_prefix, api)
    };

    let app = app
        .fallback(handler::not_found)
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
