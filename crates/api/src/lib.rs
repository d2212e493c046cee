//! HTTP API server for the shop backend.
//!
//! Provides REST endpoints for registration, login, carts, orders, and the
//! catalog, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use store::ShopStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
pub use state::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// Routes that act on a user's data run behind the identity middleware;
/// registration, login, and the catalog do not.
pub fn create_app<S: ShopStore>(state: Arc<AppState<S>>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let authenticated = Router::new()
        .route("/api/user/id/{id}", get(routes::users::by_id::<S>))
        .route("/api/user/{username}", get(routes::users::by_username::<S>))
        .route("/api/cart/addToCart", post(routes::cart::add::<S>))
        .route("/api/cart/removeFromCart", post(routes::cart::remove::<S>))
        .route("/api/order/submit/{username}", post(routes::orders::submit::<S>))
        .route("/api/order/history/{username}", get(routes::orders::history::<S>))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::resolve_identity::<S>,
        ));

    Router::new()
        .route("/health", get(routes::health::check::<S>))
        .route("/login", post(routes::users::login::<S>))
        .route("/api/user/create", post(routes::users::create::<S>))
        .route("/api/item", get(routes::items::list::<S>))
        .route("/api/item/{id}", get(routes::items::get::<S>))
        .route("/api/item/name/{name}", get(routes::items::by_name::<S>))
        .merge(authenticated)
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers([axum::http::header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state for `store` from the configured keys and
/// hashing cost.
pub fn create_state<S: ShopStore>(store: S, config: &Config) -> Arc<AppState<S>> {
    Arc::new(AppState::new(
        store,
        config.password_hasher(),
        config.token_keys(),
    ))
}
