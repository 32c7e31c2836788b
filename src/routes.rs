//! Router construction.
//!
//! The credential gate wraps the whole router rather than individual routes,
//! so it runs before routing: unknown paths are challenged too, and exempt
//! paths reach the router (and its 404 fallback) without credentials.

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{gate::CredentialGate, handlers, middleware, state::AppState};

pub fn router(state: AppState, gate: Arc<CredentialGate>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Catalog routes
        .route(
            "/api/v1/catalog",
            get(handlers::catalog::list_products)
                .post(handlers::catalog::create_product)
                .put(handlers::catalog::update_product),
        )
        .route(
            "/api/v1/catalog/{id}",
            get(handlers::catalog::get_product).delete(handlers::catalog::delete_product),
        )
        .route(
            "/api/v1/catalog/GetProductByCategory/{category}",
            get(handlers::catalog::get_products_by_category),
        )
        // Basket routes
        .route(
            "/api/v1/basket",
            post(handlers::basket::update_basket).delete(handlers::basket::delete_basket),
        )
        .route(
            "/api/v1/basket/{user_name}",
            get(handlers::basket::get_basket),
        )
        .layer(axum_middleware::from_fn_with_state(
            gate,
            middleware::auth::credential_gate,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
