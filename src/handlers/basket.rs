//! Shopping cart HTTP handlers.
//!
//! - GET    /api/v1/basket/{user_name} - Get a user's cart (empty if none)
//! - POST   /api/v1/basket - Create or replace a cart
//! - DELETE /api/v1/basket?user_name=... - Delete a cart

use crate::{
    error::AppError,
    models::shopping_cart::{ShoppingCart, ShoppingCartResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DeleteBasketQuery {
    pub user_name: String,
}

pub async fn get_basket(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> Json<ShoppingCartResponse> {
    let cart = state
        .baskets
        .get(&user_name)
        .await
        .unwrap_or_else(|| ShoppingCart::new(user_name));

    Json(cart.into())
}

/// Create or replace the cart named by `user_name` in the body.
pub async fn update_basket(
    State(state): State<AppState>,
    Json(cart): Json<ShoppingCart>,
) -> Result<Json<ShoppingCartResponse>, AppError> {
    validate(&cart)?;

    Ok(Json(state.baskets.upsert(cart).await.into()))
}

pub async fn delete_basket(
    State(state): State<AppState>,
    Query(query): Query<DeleteBasketQuery>,
) -> StatusCode {
    state.baskets.delete(&query.user_name).await;
    StatusCode::OK
}

fn validate(cart: &ShoppingCart) -> Result<(), AppError> {
    if cart.user_name.trim().is_empty() {
        return Err(AppError::InvalidRequest("user_name is required".to_string()));
    }
    if cart.items.iter().any(|item| item.price_cents < 0) {
        return Err(AppError::InvalidRequest(
            "Price must not be negative".to_string(),
        ));
    }
    if cart.checked_total_price_cents().is_none() {
        return Err(AppError::InvalidRequest(
            "Cart total is out of range".to_string(),
        ));
    }
    Ok(())
}
