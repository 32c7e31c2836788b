//! Product catalog HTTP handlers.
//!
//! - GET    /api/v1/catalog - List all products
//! - GET    /api/v1/catalog/{id} - Get product by ID
//! - GET    /api/v1/catalog/GetProductByCategory/{category} - Products in a category
//! - POST   /api/v1/catalog - Create product
//! - PUT    /api/v1/catalog - Update product
//! - DELETE /api/v1/catalog/{id} - Delete product

use crate::{error::AppError, models::product::Product, state::AppState};
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use uuid::Uuid;

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.products.list().await)
}

/// Get a single product.
///
/// # Response
///
/// - **Success (200 OK)**: the product
/// - **Error (404)**: no product with that ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    let product = state.products.get(id).await.ok_or_else(|| {
        tracing::error!(%id, "product not found");
        AppError::ProductNotFound
    })?;

    Ok(Json(product))
}

/// Products in a category. An empty category is reported as 404.
pub async fn get_products_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.products.by_category(&category).await;
    if products.is_empty() {
        tracing::error!(%category, "no products found for category");
        return Err(AppError::ProductNotFound);
    }

    Ok(Json(products))
}

/// Create a product.
///
/// # Response
///
/// - **Success (201 Created)**: the product, with `Location: /api/v1/catalog/{id}`
/// - **Error (400)**: empty name or category, or negative price
pub async fn create_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<impl IntoResponse, AppError> {
    validate(&product)?;

    let product = state.products.create(product).await;
    let location = format!("/api/v1/catalog/{}", product.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

/// Replace a product. Responds `true` if it existed.
pub async fn update_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<Json<bool>, AppError> {
    validate(&product)?;

    Ok(Json(state.products.update(product).await))
}

/// Delete a product. Responds `true` if it existed.
pub async fn delete_product(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<bool> {
    Json(state.products.delete(id).await)
}

fn validate(product: &Product) -> Result<(), AppError> {
    if product.name.trim().is_empty() {
        return Err(AppError::InvalidRequest("Product name is required".to_string()));
    }
    if product.category.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "Product category is required".to_string(),
        ));
    }
    if product.price_cents < 0 {
        return Err(AppError::InvalidRequest(
            "Price must not be negative".to_string(),
        ));
    }
    Ok(())
}
