//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::services::{basket_repository::BasketRepository, product_repository::ProductRepository};

#[derive(Debug, Clone)]
pub struct AppState {
    pub products: Arc<ProductRepository>,
    pub baskets: Arc<BasketRepository>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            products: Arc::new(ProductRepository::new()),
            baskets: Arc::new(BasketRepository::new()),
        }
    }
}
