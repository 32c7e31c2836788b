//! Product repository.
//!
//! Holds the catalog in memory behind a `tokio` read-write lock. Reads run
//! concurrently; writes are exclusive for the duration of one map operation.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::product::Product;

#[derive(Debug, Default)]
pub struct ProductRepository {
    products: RwLock<HashMap<Uuid, Product>>,
}

impl ProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All products, ordered by name for stable output.
    pub async fn list(&self) -> Vec<Product> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub async fn get(&self, id: Uuid) -> Option<Product> {
        self.products.read().await.get(&id).cloned()
    }

    /// Products whose category equals `category` exactly.
    pub async fn by_category(&self, category: &str) -> Vec<Product> {
        self.list()
            .await
            .into_iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Insert a product, replacing any product with the same id.
    pub async fn create(&self, product: Product) -> Product {
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        product
    }

    /// Replace an existing product. Returns `false` if the id is unknown.
    pub async fn update(&self, product: Product) -> bool {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product;
                true
            }
            None => false,
        }
    }

    /// Returns `false` if the id is unknown.
    pub async fn delete(&self, id: Uuid) -> bool {
        self.products.write().await.remove(&id).is_some()
    }
}
