//! Shopping cart repository, keyed by user name.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::models::shopping_cart::ShoppingCart;

#[derive(Debug, Default)]
pub struct BasketRepository {
    carts: RwLock<HashMap<String, ShoppingCart>>,
}

impl BasketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_name: &str) -> Option<ShoppingCart> {
        self.carts.read().await.get(user_name).cloned()
    }

    /// Create or replace the cart for `cart.user_name`.
    pub async fn upsert(&self, cart: ShoppingCart) -> ShoppingCart {
        self.carts
            .write()
            .await
            .insert(cart.user_name.clone(), cart.clone());
        cart
    }

    /// Removing a cart that does not exist is not an error.
    pub async fn delete(&self, user_name: &str) {
        self.carts.write().await.remove(user_name);
    }
}
