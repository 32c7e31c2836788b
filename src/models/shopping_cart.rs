//! Shopping cart model.
//!
//! A cart is keyed by the user name it belongs to. Carts that were never
//! stored are served as empty carts rather than 404s.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line in a shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingCartItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    pub price_cents: i64,
    #[serde(default)]
    pub color: Option<String>,
}

/// A user's shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingCart {
    pub user_name: String,

    #[serde(default)]
    pub items: Vec<ShoppingCartItem>,
}

impl ShoppingCart {
    /// An empty cart for `user_name`.
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            items: Vec::new(),
        }
    }

    /// Sum of price × quantity over all items, in cents, or `None` on overflow.
    pub fn checked_total_price_cents(&self) -> Option<i64> {
        self.items.iter().try_fold(0i64, |total, item| {
            item.price_cents
                .checked_mul(i64::from(item.quantity))
                .and_then(|line| total.checked_add(line))
        })
    }

    /// Like [`Self::checked_total_price_cents`], clamped to the `i64` range.
    pub fn total_price_cents(&self) -> i64 {
        self.items.iter().fold(0i64, |total, item| {
            total.saturating_add(item.price_cents.saturating_mul(i64::from(item.quantity)))
        })
    }
}

/// Response body for basket endpoints.
///
/// Same as [`ShoppingCart`] plus the computed total.
#[derive(Debug, Serialize)]
pub struct ShoppingCartResponse {
    pub user_name: String,
    pub items: Vec<ShoppingCartItem>,
    pub total_price_cents: i64,
}

impl From<ShoppingCart> for ShoppingCartResponse {
    fn from(cart: ShoppingCart) -> Self {
        let total_price_cents = cart.total_price_cents();
        Self {
            user_name: cart.user_name,
            items: cart.items,
            total_price_cents,
        }
    }
}
