//! Catalog product model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product listed in the catalog.
///
/// Prices are stored in cents to avoid floating-point rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Assigned on creation when the request omits it
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    pub name: String,

    pub category: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image_file: String,

    pub price_cents: i64,
}
