//! Data models exchanged by the catalog and basket endpoints.

/// Catalog product model
pub mod product;
/// Shopping cart model
pub mod shopping_cart;
