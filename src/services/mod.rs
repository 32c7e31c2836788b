//! In-process repositories behind the catalog and basket endpoints.

/// Product catalog store
pub mod product_repository;
/// Shopping cart store
pub mod basket_repository;
