//! HTTP request handlers (route handlers).
//!
//! Handlers only run for requests the credential gate has forwarded.

/// Shopping cart endpoints
pub mod basket;
/// Product catalog endpoints
pub mod catalog;
/// Service health endpoint
pub mod health;
