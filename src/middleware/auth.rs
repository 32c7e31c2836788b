//! Credential gate middleware.
//!
//! Adapts [`CredentialGate`] to the axum request pipeline. The gate is applied
//! as an outer layer, so it runs once per request before routing:
//! 1. Evaluate the request's path and `X-User-Token` header
//! 2. On [`Verdict::Forward`], pass the request on unchanged
//! 3. On [`Verdict::Reject`], answer `401` with `WWW-Authenticate: Basic`
//!    and never call the next stage

use std::sync::Arc;

use crate::gate::{CredentialGate, Verdict};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Credential gate middleware function.
///
/// # Arguments
///
/// * `State(gate)` - Shared, immutable gate
/// * `request` - Incoming HTTP request
/// * `next` - Next middleware/handler in the chain
pub async fn credential_gate(
    State(gate): State<Arc<CredentialGate>>,
    request: Request,
    next: Next,
) -> Response {
    match gate.evaluate(&request) {
        Verdict::Forward => next.run(request).await,
        Verdict::Reject(challenge) => challenge.into_response(),
    }
}
