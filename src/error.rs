//! Error types and HTTP error response handling.
//!
//! Handler errors are converted into HTTP responses with a status code and a
//! JSON body. Credential failures are not represented here: the gate answers
//! those itself with a `401` challenge before any handler runs.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide handler error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Requested product does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Product not found")]
    ProductNotFound,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::ProductNotFound => {
                (StatusCode::NOT_FOUND, "product_not_found", self.to_string())
            }
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
