// HTTP API Error Types
use axum::{http::header, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::config;

/// HTTP API error with appropriate status codes.
///
/// 401, 403 and 404 carry no response body: a missing record and a record
/// owned by someone else must be the same outward signal, and the denial
/// paths must not disclose anything about the target resource.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized,

    // 403 Forbidden
    Forbidden,

    // 404 Not Found (missing or not owned - indistinguishable)
    NotFound,

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized => "unauthorized",
            ApiError::Forbidden => "forbidden",
            ApiError::NotFound => "not found",
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body (only used for the enveloped statuses)
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.message(),
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden
    }

    pub fn not_found() -> Self {
        ApiError::NotFound
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<crate::database::store::StoreError> for ApiError {
    fn from(err: crate::database::store::StoreError) -> Self {
        match err {
            crate::database::store::StoreError::Unavailable(msg) => {
                tracing::error!("card store unavailable: {}", msg);
                ApiError::service_unavailable("storage temporarily unavailable")
            }
            crate::database::store::StoreError::Sqlx(sqlx_err) => {
                // Log the real error but return a generic message
                tracing::error!("card store query error: {}", sqlx_err);
                ApiError::internal_server_error("an error occurred while processing your request")
            }
        }
    }
}

impl From<crate::auth::directory::DirectoryError> for ApiError {
    fn from(err: crate::auth::directory::DirectoryError) -> Self {
        tracing::error!("identity lookup error: {}", err);
        ApiError::internal_server_error("an error occurred while processing your request")
    }
}

impl From<crate::paging::PageError> for ApiError {
    fn from(err: crate::paging::PageError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match self {
            ApiError::Unauthorized => {
                let challenge = format!("Basic realm=\"{}\"", config::config().security.basic_realm);
                (status, [(header::WWW_AUTHENTICATE, challenge)]).into_response()
            }
            ApiError::Forbidden | ApiError::NotFound => status.into_response(),
            _ => (status, Json(self.to_json())).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(ApiError::unauthorized().status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::forbidden().status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::bad_request("size").status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
