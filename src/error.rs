// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::{PasswordError, TokenError};
use crate::database::manager::DatabaseError;
use crate::validation::FieldErrors;

pub const NOT_FOUND_MESSAGE: &str = "No se encontró el recurso solicitado";
pub const UNHANDLED_MESSAGE: &str = "Ocurrió un error no controlado";

/// HTTP API error with appropriate status codes and client-facing bodies
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError(FieldErrors),
    Conflict(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound,

    // 500 Internal Server Error; the detail is logged, never sent
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::BadRequest(msg) => json!({ "error": msg }),
            ApiError::ValidationError(field_errors) => json!({ "errors": field_errors }),
            ApiError::Conflict(msg) => json!({ "message": msg }),
            ApiError::Unauthorized(msg) => json!({ "msg": msg }),
            ApiError::NotFound => json!({ "error": NOT_FOUND_MESSAGE }),
            ApiError::InternalServerError(_) => json!({ "error": UNHANDLED_MESSAGE }),
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<FieldErrors> for ApiError {
    fn from(field_errors: FieldErrors) -> Self {
        ApiError::ValidationError(field_errors)
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::internal_server_error(format!("database: {}", err))
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => ApiError::unauthorized("Token has expired"),
            TokenError::Invalid(_) => ApiError::unauthorized("Invalid token"),
            TokenError::Generation(msg) => ApiError::internal_server_error(msg),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::internal_server_error(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::InternalServerError(msg) => write!(f, "{}", msg),
            ApiError::ValidationError(errors) => write!(f, "validation failed for {:?}", errors.keys()),
            ApiError::NotFound => write!(f, "{}", NOT_FOUND_MESSAGE),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::InternalServerError(detail) = &self {
            tracing::error!("Unhandled error: {}", detail);
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_status_codes() {
        assert_eq!(ApiError::ValidationError(FieldErrors::new()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::conflict("dup").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized("no").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal_server_error("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let body = ApiError::from(DatabaseError::ConfigMissing("DATABASE_URL")).to_json();
        assert_eq!(body, json!({ "error": UNHANDLED_MESSAGE }));
    }

    #[test]
    fn token_errors_become_unauthorized() {
        let expired = ApiError::from(TokenError::Expired);
        assert_eq!(expired.to_json(), json!({ "msg": "Token has expired" }));

        let invalid = ApiError::from(TokenError::Invalid("InvalidSignature".into()));
        assert_eq!(invalid.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(invalid.to_json(), json!({ "msg": "Invalid token" }));
    }

    #[test]
    fn validation_body_is_field_keyed() {
        let mut errors = FieldErrors::new();
        errors.insert("email".into(), vec!["Not a valid email address.".into()]);
        assert_eq!(
            ApiError::from(errors).to_json(),
            json!({ "errors": { "email": ["Not a valid email address."] } })
        );
    }
}
