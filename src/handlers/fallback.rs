use axum::response::{IntoResponse, Response};
use std::any::Any;

use crate::error::ApiError;

/// Any path that matches no route
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Turns a handler panic into the generic 500 body
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::internal_server_error(format!("handler panicked: {}", detail)).into_response()
}
