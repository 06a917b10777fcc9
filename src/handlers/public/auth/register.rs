// handlers/public/auth/register.rs - POST /register handler

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::services::Credentials;
use crate::state::AppState;

const BAD_BODY: &str = "Expected a JSON object with string 'username' and 'password'";

/// POST /register - Register new user account
///
/// No username format or password strength rules apply. A taken username
/// answers 400 `{"message": "El usuario ya existe"}`.
pub async fn register_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let credentials = Credentials::from_json(&payload).ok_or_else(|| ApiError::bad_request(BAD_BODY))?;

    state
        .auth
        .register(&credentials.username, &credentials.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registro exitoso" })),
    ))
}
