// handlers/public/auth/login.rs - POST /login handler

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::services::{AuthError, Credentials};
use crate::state::AppState;

/// POST /login - Authenticate user and receive a JWT
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// Expected Output (200):
/// ```json
/// { "access_token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// Unknown user, wrong password, or a body without string `username` and
/// `password`: 401 `{"msg": "Credenciales invalidas"}`
pub async fn login_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<Json<Value>, ApiError> {
    let Some(credentials) = Credentials::from_json(&payload) else {
        return Err(AuthError::InvalidCredentials.into());
    };

    let token = state
        .auth
        .login(&credentials.username, &credentials.password)
        .await?;
    Ok(Json(json!({ "access_token": token })))
}
