use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{extract_bearer_token, Claims};
use crate::error::ApiError;
use crate::state::AppState;

const MISSING_HEADER: &str = "Missing Authorization Header";
const BAD_HEADER: &str = "Bad Authorization header. Expected 'Authorization: Bearer <JWT>'";

/// Authenticated user context extracted from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
        }
    }
}

/// Rejects the request with 401 unless it carries a valid, unexpired bearer
/// token; otherwise injects [`AuthUser`] and runs the handler.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized(MISSING_HEADER))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::unauthorized(BAD_HEADER))?;

    let token = extract_bearer_token(value).ok_or_else(|| ApiError::unauthorized(BAD_HEADER))?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}
