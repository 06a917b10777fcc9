// handlers/protected/contacts/list.rs - GET /contacts handler

use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /contacts - every stored contact, in insertion order
pub async fn contacts_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let contacts = state.contacts.list_contacts().await?;
    tracing::debug!("User '{}' listed {} contacts", user.username, contacts.len());

    Ok(Json(json!({ "contacts": contacts })))
}
