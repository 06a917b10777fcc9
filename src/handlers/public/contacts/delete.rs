// handlers/public/contacts/delete.rs - DELETE /contacts/:id handler

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::extract::ContactId;
use crate::state::AppState;

/// DELETE /contacts/:id - hard delete; a second call on the same id is a 404
pub async fn contact_delete(
    State(state): State<AppState>,
    ContactId(id): ContactId,
) -> Result<Json<Value>, ApiError> {
    state.contacts.delete_contact(id).await?;
    Ok(Json(json!({ "message": "Contacto eliminado con exito" })))
}
