// handlers/public/contacts/update.rs - PUT /contacts/:id handler

use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::extract::{parse_json, ContactId};
use crate::state::AppState;

/// PUT /contacts/:id - partial update
///
/// Only `name`, `email` and `phone` keys present in the body are written;
/// a null value leaves the column as it was. Unlike create, lengths and
/// email syntax are not checked.
///
/// The id is resolved before the body is read, so an unknown id is a 404
/// whatever the body holds.
pub async fn contact_put(
    State(state): State<AppState>,
    ContactId(id): ContactId,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    state.contacts.get_contact(id).await?;

    let payload = parse_json(&body)?;
    let contact = state.contacts.update_contact(id, &payload).await?;

    Ok(Json(json!({
        "message": "Contacto actualizado con exito",
        "contact": contact,
    })))
}
