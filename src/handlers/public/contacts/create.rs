// handlers/public/contacts/create.rs - POST /contacts handler

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

/// POST /contacts - validate and store a new contact
///
/// The body is taken as raw JSON so that schema problems come back as a
/// field-keyed `{"errors": {...}}` map instead of a deserializer message.
pub async fn contact_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let contact = state.contacts.create_contact(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Contacto creado con exito",
            "contact": contact,
        })),
    ))
}
