// handlers/public/contacts/show.rs - GET /contacts/:id handler

use axum::{extract::State, Json};

use crate::database::models::Contact;
use crate::error::ApiError;
use crate::extract::ContactId;
use crate::state::AppState;

/// GET /contacts/:id - show a single contact
pub async fn contact_get(
    State(state): State<AppState>,
    ContactId(id): ContactId,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.get_contact(id).await?))
}
