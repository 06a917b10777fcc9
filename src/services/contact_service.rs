use serde_json::Value;
use std::sync::Arc;

use crate::database::manager::DatabaseError;
use crate::database::models::Contact;
use crate::database::repository::ContactRepository;
use crate::error::ApiError;
use crate::validation::{self, FieldErrors};

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("Contact not found: {0}")]
    NotFound(i32),
    #[error("Invalid contact payload")]
    Invalid(FieldErrors),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::NotFound(_) => ApiError::NotFound,
            ContactError::Invalid(field_errors) => ApiError::ValidationError(field_errors),
            ContactError::Database(e) => e.into(),
        }
    }
}

/// Contact use cases on top of a [`ContactRepository`]
#[derive(Clone)]
pub struct ContactService {
    contacts: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ContactError> {
        Ok(self.contacts.list().await?)
    }

    pub async fn get_contact(&self, id: i32) -> Result<Contact, ContactError> {
        self.contacts.find(id).await?.ok_or(ContactError::NotFound(id))
    }

    /// Validate the raw payload and insert it; nothing is written on failure
    pub async fn create_contact(&self, payload: &Value) -> Result<Contact, ContactError> {
        let new_contact = validation::validate_contact(payload).map_err(ContactError::Invalid)?;
        let contact = self.contacts.create(new_contact).await?;
        tracing::info!("Created contact {}", contact.id);
        Ok(contact)
    }

    /// Apply only the string fields present in `payload`. Lengths and email
    /// syntax are not re-validated.
    pub async fn update_contact(&self, id: i32, payload: &Value) -> Result<Contact, ContactError> {
        let patch = validation::validate_patch(payload).map_err(ContactError::Invalid)?;
        let contact = self
            .contacts
            .update(id, patch)
            .await?
            .ok_or(ContactError::NotFound(id))?;
        tracing::info!("Updated contact {}", id);
        Ok(contact)
    }

    pub async fn delete_contact(&self, id: i32) -> Result<(), ContactError> {
        if !self.contacts.delete(id).await? {
            return Err(ContactError::NotFound(id));
        }
        tracing::info!("Deleted contact {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use serde_json::json;

    fn service() -> (ContactService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ContactService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn invalid_payload_persists_nothing() {
        let (service, store) = service();
        let err = service
            .create_contact(&json!({ "name": "Ana", "email": "not-an-email", "phone": "555" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ContactError::Invalid(ref e) if e.contains_key("email")));
        assert_eq!(store.contact_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let (service, _) = service();
        assert!(matches!(service.get_contact(9).await, Err(ContactError::NotFound(9))));
        assert!(matches!(
            service.update_contact(9, &json!({})).await,
            Err(ContactError::NotFound(9))
        ));
        assert!(matches!(service.delete_contact(9).await, Err(ContactError::NotFound(9))));
    }

    #[tokio::test]
    async fn update_with_null_keeps_stored_value() {
        let (service, _) = service();
        let created = service
            .create_contact(&json!({ "name": "Ana", "email": "ana@example.com", "phone": "5550001111" }))
            .await
            .unwrap();

        let updated = service
            .update_contact(created.id, &json!({ "name": null, "phone": "555" }))
            .await
            .unwrap();
        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.phone, "555");
    }

    #[tokio::test]
    async fn create_then_fetch() {
        let (service, _) = service();
        let created = service
            .create_contact(&json!({ "name": "Ana", "email": "ana@example.com", "phone": "5550001111" }))
            .await
            .unwrap();
        assert_eq!(service.get_contact(created.id).await.unwrap(), created);
    }
}
