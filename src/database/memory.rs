//! In-process store used by the test suite and by `contacts-api --memory`.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Contact, ContactPatch, NewContact, User};
use crate::database::repository::{ContactRepository, HealthCheck, UserRepository};

#[derive(Default)]
struct Tables {
    contacts: BTreeMap<i32, Contact>,
    users: Vec<User>,
    next_contact_id: i32,
    next_user_id: i32,
}

/// Volatile store with the same id and uniqueness rules as the SQL schema
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn contact_count(&self) -> usize {
        self.tables.read().await.contacts.len()
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Contact>, DatabaseError> {
        Ok(self.tables.read().await.contacts.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Contact>, DatabaseError> {
        Ok(self.tables.read().await.contacts.get(&id).cloned())
    }

    async fn create(&self, contact: NewContact) -> Result<Contact, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.next_contact_id += 1;
        let stored = Contact {
            id: tables.next_contact_id,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
        };
        tables.contacts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i32, patch: ContactPatch) -> Result<Option<Contact>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.contacts.get_mut(&id).map(|contact| {
            patch.apply(contact);
            contact.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        Ok(self.tables.write().await.contacts.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == username) {
            return Err(DatabaseError::UniqueViolation("username".to_string()));
        }
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: username.to_string(),
            password: password_hash.to_string(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
