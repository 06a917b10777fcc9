use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::memory::MemoryStore;
use crate::database::models::{Contact, ContactPatch, NewContact, User};

/// CRUD access to the `contacts` table
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// All contacts in insertion order
    async fn list(&self) -> Result<Vec<Contact>, DatabaseError>;

    async fn find(&self, id: i32) -> Result<Option<Contact>, DatabaseError>;

    async fn create(&self, contact: NewContact) -> Result<Contact, DatabaseError>;

    /// Returns `None` when no contact has this id
    async fn update(&self, id: i32, patch: ContactPatch) -> Result<Option<Contact>, DatabaseError>;

    /// Returns `false` when no contact has this id
    async fn delete(&self, id: i32) -> Result<bool, DatabaseError>;
}

/// Lookup and insert against the `users` table
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    /// Fails with [`DatabaseError::UniqueViolation`] if the username is taken
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// The repositories a running server needs, backed by one store
#[derive(Clone)]
pub struct Repositories {
    pub contacts: Arc<dyn ContactRepository>,
    pub users: Arc<dyn UserRepository>,
    pub health: Arc<dyn HealthCheck>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_store(Arc::new(PgStore::new(pool)))
    }

    pub fn memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }

    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: ContactRepository + UserRepository + HealthCheck + 'static,
    {
        Self {
            contacts: store.clone(),
            users: store.clone(),
            health: store,
        }
    }
}

/// PostgreSQL-backed store. Every write is a single auto-committed statement.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgStore {
    async fn list(&self) -> Result<Vec<Contact>, DatabaseError> {
        let rows = sqlx::query_as::<_, Contact>(
            "SELECT id, name, email, phone FROM contacts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find(&self, id: i32) -> Result<Option<Contact>, DatabaseError> {
        let row = sqlx::query_as::<_, Contact>(
            "SELECT id, name, email, phone FROM contacts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, contact: NewContact) -> Result<Contact, DatabaseError> {
        let row = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (name, email, phone)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, phone
            "#,
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i32, patch: ContactPatch) -> Result<Option<Contact>, DatabaseError> {
        let row = sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone)
            WHERE id = $1
            RETURNING id, name, email, phone
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_insert(e, "username"))
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
