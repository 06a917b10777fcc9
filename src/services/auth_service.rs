use serde_json::Value;
use std::sync::Arc;

use crate::auth::{PasswordError, PasswordHasher, TokenError, TokenIssuer};
use crate::database::manager::DatabaseError;
use crate::database::repository::UserRepository;
use crate::error::ApiError;

pub const USER_EXISTS_MESSAGE: &str = "El usuario ya existe";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Credenciales invalidas";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User already exists: {0}")]
    UserExists(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserExists(_) => ApiError::conflict(USER_EXISTS_MESSAGE),
            AuthError::InvalidCredentials => ApiError::unauthorized(INVALID_CREDENTIALS_MESSAGE),
            AuthError::Database(e) => e.into(),
            AuthError::Password(e) => e.into(),
            AuthError::Token(e) => e.into(),
        }
    }
}

/// Username and password read by name from a request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// `None` unless `payload` is an object whose `username` and `password`
    /// are both strings
    pub fn from_json(payload: &Value) -> Option<Self> {
        let object = payload.as_object()?;
        let username = object.get("username")?.as_str()?;
        let password = object.get("password")?.as_str()?;
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Registration and login against a [`UserRepository`]
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: PasswordHasher,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: PasswordHasher, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Create a user unless the username is already taken
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if self.users.find_by_username(username).await?.is_some() {
            tracing::info!("Registration refused, username '{}' already exists", username);
            return Err(AuthError::UserExists(username.to_string()));
        }

        let password_hash = self.passwords.hash(password).await?;
        match self.users.create(username, &password_hash).await {
            Ok(user) => {
                tracing::info!("Registered user '{}' (id {})", user.username, user.id);
                Ok(())
            }
            // Lost a race with a concurrent registration of the same name
            Err(DatabaseError::UniqueViolation(_)) => Err(AuthError::UserExists(username.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Check credentials and issue an access token for the username
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            tracing::warn!("Login failed for unknown user '{}'", username);
            return Err(AuthError::InvalidCredentials);
        };

        if !self.passwords.verify(password, &user.password).await? {
            tracing::warn!("Login failed for '{}': wrong password", username);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.username)?;
        tracing::info!("Issued access token for '{}'", user.username);
        Ok(token)
    }
}
