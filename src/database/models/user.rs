use sqlx::FromRow;

/// A registered user. `password` holds the argon2 PHC string, never plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
}
