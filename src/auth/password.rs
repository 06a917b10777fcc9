//! Password hashing and verification (argon2id, random salt per user).

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Invalid argon2 parameters: {0}")]
    Params(String),

    #[error("Hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Cloneable argon2 hasher; all work runs on the blocking thread pool
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl PasswordHasher {
    /// Hasher with explicit cost parameters (memory in KiB, iterations, lanes)
    pub fn with_cost(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::Params(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Produce a PHC-format hash string for storage
    pub async fn hash(&self, plain: &str) -> Result<String, PasswordError> {
        let argon2 = self.argon2();
        let plain = plain.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(plain.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| PasswordError::Hash(e.to_string()))
        })
        .await?
    }

    /// `false` for a wrong password and for a stored value that is not a PHC hash
    pub async fn verify(&self, plain: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let argon2 = self.argon2();
        let plain = plain.to_owned();
        let stored_hash = stored_hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || match PasswordHash::new(&stored_hash) {
            Ok(parsed) => argon2.verify_password(plain.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        })
        .await?;
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::with_cost(1024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn hash_is_salted_and_verifies() {
        let hasher = cheap();
        let first = hasher.hash("hunter2").await.unwrap();
        let second = hasher.hash("hunter2").await.unwrap();

        assert_ne!(first, "hunter2");
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);

        assert!(hasher.verify("hunter2", &first).await.unwrap());
        assert!(!hasher.verify("hunter3", &first).await.unwrap());
    }

    #[tokio::test]
    async fn plaintext_stored_value_never_verifies() {
        assert!(!cheap().verify("hunter2", "hunter2").await.unwrap());
    }

    #[test]
    fn rejects_invalid_cost() {
        assert!(matches!(
            PasswordHasher::with_cost(0, 0, 0),
            Err(PasswordError::Params(_))
        ));
    }
}
