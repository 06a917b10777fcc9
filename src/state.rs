use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::database::repository::{HealthCheck, Repositories};
use crate::services::{AuthService, ContactService};

/// Everything a handler can reach, built once at start-up and cloned per request
#[derive(Clone)]
pub struct AppState {
    pub contacts: ContactService,
    pub auth: AuthService,
    pub tokens: Arc<TokenIssuer>,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    pub fn new(repositories: Repositories, tokens: Arc<TokenIssuer>, passwords: PasswordHasher) -> Self {
        Self {
            contacts: ContactService::new(repositories.contacts),
            auth: AuthService::new(repositories.users, passwords, tokens.clone()),
            tokens,
            health: repositories.health,
        }
    }
}
