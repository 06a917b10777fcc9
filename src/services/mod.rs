pub mod auth_service;
pub mod contact_service;

pub use auth_service::{AuthError, AuthService, Credentials};
pub use contact_service::{ContactError, ContactService};
