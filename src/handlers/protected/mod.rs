// handlers/protected/mod.rs - Handlers behind `middleware::require_bearer`
//
// Every handler here may assume an `AuthUser` request extension.
pub mod contacts;
