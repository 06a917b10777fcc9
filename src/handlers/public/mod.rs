// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition (/login, /register) and the contact routes that the
// service leaves open: create, show, update, delete.
pub mod auth;
pub mod contacts;
