// handlers/public/contacts/mod.rs - Unauthenticated contact handlers
pub mod create; // POST /contacts
pub mod delete; // DELETE /contacts/:id
pub mod show;   // GET /contacts/:id
pub mod update; // PUT /contacts/:id

pub use create::contact_post;
pub use delete::contact_delete;
pub use show::contact_get;
pub use update::contact_put;
