pub mod list; // GET /contacts

pub use list::contacts_get;
