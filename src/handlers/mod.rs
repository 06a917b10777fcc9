// handlers/mod.rs - Handler tiers
//
// Public (no auth) and Protected (bearer token required). Only the contact
// listing sits in the protected tier; the other contact routes are public.
pub mod fallback;
pub mod health;
pub mod protected;
pub mod public;
