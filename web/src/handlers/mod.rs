//! HTTP request handlers.
//!
//! Handlers are generic over the four storage providers and registered
//! with explicit type parameters in [`crate::router`]. Each handler
//! runs every precondition check before its first write, so a rejected
//! request leaves all collections unmodified.

pub mod auth;
pub mod health;
pub mod history;
pub mod lifecycle;
pub mod listings;
pub mod profile;
pub mod reviews;

/// Treat blank payment handles the way the wire format does: an empty
/// or whitespace string means "not provided".
pub(crate) fn normalize_handle(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
