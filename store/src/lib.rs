//! Storage for Campus Market.
//!
//! The [`providers`] module defines the traits the web layer talks to:
//! document-style CRUD over the Users, Listings, and Reviews
//! collections plus the server-side session store. The [`memory`]
//! module implements them over in-process hash maps.
//!
//! Individual store operations are serialized behind a lock, but there
//! are no cross-collection transactions: a handler that reads a
//! listing, checks it, and writes it back can lose the race against a
//! concurrent writer, exactly as the document-store original could.

pub mod memory;
pub mod providers;

pub use memory::{MemoryListingStore, MemoryReviewStore, MemorySessionStore, MemoryUserStore};
pub use providers::{ListingStore, ReviewStore, SessionStore, UserStore};
