//! In-memory store implementations.
//!
//! Each store wraps its collection in an `Arc<RwLock<..>>`, so clones
//! share the same data and individual operations are serialized, while
//! sequences of operations are not — matching the consistency model of
//! the document store this replaces.

mod listing;
mod review;
mod session;
mod user;

pub use listing::MemoryListingStore;
pub use review::MemoryReviewStore;
pub use session::MemorySessionStore;
pub use user::MemoryUserStore;

use campus_market_core::error::MarketError;

/// Error for a poisoned collection lock.
pub(crate) fn lock_poisoned() -> MarketError {
    MarketError::Storage("collection lock poisoned".to_string())
}
