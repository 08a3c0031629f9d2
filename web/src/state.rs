//! Shared application state for web handlers.

use crate::config::AppConfig;
use campus_market_store::{ListingStore, ReviewStore, SessionStore, UserStore};
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// Generic over the four storage providers so handlers and tests can
/// run against any implementation. Stores are cheap to clone; the
/// configuration is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AppState<U, L, R, S> {
    /// User accounts.
    pub users: U,
    /// Listings.
    pub listings: L,
    /// Seller reviews.
    pub reviews: R,
    /// Login sessions.
    pub sessions: S,
    /// Service configuration.
    pub config: Arc<AppConfig>,
}

impl<U, L, R, S> AppState<U, L, R, S>
where
    U: UserStore,
    L: ListingStore,
    R: ReviewStore,
    S: SessionStore,
{
    /// Create application state from stores and configuration.
    pub fn new(users: U, listings: L, reviews: R, sessions: S, config: AppConfig) -> Self {
        Self {
            users,
            listings,
            reviews,
            sessions,
            config: Arc::new(config),
        }
    }
}
