//! Session store trait.

use campus_market_core::error::Result;
use campus_market_core::ids::SessionId;
use campus_market_core::session::Session;
use std::future::Future;

/// Server-side session storage.
///
/// Sessions are ephemeral: they carry a TTL and an expired session
/// behaves exactly like a missing one.
pub trait SessionStore: Send + Sync {
    /// Create a session.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails or the session ID
    /// already exists.
    fn create(&self, session: &Session) -> impl Future<Output = Result<()>> + Send;

    /// Fetch a session by id. Expired sessions are dropped and
    /// reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    fn get(&self, id: SessionId) -> impl Future<Output = Result<Option<Session>>> + Send;

    /// Replace a session (e.g. to refresh the cached email after a
    /// profile update).
    ///
    /// # Errors
    ///
    /// Returns not-found if the session does not exist.
    fn update(&self, session: &Session) -> impl Future<Output = Result<()>> + Send;

    /// Destroy a session. Destroying an absent session is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    fn delete(&self, id: SessionId) -> impl Future<Output = Result<()>> + Send;
}
