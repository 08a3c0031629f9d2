//! Server-side session records.

use crate::ids::{SessionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A server-side session, addressed by the opaque cookie value.
///
/// Holds the authenticated user's identity for the duration of their
/// browser session. The cached email is refreshed when the profile
/// email changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque identifier, carried in the session cookie.
    pub session_id: SessionId,
    /// The authenticated user.
    pub user_id: UserId,
    /// The user's email at login (or after a profile update).
    pub email: String,
    /// When the session was established.
    pub created_at: DateTime<Utc>,
    /// When the session stops being honored.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for `user_id` expiring after `ttl`.
    #[must_use]
    pub fn new(user_id: UserId, email: String, now: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        Self {
            session_id: SessionId::new(),
            user_id,
            email,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Whether the session has expired as of `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
