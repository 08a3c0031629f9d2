//! In-memory session store.

use crate::memory::lock_poisoned;
use crate::providers::SessionStore;
use campus_market_core::error::{MarketError, Result};
use campus_market_core::ids::SessionId;
use campus_market_core::session::Session;
use chrono::Utc;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

/// In-memory session store.
///
/// Expired sessions are removed lazily on lookup; there is no
/// background sweeper.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn create(&self, session: &Session) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let session = session.clone();

        async move {
            let mut map = inner.write().map_err(|_| lock_poisoned())?;
            if map.contains_key(&session.session_id) {
                return Err(MarketError::Storage(
                    "session ID already exists".to_string(),
                ));
            }
            map.insert(session.session_id, session);
            Ok(())
        }
    }

    fn get(&self, id: SessionId) -> impl Future<Output = Result<Option<Session>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let mut map = inner.write().map_err(|_| lock_poisoned())?;
            match map.get(&id) {
                Some(session) if session.is_expired(Utc::now()) => {
                    tracing::debug!(session_id = %id, "dropping expired session");
                    map.remove(&id);
                    Ok(None)
                }
                Some(session) => Ok(Some(session.clone())),
                None => Ok(None),
            }
        }
    }

    fn update(&self, session: &Session) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let session = session.clone();

        async move {
            let mut map = inner.write().map_err(|_| lock_poisoned())?;
            if !map.contains_key(&session.session_id) {
                return Err(MarketError::NotFound {
                    resource: "Session",
                });
            }
            map.insert(session.session_id, session);
            Ok(())
        }
    }

    fn delete(&self, id: SessionId) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            inner.write().map_err(|_| lock_poisoned())?.remove(&id);
            Ok(())
        }
    }
}
