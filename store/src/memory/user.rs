//! In-memory Users collection.

use crate::memory::lock_poisoned;
use crate::providers::UserStore;
use campus_market_core::error::{MarketError, Result};
use campus_market_core::ids::{ListingId, UserId};
use campus_market_core::user::{OrderRecord, PaymentRecord, User};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct UserMap {
    by_id: HashMap<UserId, User>,
    /// Secondary unique index: email -> id.
    by_email: HashMap<String, UserId>,
}

/// In-memory user store with a unique email index.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<RwLock<UserMap>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryUserStore {
    fn insert(&self, user: &User) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let user = user.clone();

        async move {
            let mut map = inner.write().map_err(|_| lock_poisoned())?;
            if map.by_email.contains_key(&user.email) {
                return Err(MarketError::conflict(
                    "An account with this email already exists.",
                ));
            }
            map.by_email.insert(user.email.clone(), user.id);
            map.by_id.insert(user.id, user);
            Ok(())
        }
    }

    fn get(&self, id: UserId) -> impl Future<Output = Result<User>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            inner
                .read()
                .map_err(|_| lock_poisoned())?
                .by_id
                .get(&id)
                .cloned()
                .ok_or(MarketError::NotFound { resource: "User" })
        }
    }

    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<Option<User>>> + Send {
        let inner = Arc::clone(&self.inner);
        let email = email.to_string();

        async move {
            let map = inner.read().map_err(|_| lock_poisoned())?;
            Ok(map
                .by_email
                .get(&email)
                .and_then(|id| map.by_id.get(id))
                .cloned())
        }
    }

    fn update(&self, user: &User) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let user = user.clone();

        async move {
            let mut map = inner.write().map_err(|_| lock_poisoned())?;
            let Some(existing) = map.by_id.get(&user.id).cloned() else {
                return Err(MarketError::NotFound { resource: "User" });
            };
            if existing.email != user.email {
                if map.by_email.contains_key(&user.email) {
                    return Err(MarketError::conflict(
                        "An account with this email already exists.",
                    ));
                }
                map.by_email.remove(&existing.email);
                map.by_email.insert(user.email.clone(), user.id);
            }
            map.by_id.insert(user.id, user);
            Ok(())
        }
    }

    fn push_order_record(
        &self,
        id: UserId,
        record: OrderRecord,
    ) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let mut map = inner.write().map_err(|_| lock_poisoned())?;
            let user = map
                .by_id
                .get_mut(&id)
                .ok_or(MarketError::NotFound { resource: "User" })?;
            user.order_history.push(record);
            Ok(())
        }
    }

    fn push_payment_record(
        &self,
        id: UserId,
        record: PaymentRecord,
    ) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let mut map = inner.write().map_err(|_| lock_poisoned())?;
            let user = map
                .by_id
                .get_mut(&id)
                .ok_or(MarketError::NotFound { resource: "User" })?;
            user.payment_history.push(record);
            Ok(())
        }
    }

    fn pull_payment_records(
        &self,
        listing_id: ListingId,
    ) -> impl Future<Output = Result<usize>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let mut map = inner.write().map_err(|_| lock_poisoned())?;
            let mut removed = 0;
            for user in map.by_id.values_mut() {
                let before = user.payment_history.len();
                user.payment_history
                    .retain(|record| record.listing_id != listing_id);
                removed += before - user.payment_history.len();
            }
            Ok(removed)
        }
    }
}
