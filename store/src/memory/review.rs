//! In-memory Reviews collection.

use crate::memory::lock_poisoned;
use crate::providers::ReviewStore;
use campus_market_core::error::Result;
use campus_market_core::ids::UserId;
use campus_market_core::review::Review;
use std::future::Future;
use std::sync::{Arc, RwLock};

/// In-memory review store. Insertion order is preserved so date ties
/// keep their natural storage order.
#[derive(Debug, Clone, Default)]
pub struct MemoryReviewStore {
    inner: Arc<RwLock<Vec<Review>>>,
}

impl MemoryReviewStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReviewStore for MemoryReviewStore {
    fn insert(&self, review: &Review) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let review = review.clone();

        async move {
            inner.write().map_err(|_| lock_poisoned())?.push(review);
            Ok(())
        }
    }

    fn find_by_transaction(
        &self,
        transaction_id: &str,
    ) -> impl Future<Output = Result<Option<Review>>> + Send {
        let inner = Arc::clone(&self.inner);
        let transaction_id = transaction_id.to_string();

        async move {
            Ok(inner
                .read()
                .map_err(|_| lock_poisoned())?
                .iter()
                .find(|r| r.transaction_id == transaction_id)
                .cloned())
        }
    }

    fn find_by_seller(&self, seller: UserId) -> impl Future<Output = Result<Vec<Review>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let mut reviews: Vec<Review> = inner
                .read()
                .map_err(|_| lock_poisoned())?
                .iter()
                .filter(|r| r.seller == seller)
                .cloned()
                .collect();
            // Stable sort: equal dates keep insertion order.
            reviews.sort_by_key(|r| std::cmp::Reverse(r.date));
            Ok(reviews)
        }
    }

    fn all(&self) -> impl Future<Output = Result<Vec<Review>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move { Ok(inner.read().map_err(|_| lock_poisoned())?.clone()) }
    }
}
