//! Review store trait.

use campus_market_core::error::Result;
use campus_market_core::ids::UserId;
use campus_market_core::review::Review;
use std::future::Future;

/// The Reviews collection. Append-only.
pub trait ReviewStore: Send + Sync {
    /// Insert a new review.
    ///
    /// Callers enforce one-review-per-transaction by checking
    /// [`Self::find_by_transaction`] first; the store itself holds no
    /// uniqueness constraint, so the lookup-then-insert race of the
    /// original remains possible and accepted.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    fn insert(&self, review: &Review) -> impl Future<Output = Result<()>> + Send;

    /// Look up the review tied to a transaction, if any.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    fn find_by_transaction(
        &self,
        transaction_id: &str,
    ) -> impl Future<Output = Result<Option<Review>>> + Send;

    /// All reviews for `seller`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    fn find_by_seller(&self, seller: UserId) -> impl Future<Output = Result<Vec<Review>>> + Send;

    /// Every review in the collection, for rating aggregation.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    fn all(&self) -> impl Future<Output = Result<Vec<Review>>> + Send;
}
