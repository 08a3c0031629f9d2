//! User store trait.

use campus_market_core::error::Result;
use campus_market_core::ids::{ListingId, UserId};
use campus_market_core::user::{OrderRecord, PaymentRecord, User};
use std::future::Future;

/// The Users collection.
///
/// Users are keyed by [`UserId`]; the email address is a secondary
/// unique index. No exposed operation deletes a user.
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns a conflict if the email is already registered, or a
    /// storage error if the write fails.
    fn insert(&self, user: &User) -> impl Future<Output = Result<()>> + Send;

    /// Fetch a user by id.
    ///
    /// # Errors
    ///
    /// Returns not-found if no such user exists.
    fn get(&self, id: UserId) -> impl Future<Output = Result<User>> + Send;

    /// Look up a user by email.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails; an unknown email is
    /// `Ok(None)`.
    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<Option<User>>> + Send;

    /// Replace a user record, keeping the email index in sync.
    ///
    /// # Errors
    ///
    /// Returns not-found if the user does not exist, or a conflict if
    /// the new email already belongs to another user.
    fn update(&self, user: &User) -> impl Future<Output = Result<()>> + Send;

    /// Append a completed sale to a seller's order history.
    ///
    /// # Errors
    ///
    /// Returns not-found if the user does not exist.
    fn push_order_record(
        &self,
        id: UserId,
        record: OrderRecord,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Append a completed payment to a buyer's payment history.
    ///
    /// # Errors
    ///
    /// Returns not-found if the user does not exist.
    fn push_payment_record(
        &self,
        id: UserId,
        record: PaymentRecord,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Remove every payment-history entry referencing `listing_id`
    /// from every user. Part of the listing deletion cascade.
    ///
    /// # Returns
    ///
    /// The number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    fn pull_payment_records(
        &self,
        listing_id: ListingId,
    ) -> impl Future<Output = Result<usize>> + Send;
}
