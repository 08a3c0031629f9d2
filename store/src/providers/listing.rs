//! Listing store trait.

use campus_market_core::error::Result;
use campus_market_core::ids::{ListingId, UserId};
use campus_market_core::listing::Listing;
use std::future::Future;

/// The Listings collection.
///
/// The listing record is the single source of truth for reservation
/// state; the cart and inbound-reservation queries below are the
/// derived views the original kept as denormalized copies.
pub trait ListingStore: Send + Sync {
    /// Insert a new listing.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    fn insert(&self, listing: &Listing) -> impl Future<Output = Result<()>> + Send;

    /// Fetch a listing by id.
    ///
    /// # Errors
    ///
    /// Returns not-found if no such listing exists.
    fn get(&self, id: ListingId) -> impl Future<Output = Result<Listing>> + Send;

    /// Replace an existing listing.
    ///
    /// # Errors
    ///
    /// Returns not-found if the listing does not exist.
    fn save(&self, listing: &Listing) -> impl Future<Output = Result<()>> + Send;

    /// Delete a listing. Deleting an absent listing is not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    fn delete(&self, id: ListingId) -> impl Future<Output = Result<()>> + Send;

    /// All listings currently open for reservation, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    fn find_available(&self) -> impl Future<Output = Result<Vec<Listing>>> + Send;

    /// All listings owned by `seller`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    fn find_by_seller(&self, seller: UserId) -> impl Future<Output = Result<Vec<Listing>>> + Send;

    /// The buyer's cart: listings reserved by `buyer` and not yet
    /// paid.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    fn find_reserved_by(&self, buyer: UserId) -> impl Future<Output = Result<Vec<Listing>>> + Send;

    /// The seller's inbound reservations: listings owned by `seller`
    /// that are reserved or paid but not yet completed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    fn find_inbound_reservations(
        &self,
        seller: UserId,
    ) -> impl Future<Output = Result<Vec<Listing>>> + Send;
}
