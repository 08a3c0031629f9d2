//! In-memory Listings collection.

use crate::memory::lock_poisoned;
use crate::providers::ListingStore;
use campus_market_core::error::{MarketError, Result};
use campus_market_core::ids::{ListingId, UserId};
use campus_market_core::listing::{Listing, ListingState};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

/// In-memory listing store.
///
/// Query results are sorted oldest-first so browse output is stable
/// across requests.
#[derive(Debug, Clone, Default)]
pub struct MemoryListingStore {
    inner: Arc<RwLock<HashMap<ListingId, Listing>>>,
}

impl MemoryListingStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_sorted(
        &self,
        filter: impl Fn(&Listing) -> bool + Send + 'static,
    ) -> impl Future<Output = Result<Vec<Listing>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let mut matches: Vec<Listing> = inner
                .read()
                .map_err(|_| lock_poisoned())?
                .values()
                .filter(|l| filter(l))
                .cloned()
                .collect();
            matches.sort_by_key(|l| l.created_at);
            Ok(matches)
        }
    }
}

impl ListingStore for MemoryListingStore {
    fn insert(&self, listing: &Listing) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let listing = listing.clone();

        async move {
            inner
                .write()
                .map_err(|_| lock_poisoned())?
                .insert(listing.id, listing);
            Ok(())
        }
    }

    fn get(&self, id: ListingId) -> impl Future<Output = Result<Listing>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            inner
                .read()
                .map_err(|_| lock_poisoned())?
                .get(&id)
                .cloned()
                .ok_or(MarketError::NotFound {
                    resource: "Listing",
                })
        }
    }

    fn save(&self, listing: &Listing) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let listing = listing.clone();

        async move {
            let mut map = inner.write().map_err(|_| lock_poisoned())?;
            if !map.contains_key(&listing.id) {
                return Err(MarketError::NotFound {
                    resource: "Listing",
                });
            }
            map.insert(listing.id, listing);
            Ok(())
        }
    }

    fn delete(&self, id: ListingId) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            inner.write().map_err(|_| lock_poisoned())?.remove(&id);
            Ok(())
        }
    }

    fn find_available(&self) -> impl Future<Output = Result<Vec<Listing>>> + Send {
        self.collect_sorted(|l| l.state == ListingState::Available)
    }

    fn find_by_seller(&self, seller: UserId) -> impl Future<Output = Result<Vec<Listing>>> + Send {
        self.collect_sorted(move |l| l.seller == seller)
    }

    fn find_reserved_by(&self, buyer: UserId) -> impl Future<Output = Result<Vec<Listing>>> + Send {
        self.collect_sorted(move |l| matches!(l.state, ListingState::Reserved { buyer: b } if b == buyer))
    }

    fn find_inbound_reservations(
        &self,
        seller: UserId,
    ) -> impl Future<Output = Result<Vec<Listing>>> + Send {
        self.collect_sorted(move |l| {
            l.seller == seller
                && matches!(
                    l.state,
                    ListingState::Reserved { .. } | ListingState::Paid { .. }
                )
        })
    }
}
