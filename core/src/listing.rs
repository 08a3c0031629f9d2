//! Listings and their lifecycle state machine.

use crate::error::{MarketError, Result};
use crate::ids::{ListingId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Condition of a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// Never used.
    New,
    /// Used, but indistinguishable from new.
    #[serde(rename = "Like New")]
    LikeNew,
    /// Visibly used.
    Used,
}

impl Condition {
    /// Parse a condition from its display form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "New" => Some(Self::New),
            "Like New" => Some(Self::LikeNew),
            "Used" => Some(Self::Used),
            _ => None,
        }
    }

    /// Display form, matching the wire format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::LikeNew => "Like New",
            Self::Used => "Used",
        }
    }
}

/// Lifecycle state of a listing.
///
/// One tagged enumeration instead of parallel
/// `reserved`/`paymentStatus`/`completed` flags, so combinations like
/// "completed but never reserved" cannot be constructed. The legacy
/// flag view is still available through the accessors on [`Listing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingState {
    /// Open for reservation.
    Available,
    /// Claimed by a buyer; sits in that buyer's cart.
    Reserved {
        /// The reserving buyer.
        buyer: UserId,
    },
    /// The buyer has recorded an off-platform payment.
    Paid {
        /// The reserving buyer.
        buyer: UserId,
        /// Free-text payment claim supplied by the buyer. Not
        /// independently verified.
        transaction_id: String,
    },
    /// The seller confirmed receipt of payment; the sale is final.
    Completed {
        /// The buyer who completed the purchase.
        buyer: UserId,
        /// The transaction ID carried over from the paid state.
        transaction_id: String,
        /// When the seller confirmed receipt.
        completed_at: DateTime<Utc>,
    },
}

/// Details of a completed sale, produced by
/// [`Listing::mark_received`] so the caller can append history
/// records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSale {
    /// The buyer who paid.
    pub buyer: UserId,
    /// The transaction ID the buyer supplied.
    pub transaction_id: String,
    /// When the seller confirmed receipt.
    pub completed_at: DateTime<Utc>,
}

/// A for-sale item with lifecycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique identifier.
    pub id: ListingId,
    /// Item title.
    pub title: String,
    /// Item description.
    pub description: String,
    /// Raw image bytes, if an image was uploaded.
    pub image: Option<Vec<u8>>,
    /// MIME type of the image (e.g. `image/png`).
    pub image_type: Option<String>,
    /// How to reach the seller for the exchange.
    pub contact_info: String,
    /// Asking price. Validated positive at the boundary.
    pub price: f64,
    /// Condition of the item.
    pub condition: Condition,
    /// Meetup location details.
    pub location: String,
    /// The owning seller.
    pub seller: UserId,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// Current lifecycle state.
    pub state: ListingState,
}

impl Listing {
    /// Create a new available listing.
    ///
    /// Inputs are expected to be validated already (see
    /// [`crate::validate`]).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        description: String,
        image: Option<Vec<u8>>,
        image_type: Option<String>,
        contact_info: String,
        price: f64,
        condition: Condition,
        location: String,
        seller: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ListingId::new(),
            title,
            description,
            image,
            image_type,
            contact_info,
            price,
            condition,
            location,
            seller,
            created_at: now,
            state: ListingState::Available,
        }
    }

    /// Reserve this listing for `buyer`.
    ///
    /// # Errors
    ///
    /// Returns a conflict if the listing is not available, regardless
    /// of who holds the reservation.
    pub fn reserve(&mut self, buyer: UserId) -> Result<()> {
        match self.state {
            ListingState::Available => {
                self.state = ListingState::Reserved { buyer };
                Ok(())
            }
            _ => Err(MarketError::conflict("Listing is already reserved")),
        }
    }

    /// Release the reservation held by `caller` (cart removal).
    ///
    /// # Errors
    ///
    /// Returns forbidden when the reservation belongs to another buyer
    /// and a conflict when the listing is not in the reserved state
    /// (unpaid reservations are the only releasable ones).
    pub fn release(&mut self, caller: UserId) -> Result<()> {
        match self.state {
            ListingState::Reserved { buyer } if buyer == caller => {
                self.state = ListingState::Available;
                Ok(())
            }
            ListingState::Reserved { .. } => Err(MarketError::forbidden(
                "Listing is reserved by another buyer",
            )),
            _ => Err(MarketError::conflict("Listing is not reserved")),
        }
    }

    /// Record an off-platform payment claim by the reserving buyer.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank transaction ID, and
    /// forbidden when `caller` is not the reserving buyer (including
    /// when nobody holds a reservation).
    pub fn mark_paid(&mut self, caller: UserId, transaction_id: &str) -> Result<()> {
        let transaction_id = transaction_id.trim();
        if transaction_id.is_empty() {
            return Err(MarketError::validation("Transaction ID is required"));
        }
        match self.state {
            ListingState::Reserved { buyer } if buyer == caller => {
                self.state = ListingState::Paid {
                    buyer,
                    transaction_id: transaction_id.to_string(),
                };
                Ok(())
            }
            _ => Err(MarketError::forbidden("Unauthorized action")),
        }
    }

    /// Confirm receipt of payment as the seller, completing the sale.
    ///
    /// # Errors
    ///
    /// Returns forbidden when `caller` is not the owning seller, and a
    /// conflict when the listing has not been paid for (or is already
    /// completed).
    pub fn mark_received(&mut self, caller: UserId, now: DateTime<Utc>) -> Result<CompletedSale> {
        if self.seller != caller {
            return Err(MarketError::forbidden("Unauthorized action"));
        }
        match self.state.clone() {
            ListingState::Paid {
                buyer,
                transaction_id,
            } => {
                self.state = ListingState::Completed {
                    buyer,
                    transaction_id: transaction_id.clone(),
                    completed_at: now,
                };
                Ok(CompletedSale {
                    buyer,
                    transaction_id,
                    completed_at: now,
                })
            }
            ListingState::Completed { .. } => {
                Err(MarketError::conflict("Order is already completed"))
            }
            _ => Err(MarketError::conflict("Listing has not been paid for")),
        }
    }

    /// Check the deletion preconditions, most restrictive first, so
    /// the error names the most advanced lifecycle stage reached.
    ///
    /// # Errors
    ///
    /// Returns a conflict describing why deletion is blocked.
    pub fn ensure_deletable(&self) -> Result<()> {
        match self.state {
            ListingState::Completed { .. } => Err(MarketError::conflict(
                "Listing cannot be deleted because the transaction is completed.",
            )),
            ListingState::Paid { .. } => Err(MarketError::conflict(
                "Listing cannot be deleted because it has been paid for.",
            )),
            ListingState::Reserved { .. } => Err(MarketError::conflict(
                "Listing cannot be deleted because it is reserved.",
            )),
            ListingState::Available => Ok(()),
        }
    }

    /// Legacy `reserved` flag: `true` once a buyer has claimed the
    /// listing. The original kept the flag set through payment and
    /// completion, and so does this view.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        !matches!(self.state, ListingState::Available)
    }

    /// The buyer holding the listing, if any. Set exactly when
    /// [`Self::is_reserved`] is `true`.
    #[must_use]
    pub const fn buyer(&self) -> Option<UserId> {
        match self.state {
            ListingState::Available => None,
            ListingState::Reserved { buyer }
            | ListingState::Paid { buyer, .. }
            | ListingState::Completed { buyer, .. } => Some(buyer),
        }
    }

    /// Legacy `paymentStatus` field: `unpaid`, `paid`, or `completed`.
    #[must_use]
    pub const fn payment_status(&self) -> &'static str {
        match self.state {
            ListingState::Available | ListingState::Reserved { .. } => "unpaid",
            ListingState::Paid { .. } => "paid",
            ListingState::Completed { .. } => "completed",
        }
    }

    /// The recorded transaction ID, once paid.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        match &self.state {
            ListingState::Paid { transaction_id, .. }
            | ListingState::Completed { transaction_id, .. } => Some(transaction_id),
            _ => None,
        }
    }

    /// Legacy `completed` flag.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.state, ListingState::Completed { .. })
    }

    /// Case-insensitive substring match of `query` against title or
    /// description. An empty query matches everything.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}
