//! User records and their audit histories.

use crate::ids::{ListingId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed sale, recorded on the seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// The sold listing.
    pub listing_id: ListingId,
    /// The buyer who paid.
    pub buyer: UserId,
    /// The transaction ID from the payment claim.
    pub transaction_id: String,
    /// When the seller confirmed receipt.
    pub completion_date: DateTime<Utc>,
}

/// A completed payment, recorded on the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// The paid-for listing.
    pub listing_id: ListingId,
    /// The seller who received the payment.
    pub seller: UserId,
    /// The transaction ID the buyer entered.
    pub transaction_id: String,
    /// When the payment was recorded.
    pub completion_date: DateTime<Utc>,
}

/// An account on the marketplace.
///
/// Identity is the opaque [`UserId`]; `email` is a uniquely indexed,
/// mutable attribute. Reservation state is *not* stored here — the
/// cart and inbound-reservation views are derived from listing state
/// at read time. The two histories are genuine append-only audit logs
/// and are stored on the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique email address, ending in the institutional domain
    /// suffix.
    pub email: String,
    /// Argon2 PHC-string hash of the password. Never the plaintext.
    pub password_hash: String,
    /// CashApp handle for receiving payments (starts with `$`).
    pub cash_app: Option<String>,
    /// Venmo handle for receiving payments (starts with `@`).
    pub venmo: Option<String>,
    /// Sales completed as a seller.
    pub order_history: Vec<OrderRecord>,
    /// Payments completed as a buyer.
    pub payment_history: Vec<PaymentRecord>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new account with empty histories.
    #[must_use]
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        cash_app: Option<String>,
        venmo: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            name,
            email,
            password_hash,
            cash_app,
            venmo,
            order_history: Vec::new(),
            payment_history: Vec::new(),
            created_at: now,
        }
    }
}
