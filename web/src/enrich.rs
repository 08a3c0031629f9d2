//! Read-time view building.
//!
//! Every list endpoint joins its listings against users and reviews at
//! request time; nothing denormalized is stored. The response shapes
//! keep the legacy flag fields (`reserved`, `paymentStatus`, ...)
//! computed from the lifecycle state.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use campus_market_core::error::{MarketError, Result};
use campus_market_core::ids::{ListingId, UserId};
use campus_market_core::listing::Listing;
use campus_market_core::review::{RatingSummary, Review};
use campus_market_core::user::User;
use campus_market_store::UserStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fetch a user, treating a dangling reference as absent rather than
/// an error. List views fall back to placeholder text for these.
pub async fn lookup_user<U: UserStore>(users: &U, id: UserId) -> Result<Option<User>> {
    match users.get(id).await {
        Ok(user) => Ok(Some(user)),
        Err(MarketError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Encode a listing's image as a `data:` URI for inline display.
#[must_use]
pub fn image_data_uri(listing: &Listing) -> Option<String> {
    let bytes = listing.image.as_ref()?;
    let mime = listing.image_type.as_deref().unwrap_or("application/octet-stream");
    Some(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// A browse result: listing plus seller identity and aggregate rating.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingCard {
    /// Listing identifier.
    pub id: ListingId,
    /// Item title.
    pub title: String,
    /// Item description.
    pub description: String,
    /// Inline image data URI, when an image was uploaded.
    pub image: Option<String>,
    /// Seller contact details for the exchange.
    pub contact_info: String,
    /// Asking price.
    pub price: f64,
    /// Condition display form.
    pub condition: &'static str,
    /// Meetup location.
    pub location: String,
    /// Seller display name ("Unknown" if the account is gone).
    pub seller_name: String,
    /// Seller email address.
    pub seller_email: String,
    /// Mean rating rounded to one decimal, `null` with no reviews.
    pub average_rating: Option<f64>,
    /// Number of reviews the seller has received.
    pub review_count: usize,
}

/// Build a browse card from a listing and its joined seller/rating.
#[must_use]
pub fn listing_card(
    listing: &Listing,
    seller: Option<&User>,
    summary: Option<RatingSummary>,
) -> ListingCard {
    ListingCard {
        id: listing.id,
        title: listing.title.clone(),
        description: listing.description.clone(),
        image: image_data_uri(listing),
        contact_info: listing.contact_info.clone(),
        price: listing.price,
        condition: listing.condition.as_str(),
        location: listing.location.clone(),
        seller_name: seller.map_or_else(|| "Unknown".to_string(), |u| u.name.clone()),
        seller_email: seller.map_or_else(String::new, |u| u.email.clone()),
        average_rating: summary.map(|s| s.average_rating),
        review_count: summary.map_or(0, |s| s.review_count),
    }
}

/// A listing with its full legacy lifecycle view. Used for the
/// seller's own listings and as the update response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetail {
    /// Listing identifier.
    pub id: ListingId,
    /// Item title.
    pub title: String,
    /// Item description.
    pub description: String,
    /// Inline image data URI, when an image was uploaded.
    pub image: Option<String>,
    /// Seller contact details.
    pub contact_info: String,
    /// Asking price.
    pub price: f64,
    /// Condition display form.
    pub condition: &'static str,
    /// Meetup location.
    pub location: String,
    /// Legacy flag: a buyer has claimed the listing.
    pub reserved: bool,
    /// Email of the reserving buyer, when known.
    pub reserved_by: Option<String>,
    /// Legacy payment status: `unpaid`, `paid`, or `completed`.
    pub payment_status: &'static str,
    /// Transaction ID of the payment claim, once paid.
    pub transaction_id: Option<String>,
    /// Legacy flag: the sale is final.
    pub completed: bool,
}

/// Build the legacy detail view. `reserved_by` is the already-resolved
/// buyer email, if any.
#[must_use]
pub fn listing_detail(listing: &Listing, reserved_by: Option<String>) -> ListingDetail {
    ListingDetail {
        id: listing.id,
        title: listing.title.clone(),
        description: listing.description.clone(),
        image: image_data_uri(listing),
        contact_info: listing.contact_info.clone(),
        price: listing.price,
        condition: listing.condition.as_str(),
        location: listing.location.clone(),
        reserved: listing.is_reserved(),
        reserved_by,
        payment_status: listing.payment_status(),
        transaction_id: listing.transaction_id().map(str::to_string),
        completed: listing.is_completed(),
    }
}

/// Seller payment handles shown on a cart item.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSeller {
    /// Seller display name ("Unknown" if the account is gone).
    pub name: String,
    /// CashApp handle, or "Not provided".
    pub cash_app: String,
    /// Venmo handle, or "Not provided".
    pub venmo: String,
}

/// A reserved listing as it appears in the buyer's cart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Listing identifier.
    pub id: ListingId,
    /// Item title.
    pub title: String,
    /// Item description.
    pub description: String,
    /// Inline image data URI, when an image was uploaded.
    pub image: Option<String>,
    /// Asking price.
    pub price: f64,
    /// Condition display form.
    pub condition: &'static str,
    /// Meetup location.
    pub location: String,
    /// Legacy payment status for the cart row.
    pub payment_status: &'static str,
    /// Transaction ID, once the buyer has marked the item paid.
    pub transaction_id: Option<String>,
    /// How to pay the seller.
    pub seller: CartSeller,
}

/// Build a cart row with the seller's payment handles joined in.
#[must_use]
pub fn cart_item(listing: &Listing, seller: Option<&User>) -> CartItem {
    let seller = CartSeller {
        name: seller.map_or_else(|| "Unknown".to_string(), |u| u.name.clone()),
        cash_app: seller
            .and_then(|u| u.cash_app.clone())
            .unwrap_or_else(|| "Not provided".to_string()),
        venmo: seller
            .and_then(|u| u.venmo.clone())
            .unwrap_or_else(|| "Not provided".to_string()),
    };
    CartItem {
        id: listing.id,
        title: listing.title.clone(),
        description: listing.description.clone(),
        image: image_data_uri(listing),
        price: listing.price,
        condition: listing.condition.as_str(),
        location: listing.location.clone(),
        payment_status: listing.payment_status(),
        transaction_id: listing.transaction_id().map(str::to_string),
        seller,
    }
}

/// An inbound reservation on one of the seller's listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    /// The reserved listing.
    pub listing: ListingDetail,
    /// Buyer display name ("Unknown Buyer" if the account is gone).
    pub buyer_name: String,
    /// Buyer email address.
    pub buyer_email: String,
}

/// Build an inbound-reservation row with the buyer joined in.
#[must_use]
pub fn reservation_view(listing: &Listing, buyer: Option<&User>) -> ReservationView {
    let buyer_email = buyer.map_or_else(String::new, |u| u.email.clone());
    ReservationView {
        listing: listing_detail(listing, Some(buyer_email.clone()).filter(|e| !e.is_empty())),
        buyer_name: buyer.map_or_else(|| "Unknown Buyer".to_string(), |u| u.name.clone()),
        buyer_email,
    }
}

/// A completed sale in the seller's order history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryEntry {
    /// The sold listing.
    pub listing_id: ListingId,
    /// Listing title ("Unknown Listing" if since deleted).
    pub listing_title: String,
    /// The buyer's email.
    pub buyer_email: String,
    /// Transaction ID from the payment claim.
    pub transaction_id: String,
    /// When the seller confirmed receipt.
    pub completion_date: DateTime<Utc>,
}

/// A completed payment in the buyer's payment history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistoryEntry {
    /// The paid-for listing.
    pub listing_id: ListingId,
    /// Listing title ("Unknown Listing" if since deleted).
    pub listing_title: String,
    /// The seller's email.
    pub seller_email: String,
    /// Transaction ID the buyer entered.
    pub transaction_id: String,
    /// When the payment was recorded.
    pub completion_date: DateTime<Utc>,
}

/// A review as returned by the review endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    /// Rating from 1 to 5.
    pub rating: u8,
    /// Free-text comment; empty when none was given.
    pub comment: String,
    /// When the review was created.
    pub date: DateTime<Utc>,
    /// The transaction the review is tied to.
    pub transaction_id: String,
    /// Reviewer email ("Unknown" if the account is gone).
    pub reviewer_email: String,
    /// Reviewed seller's email.
    pub seller_email: String,
}

/// Build a review row with both parties' emails joined in.
#[must_use]
pub fn review_entry(review: &Review, seller_email: String, reviewer: Option<&User>) -> ReviewEntry {
    ReviewEntry {
        rating: review.rating,
        comment: review.comment.clone(),
        date: review.date,
        transaction_id: review.transaction_id.clone(),
        reviewer_email: reviewer.map_or_else(|| "Unknown".to_string(), |u| u.email.clone()),
        seller_email,
    }
}

/// One seller's aggregate rating.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    /// The seller's email.
    pub seller_email: String,
    /// Mean rating rounded to one decimal place.
    pub average_rating: f64,
    /// Number of reviews received.
    pub review_count: usize,
}
