//! Completed-sale histories: the seller's orders and the buyer's
//! payments.

use crate::enrich::{OrderHistoryEntry, PaymentHistoryEntry, lookup_user};
use crate::error::AppError;
use crate::extractors::Authenticated;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use campus_market_core::error::MarketError;
use campus_market_core::ids::ListingId;
use campus_market_store::{ListingStore, ReviewStore, SessionStore, UserStore};

/// Fetch a listing title, falling back for deleted listings.
async fn listing_title<L: ListingStore>(listings: &L, id: ListingId) -> Result<String, AppError> {
    match listings.get(id).await {
        Ok(listing) => Ok(listing.title),
        Err(MarketError::NotFound { .. }) => Ok("Unknown Listing".to_string()),
        Err(err) => Err(err.into()),
    }
}

/// `GET /api/user/orderHistory` — sales the caller completed as a
/// seller, oldest first.
pub async fn order_history<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
) -> Result<Json<Vec<OrderHistoryEntry>>, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let user = state.users.get(auth.session.user_id).await?;
    let mut entries = Vec::with_capacity(user.order_history.len());
    for record in &user.order_history {
        let buyer = lookup_user(&state.users, record.buyer).await?;
        entries.push(OrderHistoryEntry {
            listing_id: record.listing_id,
            listing_title: listing_title(&state.listings, record.listing_id).await?,
            buyer_email: buyer.map_or_else(|| "Unknown Buyer".to_string(), |u| u.email),
            transaction_id: record.transaction_id.clone(),
            completion_date: record.completion_date,
        });
    }
    Ok(Json(entries))
}

/// `GET /api/user/paymentHistory` — payments the caller completed as a
/// buyer, oldest first.
pub async fn payment_history<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
) -> Result<Json<Vec<PaymentHistoryEntry>>, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let user = state.users.get(auth.session.user_id).await?;
    let mut entries = Vec::with_capacity(user.payment_history.len());
    for record in &user.payment_history {
        let seller = lookup_user(&state.users, record.seller).await?;
        entries.push(PaymentHistoryEntry {
            listing_id: record.listing_id,
            listing_title: listing_title(&state.listings, record.listing_id).await?,
            seller_email: seller.map_or_else(|| "Unknown Seller".to_string(), |u| u.email),
            transaction_id: record.transaction_id.clone(),
            completion_date: record.completion_date,
        });
    }
    Ok(Json(entries))
}
