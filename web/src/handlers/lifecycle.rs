//! Reservation and payment lifecycle: reserve, cart, mark paid, mark
//! received, and the seller's inbound reservations.

use crate::enrich::{CartItem, ReservationView, cart_item, lookup_user, reservation_view};
use crate::error::AppError;
use crate::extractors::Authenticated;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use campus_market_core::ids::ListingId;
use campus_market_core::user::{OrderRecord, PaymentRecord};
use campus_market_store::{ListingStore, ReviewStore, SessionStore, UserStore};
use chrono::Utc;
use serde::Deserialize;

/// Body of the lifecycle endpoints that act on one listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingActionRequest {
    /// The listing to act on.
    pub listing_id: uuid::Uuid,
}

/// Body of `POST /api/listings/markAsPaid`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidRequest {
    /// The listing being paid for.
    pub listing_id: uuid::Uuid,
    /// Transaction ID of the off-platform payment. Free text, not
    /// verified.
    #[serde(default)]
    pub transaction_id: Option<String>,
}

/// `POST /api/listings/reserve` — claim an available listing.
pub async fn reserve<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
    Json(request): Json<ListingActionRequest>,
) -> Result<(StatusCode, &'static str), AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let mut listing = state.listings.get(ListingId(request.listing_id)).await?;
    listing.reserve(auth.session.user_id)?;
    state.listings.save(&listing).await?;
    tracing::info!(listing_id = %listing.id, buyer = %auth.session.user_id, "listing reserved");
    Ok((StatusCode::OK, "Item reserved successfully"))
}

/// `GET /api/user/cart` — the caller's reserved-but-unpaid listings,
/// with the seller's payment handles joined in.
pub async fn cart<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
) -> Result<Json<Vec<CartItem>>, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let listings = state.listings.find_reserved_by(auth.session.user_id).await?;
    let mut items = Vec::with_capacity(listings.len());
    for listing in &listings {
        let seller = lookup_user(&state.users, listing.seller).await?;
        items.push(cart_item(listing, seller.as_ref()));
    }
    Ok(Json(items))
}

/// `POST /api/user/cart/remove` — release the caller's reservation.
pub async fn cart_remove<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
    Json(request): Json<ListingActionRequest>,
) -> Result<(StatusCode, &'static str), AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let mut listing = state.listings.get(ListingId(request.listing_id)).await?;
    listing.release(auth.session.user_id)?;
    state.listings.save(&listing).await?;
    Ok((
        StatusCode::OK,
        "Item removed from cart and unmarked as reserved",
    ))
}

/// `POST /api/listings/markAsPaid` — record the buyer's off-platform
/// payment claim and append it to their payment history.
pub async fn mark_paid<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
    Json(request): Json<MarkPaidRequest>,
) -> Result<(StatusCode, &'static str), AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    // Transaction ID is checked before the fetch so a blank claim is
    // reported even for a missing listing.
    let transaction_id = request
        .transaction_id
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if transaction_id.is_empty() {
        return Err(AppError::bad_request("Transaction ID is required"));
    }

    let mut listing = state.listings.get(ListingId(request.listing_id)).await?;
    listing.mark_paid(auth.session.user_id, transaction_id)?;
    state.listings.save(&listing).await?;

    state
        .users
        .push_payment_record(
            auth.session.user_id,
            PaymentRecord {
                listing_id: listing.id,
                seller: listing.seller,
                transaction_id: transaction_id.to_string(),
                completion_date: Utc::now(),
            },
        )
        .await?;
    tracing::info!(listing_id = %listing.id, buyer = %auth.session.user_id, "payment recorded");
    Ok((StatusCode::OK, "Payment marked as paid"))
}

/// `POST /api/listings/markAsReceived` — the seller confirms receipt,
/// completing the sale and appending it to their order history.
pub async fn mark_received<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
    Json(request): Json<ListingActionRequest>,
) -> Result<(StatusCode, &'static str), AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let mut listing = state.listings.get(ListingId(request.listing_id)).await?;
    let sale = listing.mark_received(auth.session.user_id, Utc::now())?;
    state.listings.save(&listing).await?;

    state
        .users
        .push_order_record(
            auth.session.user_id,
            OrderRecord {
                listing_id: listing.id,
                buyer: sale.buyer,
                transaction_id: sale.transaction_id,
                completion_date: sale.completed_at,
            },
        )
        .await?;
    tracing::info!(listing_id = %listing.id, seller = %auth.session.user_id, "sale completed");
    Ok((StatusCode::OK, "Order marked as received and completed"))
}

/// `GET /api/user/reservations` — reservations on the caller's own
/// listings (reserved or paid, not yet completed), with the buyer
/// joined in.
pub async fn reservations<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
) -> Result<Json<Vec<ReservationView>>, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let listings = state
        .listings
        .find_inbound_reservations(auth.session.user_id)
        .await?;
    let mut views = Vec::with_capacity(listings.len());
    for listing in &listings {
        let buyer = match listing.buyer() {
            Some(buyer) => lookup_user(&state.users, buyer).await?,
            None => None,
        };
        views.push(reservation_view(listing, buyer.as_ref()));
    }
    Ok(Json(views))
}
