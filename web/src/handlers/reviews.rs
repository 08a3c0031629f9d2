//! Seller reviews: submission, per-seller listings, and aggregate
//! ratings.

use crate::enrich::{AggregateRating, ReviewEntry, lookup_user, review_entry};
use crate::error::AppError;
use crate::extractors::Authenticated;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use campus_market_core::review::{self, Review};
use campus_market_core::validate;
use campus_market_store::{ListingStore, ReviewStore, SessionStore, UserStore};
use chrono::Utc;
use serde::Deserialize;

/// Body of `POST /api/user/reviews`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    /// The transaction being reviewed; at most one review per
    /// transaction.
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// Email of the seller being reviewed.
    #[serde(default)]
    pub seller_email: Option<String>,
    /// Rating from 1 to 5.
    #[serde(default)]
    pub rating: Option<i64>,
    /// Optional free-text comment.
    #[serde(default)]
    pub comment: Option<String>,
}

const INVALID_REVIEW: &str =
    "Invalid review data. Ensure all fields are provided and rating is between 1 and 5.";

/// `POST /api/user/reviews` — leave a review for a seller.
///
/// One review per transaction, enforced by a lookup before the
/// insert.
pub async fn submit_review<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
    Json(request): Json<SubmitReviewRequest>,
) -> Result<(StatusCode, &'static str), AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let transaction_id = request
        .transaction_id
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    let seller_email = request
        .seller_email
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if transaction_id.is_empty() || seller_email.is_empty() {
        return Err(AppError::bad_request(INVALID_REVIEW));
    }
    let rating = validate::validate_rating(request.rating.ok_or_else(|| {
        AppError::bad_request(INVALID_REVIEW)
    })?)?;

    let seller = state
        .users
        .find_by_email(seller_email)
        .await?
        .ok_or_else(|| AppError::not_found("Seller not found."))?;

    if state
        .reviews
        .find_by_transaction(transaction_id)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("Review already exists for this transaction."));
    }

    let review = Review::new(
        seller.id,
        auth.session.user_id,
        rating,
        request.comment,
        transaction_id.to_string(),
        Utc::now(),
    );
    state.reviews.insert(&review).await?;
    tracing::info!(review_id = %review.id, seller = %seller.id, "review added");
    Ok((StatusCode::CREATED, "Review added successfully."))
}

async fn entries_for_seller<U, R>(
    users: &U,
    reviews: &R,
    seller: campus_market_core::user::User,
) -> Result<Vec<ReviewEntry>, AppError>
where
    U: UserStore,
    R: ReviewStore,
{
    let reviews = reviews.find_by_seller(seller.id).await?;
    let mut entries = Vec::with_capacity(reviews.len());
    for review in &reviews {
        let reviewer = lookup_user(users, review.reviewer).await?;
        entries.push(review_entry(review, seller.email.clone(), reviewer.as_ref()));
    }
    Ok(entries)
}

/// `GET /api/user/reviews/:sellerEmail` — reviews for one seller,
/// most recent first. No session required.
pub async fn seller_reviews<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    Path(seller_email): Path<String>,
) -> Result<Json<Vec<ReviewEntry>>, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let seller = state
        .users
        .find_by_email(&seller_email)
        .await?
        .ok_or_else(|| AppError::not_found("Seller not found."))?;
    let entries = entries_for_seller(&state.users, &state.reviews, seller).await?;
    Ok(Json(entries))
}

/// `GET /api/reviews/seller` — reviews received by the caller, most
/// recent first.
pub async fn my_reviews<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
) -> Result<Json<Vec<ReviewEntry>>, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let seller = state.users.get(auth.session.user_id).await?;
    let entries = entries_for_seller(&state.users, &state.reviews, seller).await?;
    Ok(Json(entries))
}

/// `GET /api/reviews/aggregate-ratings` — every seller's mean rating
/// (one decimal) and review count, ordered by seller email.
pub async fn aggregate_ratings<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
) -> Result<Json<Vec<AggregateRating>>, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let summaries = review::aggregate_by_seller(&state.reviews.all().await?);
    let mut ratings = Vec::with_capacity(summaries.len());
    for (seller_id, summary) in summaries {
        let seller = lookup_user(&state.users, seller_id).await?;
        ratings.push(AggregateRating {
            seller_email: seller.map_or_else(|| "Unknown".to_string(), |u| u.email),
            average_rating: summary.average_rating,
            review_count: summary.review_count,
        });
    }
    // HashMap iteration order is arbitrary; fix it for clients.
    ratings.sort_by(|a, b| a.seller_email.cmp(&b.seller_email));
    Ok(Json(ratings))
}
