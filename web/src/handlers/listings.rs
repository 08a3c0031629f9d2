//! Listing CRUD: browse, create, the seller's own listings, update,
//! and delete.

use crate::enrich::{ListingCard, ListingDetail, listing_card, listing_detail, lookup_user};
use crate::error::AppError;
use crate::extractors::Authenticated;
use crate::state::AppState;
use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use campus_market_core::ids::ListingId;
use campus_market_core::listing::Listing;
use campus_market_core::review;
use campus_market_core::validate;
use campus_market_store::{ListingStore, ReviewStore, SessionStore, UserStore};
use chrono::Utc;
use serde::Deserialize;

/// Query parameters of `GET /api/listings`.
#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    /// Substring to match against title or description.
    #[serde(default)]
    pub search: Option<String>,
}

/// `GET /api/listings?search=` — browse available listings.
///
/// Only `Available` listings appear; each card carries the seller's
/// name and aggregate rating joined at read time.
pub async fn browse<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<Vec<ListingCard>>, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let query = params.search.unwrap_or_default();
    let listings = state.listings.find_available().await?;
    let summaries = review::aggregate_by_seller(&state.reviews.all().await?);

    let mut cards = Vec::new();
    for listing in listings.iter().filter(|l| l.matches_search(&query)) {
        let seller = lookup_user(&state.users, listing.seller).await?;
        cards.push(listing_card(
            listing,
            seller.as_ref(),
            summaries.get(&listing.seller).copied(),
        ));
    }
    Ok(Json(cards))
}

async fn field_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|err| AppError::bad_request(format!("Invalid form data: {err}")))
}

fn require(value: Option<String>, message: &'static str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::bad_request(message))
}

/// `POST /createListing` — create a listing from a multipart form.
///
/// Fields: `title`, `description`, `contactInfo`, `price`,
/// `condition`, `location`, and an optional `image` file part. All
/// validations run before the insert.
pub async fn create_listing<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
    mut multipart: Multipart,
) -> Result<(StatusCode, &'static str), AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let mut title = None;
    let mut description = None;
    let mut contact_info = None;
    let mut price_raw = None;
    let mut condition_raw = None;
    let mut location_raw = None;
    let mut image = None;
    let mut image_type = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(format!("Invalid form data: {err}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "title" => title = Some(field_text(field).await?),
            "description" => description = Some(field_text(field).await?),
            "contactInfo" => contact_info = Some(field_text(field).await?),
            "price" => price_raw = Some(field_text(field).await?),
            "condition" => condition_raw = Some(field_text(field).await?),
            "location" => location_raw = Some(field_text(field).await?),
            "image" => {
                let mime = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| AppError::bad_request(format!("Invalid form data: {err}")))?;
                // Browsers send an empty file part when none was chosen.
                if !bytes.is_empty() {
                    image = Some(bytes.to_vec());
                    image_type = mime;
                }
            }
            _ => {}
        }
    }

    let title = require(title, "Title is required.")?;
    let description = require(description, "Description is required.")?;
    let contact_info = require(contact_info, "Contact info is required.")?;
    let price = validate::validate_price(
        price_raw
            .as_deref()
            .unwrap_or_default()
            .trim()
            .parse()
            .unwrap_or(f64::NAN),
    )?;
    let condition = validate::validate_condition(condition_raw.as_deref().unwrap_or_default())?;
    let location = validate::validate_location(location_raw.as_deref().unwrap_or_default())?;

    let listing = Listing::new(
        title,
        description,
        image,
        image_type,
        contact_info,
        price,
        condition,
        location,
        auth.session.user_id,
        Utc::now(),
    );
    state.listings.insert(&listing).await?;
    tracing::info!(listing_id = %listing.id, seller = %listing.seller, "listing created");
    Ok((StatusCode::CREATED, "Listing created successfully!"))
}

/// `GET /api/user/listings` — the caller's own listings, with the full
/// lifecycle view and the reserving buyer's email when known.
pub async fn my_listings<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
) -> Result<Json<Vec<ListingDetail>>, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let listings = state.listings.find_by_seller(auth.session.user_id).await?;
    let mut details = Vec::with_capacity(listings.len());
    for listing in &listings {
        let reserved_by = match listing.buyer() {
            Some(buyer) => lookup_user(&state.users, buyer).await?.map(|u| u.email),
            None => None,
        };
        details.push(listing_detail(listing, reserved_by));
    }
    Ok(Json(details))
}

/// Body of `PUT /api/listings/:id`. Only provided fields change.
#[derive(Debug, Deserialize)]
pub struct UpdateListingRequest {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New price, re-validated positive.
    #[serde(default)]
    pub price: Option<f64>,
    /// New condition, re-validated against the known set.
    #[serde(default)]
    pub condition: Option<String>,
    /// New location, re-validated non-empty.
    #[serde(default)]
    pub location: Option<String>,
}

/// `PUT /api/listings/:id` — update listing fields.
pub async fn update_listing<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    _auth: Authenticated,
    Path(id): Path<uuid::Uuid>,
    Json(request): Json<UpdateListingRequest>,
) -> Result<Json<ListingDetail>, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let id = ListingId(id);
    let mut listing = state.listings.get(id).await?;

    if let Some(price) = request.price {
        listing.price = validate::validate_price(price)?;
    }
    if let Some(condition) = &request.condition {
        listing.condition = validate::validate_condition(condition)?;
    }
    if let Some(location) = &request.location {
        listing.location = validate::validate_location(location)?;
    }
    if let Some(title) = request.title.filter(|t| !t.trim().is_empty()) {
        listing.title = title.trim().to_string();
    }
    if let Some(description) = request.description.filter(|d| !d.trim().is_empty()) {
        listing.description = description.trim().to_string();
    }

    state.listings.save(&listing).await?;

    let reserved_by = match listing.buyer() {
        Some(buyer) => lookup_user(&state.users, buyer).await?.map(|u| u.email),
        None => None,
    };
    Ok(Json(listing_detail(&listing, reserved_by)))
}

/// `DELETE /api/listings/:id` — delete a listing and cascade away any
/// payment-history entries that reference it.
///
/// Deletion is refused once a buyer is involved; the error names the
/// most advanced lifecycle stage reached.
pub async fn delete_listing<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    _auth: Authenticated,
    Path(id): Path<uuid::Uuid>,
) -> Result<(StatusCode, &'static str), AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let id = ListingId(id);
    let listing = state.listings.get(id).await?;
    listing.ensure_deletable()?;

    state.listings.delete(id).await?;
    let removed = state.users.pull_payment_records(id).await?;
    if removed > 0 {
        tracing::debug!(listing_id = %id, removed, "pulled dangling payment records");
    }
    tracing::info!(listing_id = %id, "listing deleted");
    Ok((StatusCode::OK, "Listing deleted successfully"))
}
