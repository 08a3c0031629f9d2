//! Router assembly.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post, put};
use campus_market_store::{ListingStore, ReviewStore, SessionStore, UserStore};
use tower_http::trace::TraceLayer;

/// Build the application router over the given state.
///
/// Handlers are registered with explicit store types so the router
/// works against any provider implementation (production stores in
/// `main`, in-memory stores in tests).
pub fn app_router<U, L, R, S>(state: AppState<U, L, R, S>) -> Router
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Accounts and sessions
        .route("/signup", post(handlers::auth::signup::<U, L, R, S>))
        .route("/login", post(handlers::auth::login::<U, L, R, S>))
        .route("/logout", get(handlers::auth::logout::<U, L, R, S>))
        .route("/api/user", get(handlers::auth::session_probe))
        // Profile
        .route(
            "/api/user/profile",
            get(handlers::profile::get_profile::<U, L, R, S>),
        )
        .route(
            "/api/user/profile/update",
            post(handlers::profile::update_profile::<U, L, R, S>),
        )
        // Listings
        .route("/api/listings", get(handlers::listings::browse::<U, L, R, S>))
        .route(
            "/createListing",
            post(handlers::listings::create_listing::<U, L, R, S>),
        )
        .route(
            "/api/user/listings",
            get(handlers::listings::my_listings::<U, L, R, S>),
        )
        .route(
            "/api/listings/:id",
            put(handlers::listings::update_listing::<U, L, R, S>)
                .delete(handlers::listings::delete_listing::<U, L, R, S>),
        )
        // Reservation and payment lifecycle
        .route(
            "/api/listings/reserve",
            post(handlers::lifecycle::reserve::<U, L, R, S>),
        )
        .route("/api/user/cart", get(handlers::lifecycle::cart::<U, L, R, S>))
        .route(
            "/api/user/cart/remove",
            post(handlers::lifecycle::cart_remove::<U, L, R, S>),
        )
        .route(
            "/api/listings/markAsPaid",
            post(handlers::lifecycle::mark_paid::<U, L, R, S>),
        )
        .route(
            "/api/listings/markAsReceived",
            post(handlers::lifecycle::mark_received::<U, L, R, S>),
        )
        .route(
            "/api/user/reservations",
            get(handlers::lifecycle::reservations::<U, L, R, S>),
        )
        // Histories
        .route(
            "/api/user/orderHistory",
            get(handlers::history::order_history::<U, L, R, S>),
        )
        .route(
            "/api/user/paymentHistory",
            get(handlers::history::payment_history::<U, L, R, S>),
        )
        // Reviews
        .route(
            "/api/user/reviews",
            post(handlers::reviews::submit_review::<U, L, R, S>),
        )
        .route(
            "/api/user/reviews/:seller_email",
            get(handlers::reviews::seller_reviews::<U, L, R, S>),
        )
        .route(
            "/api/reviews/seller",
            get(handlers::reviews::my_reviews::<U, L, R, S>),
        )
        .route(
            "/api/reviews/aggregate-ratings",
            get(handlers::reviews::aggregate_ratings::<U, L, R, S>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
