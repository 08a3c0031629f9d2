//! Domain types and business rules for Campus Market.
//!
//! This crate holds everything that does not touch I/O: the listing
//! lifecycle state machine, user and review records, input validation,
//! password hashing, and the error taxonomy shared by the storage and
//! web layers.
//!
//! # Listing lifecycle
//!
//! A listing moves through a single linear lifecycle:
//!
//! ```text
//! Available ──reserve──▶ Reserved ──mark_paid──▶ Paid ──mark_received──▶ Completed
//!     ▲                      │
//!     └──────release─────────┘
//! ```
//!
//! The state is one tagged enumeration ([`listing::ListingState`]), so
//! illegal combinations such as "completed but never reserved" are
//! unrepresentable.

pub mod error;
pub mod ids;
pub mod listing;
pub mod password;
pub mod review;
pub mod session;
pub mod user;
pub mod validate;

pub use error::{MarketError, Result};
pub use ids::{ListingId, ReviewId, SessionId, UserId};
pub use listing::{CompletedSale, Condition, Listing, ListingState};
pub use review::{RatingSummary, Review};
pub use session::Session;
pub use user::{OrderRecord, PaymentRecord, User};
