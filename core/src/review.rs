//! Seller reviews and rating aggregation.

use crate::ids::{ReviewId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A rating event tied one-to-one to a transaction.
///
/// Reviews are append-only: no exposed operation updates or deletes
/// them. Uniqueness per transaction is enforced by a
/// lookup-then-insert at the store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier.
    pub id: ReviewId,
    /// The seller being reviewed.
    pub seller: UserId,
    /// The buyer leaving the review.
    pub reviewer: UserId,
    /// Rating from 1 to 5.
    pub rating: u8,
    /// Optional free-text comment; empty when not provided.
    pub comment: String,
    /// When the review was created.
    pub date: DateTime<Utc>,
    /// The transaction this review is tied to.
    pub transaction_id: String,
}

impl Review {
    /// Create a new review. `rating` is expected to be validated into
    /// 1–5 already (see [`crate::validate::validate_rating`]).
    #[must_use]
    pub fn new(
        seller: UserId,
        reviewer: UserId,
        rating: u8,
        comment: Option<String>,
        transaction_id: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReviewId::new(),
            seller,
            reviewer,
            rating,
            comment: comment.unwrap_or_default(),
            date: now,
            transaction_id,
        }
    }
}

/// Aggregate rating for one seller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Arithmetic mean of all ratings, rounded to one decimal place.
    pub average_rating: f64,
    /// Number of reviews received.
    pub review_count: usize,
}

/// Group reviews by seller and compute each seller's mean rating
/// (rounded to one decimal place) and review count.
#[must_use]
pub fn aggregate_by_seller(reviews: &[Review]) -> HashMap<UserId, RatingSummary> {
    let mut sums: HashMap<UserId, (u32, usize)> = HashMap::new();
    for review in reviews {
        let entry = sums.entry(review.seller).or_insert((0, 0));
        entry.0 += u32::from(review.rating);
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(seller, (sum, count))| {
            #[allow(clippy::cast_precision_loss)]
            let mean = f64::from(sum) / count as f64;
            (
                seller,
                RatingSummary {
                    average_rating: (mean * 10.0).round() / 10.0,
                    review_count: count,
                },
            )
        })
        .collect()
}
