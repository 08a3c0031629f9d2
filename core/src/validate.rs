//! Input validation shared by signup, profile update, and listing
//! creation.
//!
//! Every function checks a single field and returns the user-facing
//! message on failure. Handlers run all validations before any
//! mutation.

use crate::error::{MarketError, Result};
use crate::listing::Condition;

/// Validate a signup email against the institutional domain suffix.
///
/// # Errors
///
/// Returns a validation error when the email does not end with
/// `domain_suffix`.
pub fn validate_signup_email(email: &str, domain_suffix: &str) -> Result<()> {
    if email.ends_with(domain_suffix) && email.len() > domain_suffix.len() {
        Ok(())
    } else {
        Err(MarketError::validation(format!(
            "Invalid email. It must end with \"{domain_suffix}\"."
        )))
    }
}

/// Validate an optional CashApp handle (must start with `$`).
///
/// # Errors
///
/// Returns a validation error for a handle missing the `$` prefix.
pub fn validate_cash_app(cash_app: Option<&str>) -> Result<()> {
    match cash_app {
        Some(handle) if !handle.starts_with('$') => Err(MarketError::validation(
            "Invalid CashApp username. It must start with \"$\".",
        )),
        _ => Ok(()),
    }
}

/// Validate an optional Venmo handle (must start with `@`).
///
/// # Errors
///
/// Returns a validation error for a handle missing the `@` prefix.
pub fn validate_venmo(venmo: Option<&str>) -> Result<()> {
    match venmo {
        Some(handle) if !handle.starts_with('@') => Err(MarketError::validation(
            "Invalid Venmo username. It must start with \"@\".",
        )),
        _ => Ok(()),
    }
}

/// Validate a listing price: a finite, positive number.
///
/// # Errors
///
/// Returns a validation error otherwise.
pub fn validate_price(price: f64) -> Result<f64> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(MarketError::validation(
            "Invalid price. It must be a positive number.",
        ))
    }
}

/// Parse and validate a listing condition.
///
/// # Errors
///
/// Returns a validation error for anything but `New`, `Like New`, or
/// `Used`.
pub fn validate_condition(condition: &str) -> Result<Condition> {
    Condition::parse(condition).ok_or_else(|| {
        MarketError::validation("Invalid condition. It must be one of: New, Like New, Used.")
    })
}

/// Validate and trim a meetup location.
///
/// # Errors
///
/// Returns a validation error for a blank location.
pub fn validate_location(location: &str) -> Result<String> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        Err(MarketError::validation("Location details are required."))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Validate a review rating into the 1–5 range.
///
/// # Errors
///
/// Returns a validation error for ratings outside the range.
pub fn validate_rating(rating: i64) -> Result<u8> {
    if (1..=5).contains(&rating) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(rating as u8)
    } else {
        Err(MarketError::validation(
            "Invalid review data. Ensure all fields are provided and rating is between 1 and 5.",
        ))
    }
}
