//! Error types for marketplace operations.

use thiserror::Error;

/// Result type alias for marketplace operations.
pub type Result<T> = std::result::Result<T, MarketError>;

/// Error taxonomy for the marketplace.
///
/// Variants map one-to-one onto the HTTP statuses the web layer
/// answers with: validation and conflict errors become 400, missing
/// sessions 401, wrong actors 403, missing resources 404, and storage
/// failures 500 (with the detail logged server-side only).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// Malformed or out-of-range input. Always raised before any
    /// mutation.
    #[error("{0}")]
    Validation(String),

    /// No session, or the session is unknown or expired.
    #[error("Unauthorized")]
    Unauthorized,

    /// The caller is authenticated but is the wrong actor for this
    /// operation (e.g. a buyer confirming receipt on someone else's
    /// listing).
    #[error("{0}")]
    Forbidden(String),

    /// A referenced record does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Human-readable name of the missing resource.
        resource: &'static str,
    },

    /// The operation contradicts current state (already reserved,
    /// duplicate review, deletion precondition).
    #[error("{0}")]
    Conflict(String),

    /// The store failed. The message is for the server log, not the
    /// client.
    #[error("storage error: {0}")]
    Storage(String),
}

impl MarketError {
    /// Shorthand for a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Shorthand for a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Returns `true` if this error is caused by client input or
    /// client state rather than a server fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}
