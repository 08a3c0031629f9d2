//! HTTP surface for Campus Market.
//!
//! Axum handlers over the storage providers in
//! `campus-market-store`, with session-cookie authentication, the
//! read-time enrichment layer, and the [`AppError`] bridge from domain
//! errors to HTTP responses.

pub mod config;
pub mod enrich;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use router::app_router;
pub use state::AppState;
