//! Storage provider traits.
//!
//! Each trait abstracts one collection. Implementations must be cheap
//! to clone (handlers hold them in shared state) and every method
//! returns a `Send` future so handlers stay `Send`.

mod listing;
mod review;
mod session;
mod user;

pub use listing::ListingStore;
pub use review::ReviewStore;
pub use session::SessionStore;
pub use user::UserStore;
