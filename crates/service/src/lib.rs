//! Service layer: the token gate and the listing/review operations, independent
//! of the web framework.
//! - Every operation maps to exactly one `DocumentStore` call.
//! - Payloads are passed through without validation; only document ids are parsed.

pub mod auth;
pub mod errors;
pub mod listing;
pub mod review;
pub mod store;

pub use listing::ListingService;
pub use review::ReviewService;
pub use store::DocumentStore;
