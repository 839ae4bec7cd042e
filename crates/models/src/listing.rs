//! Service listings: free-form documents, read back as stored.

use bson::Document;

pub const COLLECTION: &str = "services";

/// Number of listings returned when the `limit` flag is present.
pub const PREVIEW_LIMIT: i64 = 3;

/// Listings are never filtered.
pub fn all() -> Document {
    Document::new()
}

/// `Some(PREVIEW_LIMIT)` when the preview flag was sent.
pub fn limit_for(preview: bool) -> Option<i64> {
    preview.then_some(PREVIEW_LIMIT)
}
