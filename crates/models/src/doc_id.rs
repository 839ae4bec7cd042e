use bson::{doc, oid::ObjectId, Document};

use crate::errors::ModelError;

/// Parse a 24-hex-character document id.
pub fn parse(raw: &str) -> Result<ObjectId, ModelError> {
    ObjectId::parse_str(raw).map_err(|e| ModelError::InvalidId(format!("{raw:?}: {e}")))
}

/// `{ _id: <id> }`
pub fn filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// Parse then build the `_id` filter in one step.
pub fn filter_str(raw: &str) -> Result<Document, ModelError> {
    parse(raw).map(filter)
}
