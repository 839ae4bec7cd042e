//! Write acknowledgements, serialized the way the driver reports them to
//! clients: `acknowledged` plus camelCase counters.

use bson::Bson;
use serde::Serialize;

use crate::render::{serialize_bson, serialize_opt_bson};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    #[serde(serialize_with = "serialize_bson")]
    pub inserted_id: Bson,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[serde(serialize_with = "serialize_opt_bson")]
    pub upserted_id: Option<Bson>,
    pub upserted_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl InsertAck {
    pub fn new(inserted_id: Bson) -> Self {
        Self { acknowledged: true, inserted_id }
    }
}

impl UpdateAck {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self { acknowledged: true, matched_count, modified_count, upserted_id: None, upserted_count: 0 }
    }
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self {
        Self { acknowledged: true, deleted_count }
    }
}

impl From<mongodb::results::InsertOneResult> for InsertAck {
    fn from(r: mongodb::results::InsertOneResult) -> Self {
        InsertAck::new(r.inserted_id)
    }
}

impl From<mongodb::results::UpdateResult> for UpdateAck {
    fn from(r: mongodb::results::UpdateResult) -> Self {
        let upserted_count = u64::from(r.upserted_id.is_some());
        Self {
            acknowledged: true,
            matched_count: r.matched_count,
            modified_count: r.modified_count,
            upserted_id: r.upserted_id,
            upserted_count,
        }
    }
}

impl From<mongodb::results::DeleteResult> for DeleteAck {
    fn from(r: mongodb::results::DeleteResult) -> Self {
        DeleteAck::new(r.deleted_count)
    }
}
