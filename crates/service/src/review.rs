use std::sync::Arc;

use models::{
    ack::{DeleteAck, InsertAck, UpdateAck},
    doc_id, render, review, Bson, Document,
};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::store::DocumentStore;

/// Customer reviews: insert, list by optional filter, replace comment, delete.
#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn DocumentStore>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self { Self { store } }

    pub async fn create(&self, payload: Value) -> Result<InsertAck, ServiceError> {
        debug!(review = %payload, "review received");
        let doc = render::json_to_document(payload)?;
        self.store.insert_one(review::COLLECTION, doc).await
    }

    /// All reviews, or only those written by `email`.
    pub async fn list(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError> {
        self.store.find_many(review::COLLECTION, review::by_email(email), None).await
    }

    /// Reviews whose `service_id` string equals `service_id`.
    pub async fn by_service_id(&self, service_id: &str) -> Result<Vec<Document>, ServiceError> {
        self.store.find_many(review::COLLECTION, review::by_service_id(service_id), None).await
    }

    /// Replace the `comment` field and nothing else. `None` writes null.
    #[instrument(skip(self, comment))]
    pub async fn update_comment(&self, id: &str, comment: Option<Value>) -> Result<UpdateAck, ServiceError> {
        let filter = doc_id::filter_str(id)?;
        let comment = match comment {
            Some(v) => bson::to_bson(&v).map_err(|e| ServiceError::Payload(e.to_string()))?,
            None => Bson::Null,
        };
        self.store.update_one(review::COLLECTION, filter, review::set_comment(comment)).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<DeleteAck, ServiceError> {
        let filter = doc_id::filter_str(id)?;
        self.store.delete_one(review::COLLECTION, filter).await
    }
}
