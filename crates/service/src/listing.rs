use std::sync::Arc;

use models::{ack::InsertAck, doc_id, listing, render, Document};
use serde_json::Value;
use tracing::instrument;

use crate::errors::ServiceError;
use crate::store::DocumentStore;

/// Service listings: list, look up by id, insert.
#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn DocumentStore>,
}

impl ListingService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self { Self { store } }

    /// All listings, or the first `PREVIEW_LIMIT` when `preview` is set.
    pub async fn list(&self, preview: bool) -> Result<Vec<Document>, ServiceError> {
        self.store.find_many(listing::COLLECTION, listing::all(), listing::limit_for(preview)).await
    }

    /// `None` when no listing has this id. A malformed id is an error.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Option<Document>, ServiceError> {
        let filter = doc_id::filter_str(id)?;
        self.store.find_one(listing::COLLECTION, filter).await
    }

    /// Store the payload as-is.
    pub async fn create(&self, payload: Value) -> Result<InsertAck, ServiceError> {
        let doc = render::json_to_document(payload)?;
        self.store.insert_one(listing::COLLECTION, doc).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn svc() -> ListingService {
        ListingService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn preview_returns_three() -> Result<(), ServiceError> {
        let s = svc();
        for i in 0..5 {
            s.create(json!({ "name": format!("cut {i}") })).await?;
        }
        assert_eq!(s.list(true).await?.len(), 3);
        assert_eq!(s.list(false).await?.len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn get_by_id() -> Result<(), ServiceError> {
        let s = svc();
        let ack = s.create(json!({ "name": "Fade", "price": 20 })).await?;
        let id = ack.inserted_id.as_object_id().map(|o| o.to_hex()).unwrap_or_default();

        let found = s.get(&id).await?.expect("listing exists");
        assert_eq!(found.get_str("name").unwrap(), "Fade");

        assert!(s.get("64b7f0c2a1b2c3d4e5f60718").await?.is_none());
        assert!(matches!(s.get("nope").await, Err(ServiceError::InvalidId(_))));
        Ok(())
    }

    #[tokio::test]
    async fn non_object_payload_is_rejected() {
        let s = svc();
        assert!(matches!(s.create(json!(42)).await, Err(ServiceError::Payload(_))));
    }
}
