use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use models::{
    ack::{DeleteAck, InsertAck, UpdateAck},
    Bson, Document, ObjectId,
};
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::errors::ServiceError;

/// In-memory store keeping documents per collection in insertion order.
///
/// Supports equality filters and `$set` updates, which is all the routes issue.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// Number of documents currently in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        let map = self.inner.read().await;
        map.get(collection).map(Vec::len).unwrap_or(0)
    }
}

fn matches_filter(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(k, v)| doc.get(k) == Some(v))
}

fn apply_set(doc: &mut Document, update: &Document) -> Result<bool, ServiceError> {
    let mut changed = false;
    for (op, fields) in update {
        let Bson::Document(fields) = fields else {
            return Err(ServiceError::Store(format!("update operator {op} expects a document")));
        };
        if op != "$set" {
            return Err(ServiceError::Store(format!("unsupported update operator {op}")));
        }
        for (k, v) in fields {
            if k == "_id" {
                return Err(ServiceError::Store("the _id field is immutable".into()));
            }
            if doc.get(k) != Some(v) {
                doc.insert(k.clone(), v.clone());
                changed = true;
            }
        }
    }
    Ok(changed)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_many(&self, collection: &str, filter: Document, limit: Option<i64>) -> Result<Vec<Document>, ServiceError> {
        let map = self.inner.read().await;
        let docs = map.get(collection).map(Vec::as_slice).unwrap_or_default();
        let hits = docs.iter().filter(|d| matches_filter(d, &filter)).cloned();
        // A limit of 0 means "no limit", as in the driver.
        Ok(match limit {
            Some(n) if n != 0 => hits.take(n.unsigned_abs() as usize).collect(),
            _ => hits.collect(),
        })
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches_filter(d, &filter)).cloned()))
    }

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertAck, ServiceError> {
        let mut map = self.inner.write().await;
        let docs = map.entry(collection.to_string()).or_default();

        let id = match doc.get("_id") {
            Some(id) => id.clone(),
            None => Bson::ObjectId(ObjectId::new()),
        };
        if docs.iter().any(|d| d.get("_id") == Some(&id)) {
            return Err(ServiceError::Store(format!("duplicate key {collection}._id: {id}")));
        }

        let mut stored = Document::new();
        stored.insert("_id", id.clone());
        for (k, v) in doc {
            if k != "_id" {
                stored.insert(k, v);
            }
        }
        docs.push(stored);
        Ok(InsertAck::new(id))
    }

    async fn update_one(&self, collection: &str, filter: Document, update: Document) -> Result<UpdateAck, ServiceError> {
        let mut map = self.inner.write().await;
        let Some(doc) = map
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches_filter(d, &filter)))
        else {
            return Ok(UpdateAck::new(0, 0));
        };
        let changed = apply_set(doc, &update)?;
        Ok(UpdateAck::new(1, u64::from(changed)))
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteAck, ServiceError> {
        let mut map = self.inner.write().await;
        let Some(docs) = map.get_mut(collection) else {
            return Ok(DeleteAck::new(0));
        };
        match docs.iter().position(|d| matches_filter(d, &filter)) {
            Some(idx) => {
                docs.remove(idx);
                Ok(DeleteAck::new(1))
            }
            None => Ok(DeleteAck::new(0)),
        }
    }
}
