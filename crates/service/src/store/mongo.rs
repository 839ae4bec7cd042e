use async_trait::async_trait;
use futures::TryStreamExt;
use models::{
    ack::{DeleteAck, InsertAck, UpdateAck},
    Document,
};
use mongodb::{options::FindOptions, Collection, Database};

use super::DocumentStore;
use crate::errors::ServiceError;

/// MongoDB-backed store sharing one pooled `Database` handle.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self { Self { db } }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_many(&self, collection: &str, filter: Document, limit: Option<i64>) -> Result<Vec<Document>, ServiceError> {
        let opts = FindOptions::builder().limit(limit).build();
        let cursor = self.collection(collection).find(filter, opts).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, ServiceError> {
        Ok(self.collection(collection).find_one(filter, None).await?)
    }

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertAck, ServiceError> {
        let res = self.collection(collection).insert_one(doc, None).await?;
        Ok(res.into())
    }

    async fn update_one(&self, collection: &str, filter: Document, update: Document) -> Result<UpdateAck, ServiceError> {
        let res = self.collection(collection).update_one(filter, update, None).await?;
        Ok(res.into())
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteAck, ServiceError> {
        let res = self.collection(collection).delete_one(filter, None).await?;
        Ok(res.into())
    }
}
