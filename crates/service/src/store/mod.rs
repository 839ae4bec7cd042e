//! Document store abstraction.
//!
//! `MongoStore` is the production backend; `memory::MemoryStore` backs tests
//! and local runs without a cluster.

use async_trait::async_trait;
use models::{
    ack::{DeleteAck, InsertAck, UpdateAck},
    Document,
};

use crate::errors::ServiceError;

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// One call per operation, named after the collection it targets.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_many(&self, collection: &str, filter: Document, limit: Option<i64>) -> Result<Vec<Document>, ServiceError>;
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, ServiceError>;
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertAck, ServiceError>;
    async fn update_one(&self, collection: &str, filter: Document, update: Document) -> Result<UpdateAck, ServiceError>;
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteAck, ServiceError>;
}
