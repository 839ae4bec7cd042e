//! Document-store vocabulary shared by the service and server crates.
//!
//! Collections are schemaless: documents travel as `bson::Document` and are
//! rendered back to JSON with `render`. Only the identifiers and the few
//! review fields used as filter keys are named here.

pub mod ack;
pub mod db;
pub mod doc_id;
pub mod errors;
pub mod listing;
pub mod render;
pub mod review;

pub use bson::{doc, oid::ObjectId, Bson, Document};
