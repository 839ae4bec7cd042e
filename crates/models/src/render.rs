//! BSON <-> JSON conversion for request and response bodies.
//!
//! Object ids go out as bare 24-hex strings and dates as RFC 3339 strings;
//! everything else uses relaxed extended JSON.

use bson::{Bson, Document};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::errors::ModelError;

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect())
}

/// Request payload to a storable document. Only JSON objects are accepted.
pub fn json_to_document(value: Value) -> Result<Document, ModelError> {
    match value {
        Value::Object(map) => bson::to_document(&map).map_err(|e| ModelError::Payload(e.to_string())),
        other => Err(ModelError::Payload(format!("expected a JSON object, got {}", kind(&other)))),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn serialize_bson<S: Serializer>(value: &Bson, s: S) -> Result<S::Ok, S::Error> {
    bson_to_json(value.clone()).serialize(s)
}

pub(crate) fn serialize_opt_bson<S: Serializer>(value: &Option<Bson>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => bson_to_json(v.clone()).serialize(s),
        None => s.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn object_ids_render_as_hex() {
        let id = ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60718").unwrap();
        let out = document_to_json(doc! { "_id": id, "name": "Fade", "price": 25, "tags": [id] });
        assert_eq!(
            out,
            json!({ "_id": "64b7f0c2a1b2c3d4e5f60718", "name": "Fade", "price": 25, "tags": ["64b7f0c2a1b2c3d4e5f60718"] })
        );
    }

    #[test]
    fn payloads_keep_their_fields() {
        let doc = json_to_document(json!({ "reviewer_email": "a@x.com", "service_id": "S1", "nested": { "n": 1.5 } })).unwrap();
        assert_eq!(doc.get_str("service_id").unwrap(), "S1");
        assert_eq!(doc.get_document("nested").unwrap().get_f64("n").unwrap(), 1.5);
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(matches!(json_to_document(json!([1, 2])), Err(ModelError::Payload(_))));
        assert!(matches!(json_to_document(json!("x")), Err(ModelError::Payload(_))));
    }
}
