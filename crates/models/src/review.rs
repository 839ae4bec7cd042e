//! Customer reviews.
//!
//! `service_id` is kept as the plain string the client submitted and matched
//! by string equality; it is not a reference to a listing's `_id`.

use bson::{doc, Bson, Document};

pub const COLLECTION: &str = "reviews";

pub const REVIEWER_EMAIL: &str = "reviewer_email";
pub const SERVICE_ID: &str = "service_id";
pub const COMMENT: &str = "comment";

/// `{}` or `{ reviewer_email: <email> }`.
pub fn by_email(email: Option<&str>) -> Document {
    match email {
        Some(email) => doc! { REVIEWER_EMAIL: email },
        None => Document::new(),
    }
}

/// `{ service_id: <id> }`, string match.
pub fn by_service_id(service_id: &str) -> Document {
    doc! { SERVICE_ID: service_id }
}

/// `{ $set: { comment: <comment> } }`. Callers pass `Bson::Null` when the
/// request carried no comment.
pub fn set_comment(comment: Bson) -> Document {
    doc! { "$set": { COMMENT: comment } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_filter_is_optional() {
        assert!(by_email(None).is_empty());
        assert_eq!(by_email(Some("a@x.com")), doc! { "reviewer_email": "a@x.com" });
    }

    #[test]
    fn service_id_stays_a_string() {
        let f = by_service_id("64b7f0c2a1b2c3d4e5f60718");
        assert_eq!(f.get_str("service_id").unwrap(), "64b7f0c2a1b2c3d4e5f60718");
    }

    #[test]
    fn comment_update_touches_only_comment() {
        let u = set_comment(Bson::String("updated".into()));
        let set = u.get_document("$set").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("comment").unwrap(), "updated");

        let cleared = set_comment(Bson::Null);
        assert_eq!(cleared.get_document("$set").unwrap().get("comment"), Some(&Bson::Null));
    }
}
