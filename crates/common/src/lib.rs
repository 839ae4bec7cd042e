pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_with_message_key() {
        let m = types::Message::new("unauthorized access");
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v, serde_json::json!({ "message": "unauthorized access" }));
    }

    #[test]
    fn liveness_text_is_stable() {
        assert_eq!(types::LIVENESS_TEXT, "Hair cut server is running");
    }
}
