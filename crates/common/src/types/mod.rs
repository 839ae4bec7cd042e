use serde::{Deserialize, Serialize};

/// Plain-text body answered by `GET /`.
pub const LIVENESS_TEXT: &str = "Hair cut server is running";

/// `{"message": ...}` body used by the token gate rejections.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
