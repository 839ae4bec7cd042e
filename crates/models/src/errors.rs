use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid document id: {0}")]
    InvalidId(String),
    #[error("invalid payload: {0}")]
    Payload(String),
}
