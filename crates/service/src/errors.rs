use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid document id: {0}")]
    InvalidId(String),
    #[error("invalid payload: {0}")]
    Payload(String),
    #[error("store error: {0}")]
    Store(String),
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        use models::errors::ModelError;
        match e {
            ModelError::InvalidId(m) => ServiceError::InvalidId(m),
            ModelError::Payload(m) => ServiceError::Payload(m),
        }
    }
}

impl From<mongodb::error::Error> for ServiceError {
    fn from(e: mongodb::error::Error) -> Self {
        ServiceError::Store(e.to_string())
    }
}
