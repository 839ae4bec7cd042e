use thiserror::Error;

/// Token gate failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing credential")]
    MissingCredential,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingCredential => 1001,
            AuthError::InvalidToken(_) => 1004,
            AuthError::Signing(_) => 1102,
        }
    }
}
