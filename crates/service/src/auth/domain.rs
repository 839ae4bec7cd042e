use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims carried by an issued token: whatever the caller sent, plus the
/// registered `iat`/`exp` timestamps (seconds since the epoch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub iat: i64,
    pub exp: i64,
}

/// Claims of a request that passed the gate, stored in request extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedClaims(pub Claims);

/// Token service configuration
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_secs: u64,
}

/// `{"token": ...}` response of the issuance endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
}
