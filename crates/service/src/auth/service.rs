use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::domain::{Claims, TokenConfig};
use super::errors::AuthError;

/// Upper bound on token lifetime so expiry arithmetic cannot overflow.
const MAX_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Issues and verifies bearer tokens with one process-wide secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(cfg: TokenConfig) -> Self {
        let ttl_secs = cfg.ttl_secs.min(MAX_TTL_SECS) as i64;
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Sign `claims` with an expiry of now + ttl.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{domain::TokenConfig, TokenService};
    /// let svc = TokenService::new(TokenConfig { secret: "secret".into(), ttl_secs: 86_400 });
    /// let mut claims = serde_json::Map::new();
    /// claims.insert("email".into(), "a@x.com".into());
    /// let token = svc.issue(claims).unwrap();
    /// let decoded = svc.verify(&token).unwrap();
    /// assert_eq!(decoded.extra["email"], "a@x.com");
    /// assert_eq!(decoded.exp - decoded.iat, 86_400);
    /// ```
    pub fn issue(&self, claims: Map<String, Value>) -> Result<String, AuthError> {
        self.issue_at(claims, Utc::now())
    }

    /// Sign `claims` as if issued at `issued_at`. Caller-supplied `iat`/`exp` are replaced.
    pub fn issue_at(&self, mut claims: Map<String, Value>, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        claims.remove("iat");
        claims.remove("exp");
        let iat = issued_at.timestamp();
        let exp = (issued_at + self.ttl).timestamp();
        let claims = Claims { extra: claims, iat, exp };
        encode(&JwtHeader::default(), &claims, &self.encoding).map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Check signature and expiry, returning the decoded claims.
    #[instrument(skip_all)]
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(err = %e, "token rejected");
                AuthError::InvalidToken(e.to_string())
            })
    }

    /// Verify the raw `Authorization` header value.
    ///
    /// The token is the second space-separated word; the scheme word itself is
    /// not checked. An empty header counts as missing; one that is not valid
    /// UTF-8 counts as an invalid token.
    pub fn authorize(&self, header: Option<&[u8]>) -> Result<Claims, AuthError> {
        let raw = header.filter(|h| !h.is_empty()).ok_or(AuthError::MissingCredential)?;
        let value = std::str::from_utf8(raw).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let token = value.split(' ').nth(1).unwrap_or_default();
        self.verify(token)
    }
}
