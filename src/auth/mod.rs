pub mod password;

use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by a bearer token: the user's identity plus issue and
/// expiry timestamps. Stateless; nothing is stored server-side.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: String, expiry_secs: u64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry_secs as i64)).timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token generation failed: {0}")]
    TokenGeneration(String),

    #[error("empty signing secret")]
    EmptySecret,

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Sign a token for an authenticated user.
pub fn generate_token(secret: &str, claims: &Claims) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::EmptySecret);
    }
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry; returns the claims on success.
///
/// All failure modes (bad signature, expired, malformed) collapse to
/// None — the caller only needs valid/invalid.
pub fn validate_token(secret: &str, token: &str) -> Option<Claims> {
    if secret.is_empty() {
        return None;
    }
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &decoding_key, &Validation::default())
        .ok()
        .map(|data| data.claims)
}

/// Extract a bearer token from the Authorization header.
///
/// Missing, non-UTF-8, non-Bearer, and empty-token headers are all
/// rejected here rather than faulting downstream.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn token_round_trips() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "alice@example.com".to_string(), 3600);
        let token = generate_token(SECRET, &claims).unwrap();

        let decoded = validate_token(SECRET, &token).expect("token should validate");
        assert_eq!(decoded.sub, user_id);
        assert_eq!(decoded.email, "alice@example.com");
        assert!(decoded.exp > decoded.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = Claims::new(Uuid::new_v4(), "a@b.c".to_string(), 3600);
        let token = generate_token(SECRET, &claims).unwrap();
        assert!(validate_token("other-secret", &token).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        // jsonwebtoken's default leeway is 60s; go well past it.
        let mut claims = Claims::new(Uuid::new_v4(), "a@b.c".to_string(), 3600);
        claims.exp = (Utc::now() - Duration::seconds(300)).timestamp();
        let token = generate_token(SECRET, &claims).unwrap();
        assert!(validate_token(SECRET, &token).is_none());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(validate_token(SECRET, "not-a-jwt").is_none());
        assert!(validate_token(SECRET, "").is_none());
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let claims = Claims::new(Uuid::new_v4(), "a@b.c".to_string(), 3600);
        assert!(generate_token("", &claims).is_err());
    }

    #[test]
    fn bearer_extraction_handles_missing_and_malformed_headers() {
        let headers = HeaderMap::new();
        assert!(extract_bearer(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc123"));
        assert!(extract_bearer(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert!(extract_bearer(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer(&headers).as_deref(), Some("abc.def.ghi"));
    }
}
