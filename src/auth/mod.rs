pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SecurityConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, username: String, security: &SecurityConfig) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(security.jwt_expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            username,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Password hashing error: {0}")]
    Hashing(String),
}

pub fn generate_jwt(claims: &Claims, security: &SecurityConfig) -> Result<String, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, returning the embedded claims
pub fn validate_jwt(token: &str, security: &SecurityConfig) -> Result<Claims, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn issued_token_validates() {
        let config = AppConfig::for_testing();
        let id = Uuid::new_v4();
        let token = generate_jwt(&Claims::new(id, "ana".into(), &config.security), &config.security).unwrap();

        let claims = validate_jwt(&token, &config.security).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.username, "ana");
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let config = AppConfig::for_testing();
        let mut other = config.security.clone();
        other.jwt_secret = "another-secret".into();

        let token = generate_jwt(&Claims::new(Uuid::new_v4(), "ana".into(), &other), &other).unwrap();
        assert!(matches!(
            validate_jwt(&token, &config.security),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let config = AppConfig::for_testing();
        let mut claims = Claims::new(Uuid::new_v4(), "ana".into(), &config.security);
        claims.exp = Utc::now().timestamp() - 3600;
        claims.iat = claims.exp - 60;

        let token = generate_jwt(&claims, &config.security).unwrap();
        assert!(validate_jwt(&token, &config.security).is_err());
    }
}
