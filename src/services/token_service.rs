use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::models::{Claims, User};
use crate::utils::{AppError, AuthFailure, JwtConfig};

/// Issues and verifies HS256 access tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: config.ttl,
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            aud: self.audience.clone(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                AppError::Authentication(AuthFailure::InvalidToken)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, minutes: i64) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            issuer: "bookmark-service".to_string(),
            audience: "bookmark-api".to_string(),
            ttl: Duration::minutes(minutes),
        }
    }

    fn user() -> User {
        let now = Utc::now();
        User {
            id: 42,
            email: "saitama@test.com".to_string(),
            hash: "h".to_string(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn issued_token_carries_id_and_email() {
        let tokens = TokenService::new(&config("secret", 15));
        let claims = tokens.verify(&tokens.issue(&user()).unwrap()).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "saitama@test.com");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let theirs = TokenService::new(&config("other", 15));
        let ours = TokenService::new(&config("secret", 15));
        let token = theirs.issue(&user()).unwrap();

        assert!(matches!(
            ours.verify(&token),
            Err(AppError::Authentication(AuthFailure::InvalidToken))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        // beyond jsonwebtoken's default 60s leeway
        let tokens = TokenService::new(&config("secret", -5));
        let token = tokens.issue(&user()).unwrap();
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let tokens = TokenService::new(&config("secret", 15));
        assert!(tokens.verify("not.a.jwt").is_err());
    }
}
