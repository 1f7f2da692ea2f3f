use crate::core::errors::CatalogError;
use crate::core::models::user::Role;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

pub const NO_TOKEN: &str = "Unauthorized: No token provided";
pub const INVALID_TOKEN: &str = "Unauthorized: Invalid token";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub id: String, // User ID
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl JwtService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        JwtService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    pub fn generate_token(&self, user_id: &str, role: Role) -> Result<String, CatalogError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|e| CatalogError::InternalServerError(format!("Time error: {}", e)))?;

        let claims = Claims {
            id: user_id.to_string(),
            role,
            iat: now as usize,
            exp: (now + self.ttl_secs) as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| CatalogError::InternalServerError(format!("JWT encoding error: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, CatalogError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(|e| {
            tracing::debug!("rejected token: {}", e);
            CatalogError::Unauthenticated(INVALID_TOKEN.to_string())
        })?;

        Ok(token_data.claims)
    }
}
