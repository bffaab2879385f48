//! Bearer token validation.
//!
//! [`JwtValidator`] checks HS256 signatures and the `exp` claim. Claims are
//! returned as raw JSON so callers are not tied to one payload shape.

use crate::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;

pub trait TokenValidator: Send + Sync {
    /// Claims of a valid token, or [`AppError::Unauthorized`].
    fn validate(&self, token: &str) -> Result<Value, AppError>;
}

pub struct JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(secret: &str) -> Self {
        JwtValidator {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl TokenValidator for JwtValidator {
    fn validate(&self, token: &str) -> Result<Value, AppError> {
        decode::<Value>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                AppError::Unauthorized("invalid token".into())
            })
    }
}
