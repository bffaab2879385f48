//! Token validation endpoint.

use crate::error::AppError;
use crate::extractors::BearerToken;
use crate::response::success_one_ok;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
pub struct TokenBody {
    pub token: Option<String>,
}

/// POST /middleware/validate-token. The `Authorization` header wins over a `token` in the body;
/// the body is optional and ignored when it is not valid JSON.
pub async fn validate_token(
    State(state): State<AppState>,
    BearerToken(header): BearerToken,
    body: Option<Json<TokenBody>>,
) -> Result<impl IntoResponse, AppError> {
    let validator = state
        .tokens
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("token validation is not configured".into()))?;
    let token = header
        .or_else(|| body.and_then(|Json(b)| b.token))
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Unauthorized("missing token".into()))?;
    let claims = validator.validate(token.trim())?;
    Ok(success_one_ok(json!({ "valid": true, "claims": claims })))
}
