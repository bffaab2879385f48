//! Auxiliary middleware routes, mounted at `/middleware`.

use crate::handlers::validate_token;
use crate::routes::not_found;
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn token_routes(state: AppState) -> Router {
    Router::new()
        .route("/validate-token", post(validate_token).fallback(not_found))
        .with_state(state)
}
