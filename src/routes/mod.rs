//! Router assembly.

mod common;
mod resource;
mod token;

pub use common::{common_routes, not_found};
pub use resource::resource_routes;
pub use token::token_routes;

use crate::config::ServerConfig;
use crate::entities::{AccPermission, Area, Office, UserActionLog};
use crate::error::ConfigError;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// The full application: resource routers, token validation, operational routes and middleware.
pub fn app(state: AppState, server: &ServerConfig) -> Result<Router, ConfigError> {
    let router = Router::new()
        .nest("/offices", resource_routes(state.repository::<Office>()?))
        .nest("/areas", resource_routes(state.repository::<Area>()?))
        .nest("/acc_permissions", resource_routes(state.repository::<AccPermission>()?))
        .nest("/user_actions_log", resource_routes(state.repository::<UserActionLog>()?))
        .nest("/middleware", token_routes(state.clone()))
        .merge(common_routes(state))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(server.body_limit))
        .layer(TimeoutLayer::new(server.request_timeout))
        .layer(TraceLayer::new_for_http());
    Ok(router)
}
