//! Office administration REST backend: CRUD over offices, areas, access permissions
//! and user action logs, plus bearer token validation.

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod repository;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use auth::{JwtValidator, TokenValidator};
pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use repository::Repository;
pub use response::{success_many, success_one};
pub use routes::app;
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};
