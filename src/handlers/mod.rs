//! HTTP handlers for entity CRUD and token validation.

pub mod entity;
pub mod token;
pub use token::validate_token;
