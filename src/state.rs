//! Shared application state: the store, the table namespace and the optional token validator.

use crate::auth::TokenValidator;
use crate::entities::{AccPermission, Area, Office, UserActionLog};
use crate::error::{AppError, ConfigError};
use crate::repository::Repository;
use crate::schema::Entity;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub namespace: String,
    /// Unset when no signing secret is configured; token validation then answers 503.
    pub tokens: Option<Arc<dyn TokenValidator>>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, namespace: impl Into<String>) -> Self {
        AppState {
            store,
            namespace: namespace.into(),
            tokens: None,
        }
    }

    pub fn with_tokens(mut self, validator: Arc<dyn TokenValidator>) -> Self {
        self.tokens = Some(validator);
        self
    }

    pub fn repository<E: Entity>(&self) -> Result<Repository<E>, ConfigError> {
        Repository::new(Arc::clone(&self.store), &self.namespace)
    }

    /// Create every entity table that does not exist yet.
    pub async fn sync_schemas(&self) -> Result<(), AppError> {
        self.repository::<Office>()?.ensure_table().await?;
        self.repository::<Area>()?.ensure_table().await?;
        self.repository::<AccPermission>()?.ensure_table().await?;
        self.repository::<UserActionLog>()?.ensure_table().await?;
        tracing::info!(namespace = %self.namespace, "entity tables ready");
        Ok(())
    }
}
