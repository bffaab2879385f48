use office_admin::{app, db, AppConfig, AppState, JwtValidator, PgStore};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("office_admin=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let pool = db::connect(&config.db).await?;
    let mut state = AppState::new(Arc::new(PgStore::new(pool)), config.db.schema.clone());
    match &config.auth.jwt_secret {
        Some(secret) => state = state.with_tokens(Arc::new(JwtValidator::new(secret))),
        None => tracing::warn!("JWT_SECRET not set; token validation disabled"),
    }
    state.sync_schemas().await?;

    let router = app(state, &config.server)?;
    let listener = TcpListener::bind(config.server.bind_addr).await?;
    tracing::info!("office-admin listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
