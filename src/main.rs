//! Agentic Finance server entry point

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agentic_finance::{
    AppState,
    config::{Config, StorageBackend},
    create_router, db,
    store::{DecisionStore, MemoryStore, PgStore},
};

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "agentic_finance=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn DecisionStore>> {
    match config.storage {
        StorageBackend::Memory if config.is_production() => {
            anyhow::bail!("In-memory decision store is not allowed in production")
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory decision store; decisions are lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            tracing::info!("Database: {}", config.redacted_database_url());

            let pool = db::create_pool(&config.database_url, config.max_connections).await
                .context("Failed to create database pool")?;

            tracing::info!("Running database migrations...");
            db::run_migrations(&pool).await
                .context("Failed to run migrations")?;

            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    init_tracing(config.log_json);
    tracing::info!("Agentic Finance decision service starting ({})...", config.environment);

    let store = open_store(&config).await?;
    let state = AppState::new(config.clone(), store);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await
        .context("Server error")?;

    Ok(())
}
