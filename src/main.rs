//! Shipping quote HTTP server.
//!
//! Loads configuration, picks a rate repository (PostgreSQL when
//! `database.url` is set, in-memory otherwise), seeds an empty store and
//! serves the REST API until Ctrl-C.

use anyhow::Context;
use shipping_quote::api::rest::{AppState, create_router};
use shipping_quote::config::{AppConfig, DatabaseConfig};
use shipping_quote::infrastructure::persistence::in_memory::InMemoryRateRepository;
use shipping_quote::infrastructure::persistence::postgres::PostgresRateRepository;
use shipping_quote::infrastructure::persistence::{RateRepository, RateStore};
use shipping_quote::infrastructure::seed::{load_seed_file, seed_if_empty};
use shipping_quote::telemetry;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

type Repositories = (Arc<dyn RateRepository>, Arc<dyn RateStore>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.logging).context("failed to initialise logging")?;

    let (repository, store) = open_repositories(&config.database).await?;

    if config.seed.enabled {
        let seed = load_seed_file(&config.seed.path)
            .await
            .context("failed to load rate seed")?;
        let written = seed_if_empty(store.as_ref(), &seed)
            .await
            .context("failed to seed rate store")?;
        info!(path = %config.seed.path.display(), written, "rate seed applied");
    }

    let engine = Arc::new(config.build_engine(repository));
    let router = create_router(Arc::new(AppState::new(engine)));

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(%address, version = env!("CARGO_PKG_VERSION"), "shipping quote server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn open_repositories(database: &DatabaseConfig) -> anyhow::Result<Repositories> {
    match &database.url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(url)
                .await
                .context("failed to connect to PostgreSQL")?;
            let repository = Arc::new(PostgresRateRepository::new(pool));
            repository
                .create_schema()
                .await
                .context("failed to create rate schema")?;
            info!("using PostgreSQL rate repository");
            let store: Arc<dyn RateStore> = repository.clone();
            let repository: Arc<dyn RateRepository> = repository;
            Ok((repository, store))
        }
        None => {
            let repository = Arc::new(InMemoryRateRepository::new());
            info!("no database configured, using in-memory rate repository");
            let store: Arc<dyn RateStore> = repository.clone();
            let repository: Arc<dyn RateRepository> = repository;
            Ok((repository, store))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
