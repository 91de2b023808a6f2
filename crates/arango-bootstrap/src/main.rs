//! arango-bootstrap - provision the configured database and collections.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arango_bootstrap::{bootstrap_collection, bootstrap_database, ArangoConfig, CreateCollectionOptions};

/// Optional comma-separated list of document collections to ensure.
const ENV_COLLECTIONS: &str = "ARANGODB_COLLECTIONS";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the variables may come from the environment.
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arango_bootstrap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ArangoConfig::from_env()?;
    tracing::info!(
        endpoints = ?config.endpoints,
        database = %config.database,
        "Bootstrapping ArangoDB"
    );

    let db = bootstrap_database(&config)
        .await
        .context("database bootstrap failed")?;

    let collections = std::env::var(ENV_COLLECTIONS).unwrap_or_default();
    for name in collections.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (created, collection) =
            bootstrap_collection(&db, name, &CreateCollectionOptions::document())
                .await
                .with_context(|| format!("collection bootstrap failed for `{name}`"))?;
        tracing::info!(
            collection = %collection.name(),
            created,
            "Collection ready"
        );
    }

    tracing::info!(database = %db.name(), "ArangoDB bootstrap complete");
    Ok(())
}
