//! Idempotent ArangoDB bootstrap.
//!
//! Ensures that a database, its collections and their indexes exist,
//! creating whatever is missing. Every ensure call looks the resource up by
//! name first, so repeated calls are safe.
//!
//! ## Structure
//!
//! - `infrastructure/` - Config, the driver port and its HTTP and in-memory adapters
//! - `entities/` - Database and collection handles
//! - `use_cases/` - The bootstrap operations
//! - `convert` - Record to JSON map conversion
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use arango_bootstrap::{
//!     bootstrap_collection, bootstrap_database, bootstrap_ttl_index, ArangoConfig,
//!     CreateCollectionOptions, TtlIndex, TtlIndexOptions,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ArangoConfig::from_env()?;
//! let db = bootstrap_database(&config).await?;
//! let (_, sessions) =
//!     bootstrap_collection(&db, "sessions", &CreateCollectionOptions::document()).await?;
//! bootstrap_ttl_index(
//!     &sessions,
//!     &TtlIndex::new("expires_at", Duration::from_secs(3600), TtlIndexOptions::named("sessions_ttl")),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod entities;
pub mod error;
pub mod infrastructure;
pub mod use_cases;

/// E2E tests against a real ArangoDB via testcontainers.
#[cfg(test)]
mod e2e_tests;

pub use convert::to_map;
pub use entities::{Collection, Database};
pub use error::{BootstrapError, Operation, Resource};
pub use infrastructure::config::ArangoConfig;
pub use infrastructure::http::{Credentials, HttpDriver};
pub use infrastructure::ports::{
    ArangoDriver, CollectionType, CreateCollectionOptions, DriverError, KeyGenerator, KeyOptions,
    PersistentIndex, PersistentIndexOptions, TtlIndex, TtlIndexOptions,
};
pub use use_cases::{
    bootstrap_collection, bootstrap_database, bootstrap_database_with,
    bootstrap_persistent_index, bootstrap_ttl_index,
};
