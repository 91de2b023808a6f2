//! The ArangoDB driver port.
//!
//! Everything the bootstrap use cases need from a cluster goes through this
//! trait. Resources are addressed by name; the driver owns transport,
//! authentication and the wire format.

use async_trait::async_trait;

use super::error::DriverError;
use super::types::{
    CollectionInfo, CreateCollectionOptions, CreateDatabaseOptions, DatabaseInfo, DatabaseUser,
    EnsuredIndex, PersistentIndexOptions, TtlIndexOptions,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArangoDriver: Send + Sync {
    // Databases
    async fn database_exists(&self, name: &str) -> Result<bool, DriverError>;
    async fn open_database(&self, name: &str) -> Result<DatabaseInfo, DriverError>;
    async fn create_database(
        &self,
        name: &str,
        users: &[DatabaseUser],
        options: &CreateDatabaseOptions,
    ) -> Result<(), DriverError>;

    // Collections
    async fn collection_exists(&self, database: &str, name: &str) -> Result<bool, DriverError>;
    async fn open_collection(
        &self,
        database: &str,
        name: &str,
    ) -> Result<CollectionInfo, DriverError>;
    async fn create_collection(
        &self,
        database: &str,
        name: &str,
        options: &CreateCollectionOptions,
    ) -> Result<CollectionInfo, DriverError>;

    // Indexes (looked up by name)
    async fn index_exists(
        &self,
        database: &str,
        collection: &str,
        name: &str,
    ) -> Result<bool, DriverError>;
    async fn ensure_persistent_index(
        &self,
        database: &str,
        collection: &str,
        fields: &[String],
        options: &PersistentIndexOptions,
    ) -> Result<EnsuredIndex, DriverError>;
    async fn ensure_ttl_index(
        &self,
        database: &str,
        collection: &str,
        field: &str,
        expire_after_secs: u64,
        options: &TtlIndexOptions,
    ) -> Result<EnsuredIndex, DriverError>;
}
