//! In-memory driver for tests and local experiments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{
    ArangoDriver, CollectionInfo, CreateCollectionOptions, CreateDatabaseOptions, DatabaseInfo,
    DatabaseUser, DriverError, EnsuredIndex, PersistentIndexOptions, TtlIndexOptions,
};

/// ArangoDB "duplicate name" error number.
const ERROR_DUPLICATE_NAME: i64 = 1207;
/// ArangoDB "database not found" error number.
const ERROR_DATABASE_NOT_FOUND: i64 = 1228;
/// ArangoDB "collection or view not found" error number.
const ERROR_COLLECTION_NOT_FOUND: i64 = 1203;

/// Index stored by the fake, as it was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredIndex {
    Persistent {
        fields: Vec<String>,
        options: PersistentIndexOptions,
    },
    Ttl {
        field: String,
        expire_after_secs: u64,
        options: TtlIndexOptions,
    },
}

#[derive(Debug)]
struct StoredCollection {
    info: CollectionInfo,
    options: CreateCollectionOptions,
    indexes: Vec<(String, StoredIndex)>,
}

#[derive(Debug, Default)]
struct StoredDatabase {
    users: Vec<DatabaseUser>,
    collections: HashMap<String, StoredCollection>,
}

#[derive(Debug, Default)]
struct State {
    databases: HashMap<String, StoredDatabase>,
    next_id: u64,
    create_calls: usize,
}

impl State {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    fn database_mut(&mut self, name: &str) -> Result<&mut StoredDatabase, DriverError> {
        self.databases
            .get_mut(name)
            .ok_or_else(|| not_found(ERROR_DATABASE_NOT_FOUND, "database not found"))
    }

    fn collection(&self, database: &str, name: &str) -> Result<&StoredCollection, DriverError> {
        self.databases
            .get(database)
            .ok_or_else(|| not_found(ERROR_DATABASE_NOT_FOUND, "database not found"))?
            .collections
            .get(name)
            .ok_or_else(|| not_found(ERROR_COLLECTION_NOT_FOUND, "collection or view not found"))
    }

    fn collection_mut(
        &mut self,
        database: &str,
        name: &str,
    ) -> Result<&mut StoredCollection, DriverError> {
        self.database_mut(database)?
            .collections
            .get_mut(name)
            .ok_or_else(|| not_found(ERROR_COLLECTION_NOT_FOUND, "collection or view not found"))
    }
}

/// Driver keeping databases, collections and indexes in memory.
///
/// Create calls on names that already exist fail with HTTP 409 the way the
/// server does.
#[derive(Debug, Default)]
pub struct InMemoryDriver {
    state: RwLock<State>,
}

impl InMemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of create calls (databases, collections and indexes) served so far.
    pub async fn create_calls(&self) -> usize {
        self.state.read().await.create_calls
    }

    /// Users provisioned when `database` was created.
    pub async fn database_users(&self, database: &str) -> Option<Vec<DatabaseUser>> {
        self.state
            .read()
            .await
            .databases
            .get(database)
            .map(|db| db.users.clone())
    }

    /// Options the collection was created with.
    pub async fn collection_options(
        &self,
        database: &str,
        collection: &str,
    ) -> Option<CreateCollectionOptions> {
        self.state
            .read()
            .await
            .databases
            .get(database)
            .and_then(|db| db.collections.get(collection))
            .map(|c| c.options.clone())
    }

    /// Index definition stored under `name`.
    pub async fn index(&self, database: &str, collection: &str, name: &str) -> Option<StoredIndex> {
        self.state
            .read()
            .await
            .databases
            .get(database)
            .and_then(|db| db.collections.get(collection))
            .and_then(|c| c.indexes.iter().find(|(n, _)| n == name))
            .map(|(_, index)| index.clone())
    }

    async fn store_index(
        &self,
        database: &str,
        collection: &str,
        name: &str,
        index: StoredIndex,
    ) -> Result<EnsuredIndex, DriverError> {
        let mut state = self.state.write().await;
        state.create_calls += 1;
        let id = state.next_id();
        let stored = state.collection_mut(database, collection)?;

        if let Some((_, existing)) = stored.indexes.iter().find(|(n, _)| n == name) {
            if *existing != index {
                return Err(DriverError::Server {
                    status: 409,
                    error_num: Some(ERROR_DUPLICATE_NAME),
                    message: format!("duplicate value for index name `{name}`"),
                });
            }
            return Ok(EnsuredIndex {
                id: format!("{collection}/{id}"),
                name: name.to_string(),
                created: false,
            });
        }

        stored.indexes.push((name.to_string(), index));
        Ok(EnsuredIndex {
            id: format!("{collection}/{id}"),
            name: name.to_string(),
            created: true,
        })
    }
}

fn not_found(error_num: i64, message: &str) -> DriverError {
    DriverError::Server {
        status: 404,
        error_num: Some(error_num),
        message: message.to_string(),
    }
}

fn duplicate_name() -> DriverError {
    DriverError::Server {
        status: 409,
        error_num: Some(ERROR_DUPLICATE_NAME),
        message: "duplicate name".to_string(),
    }
}

#[async_trait]
impl ArangoDriver for InMemoryDriver {
    async fn database_exists(&self, name: &str) -> Result<bool, DriverError> {
        Ok(self.state.read().await.databases.contains_key(name))
    }

    async fn open_database(&self, name: &str) -> Result<DatabaseInfo, DriverError> {
        if !self.state.read().await.databases.contains_key(name) {
            return Err(not_found(ERROR_DATABASE_NOT_FOUND, "database not found"));
        }
        Ok(DatabaseInfo {
            name: name.to_string(),
            id: name.to_string(),
            is_system: name == "_system",
        })
    }

    async fn create_database(
        &self,
        name: &str,
        users: &[DatabaseUser],
        _options: &CreateDatabaseOptions,
    ) -> Result<(), DriverError> {
        let mut state = self.state.write().await;
        state.create_calls += 1;
        if state.databases.contains_key(name) {
            return Err(duplicate_name());
        }
        state.databases.insert(
            name.to_string(),
            StoredDatabase {
                users: users.to_vec(),
                collections: HashMap::new(),
            },
        );
        Ok(())
    }

    async fn collection_exists(&self, database: &str, name: &str) -> Result<bool, DriverError> {
        let state = self.state.read().await;
        let db = state
            .databases
            .get(database)
            .ok_or_else(|| not_found(ERROR_DATABASE_NOT_FOUND, "database not found"))?;
        Ok(db.collections.contains_key(name))
    }

    async fn open_collection(
        &self,
        database: &str,
        name: &str,
    ) -> Result<CollectionInfo, DriverError> {
        let state = self.state.read().await;
        Ok(state.collection(database, name)?.info.clone())
    }

    async fn create_collection(
        &self,
        database: &str,
        name: &str,
        options: &CreateCollectionOptions,
    ) -> Result<CollectionInfo, DriverError> {
        let mut state = self.state.write().await;
        state.create_calls += 1;
        let id = state.next_id();
        let db = state.database_mut(database)?;
        if db.collections.contains_key(name) {
            return Err(duplicate_name());
        }

        let info = CollectionInfo {
            id,
            name: name.to_string(),
            collection_type: options.collection_type,
        };
        db.collections.insert(
            name.to_string(),
            StoredCollection {
                info: info.clone(),
                options: options.clone(),
                indexes: Vec::new(),
            },
        );
        Ok(info)
    }

    async fn index_exists(
        &self,
        database: &str,
        collection: &str,
        name: &str,
    ) -> Result<bool, DriverError> {
        let state = self.state.read().await;
        let stored = state.collection(database, collection)?;
        Ok(stored.indexes.iter().any(|(n, _)| n == name))
    }

    async fn ensure_persistent_index(
        &self,
        database: &str,
        collection: &str,
        fields: &[String],
        options: &PersistentIndexOptions,
    ) -> Result<EnsuredIndex, DriverError> {
        let index = StoredIndex::Persistent {
            fields: fields.to_vec(),
            options: options.clone(),
        };
        self.store_index(database, collection, &options.name, index)
            .await
    }

    async fn ensure_ttl_index(
        &self,
        database: &str,
        collection: &str,
        field: &str,
        expire_after_secs: u64,
        options: &TtlIndexOptions,
    ) -> Result<EnsuredIndex, DriverError> {
        let index = StoredIndex::Ttl {
            field: field.to_string(),
            expire_after_secs,
            options: options.clone(),
        };
        self.store_index(database, collection, &options.name, index)
            .await
    }
}
