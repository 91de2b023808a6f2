//! Collection handle.

use std::fmt;
use std::sync::Arc;

use crate::entities::Database;
use crate::infrastructure::ports::{ArangoDriver, CollectionInfo, CollectionType};

/// Handle to a named collection inside a database.
#[derive(Clone, PartialEq)]
pub struct Collection {
    database: Database,
    info: CollectionInfo,
}

impl Collection {
    pub fn new(database: Database, info: CollectionInfo) -> Self {
        Self { database, info }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn collection_type(&self) -> CollectionType {
        self.info.collection_type
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn driver(&self) -> &Arc<dyn ArangoDriver> {
        self.database.driver()
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("database", &self.database.name())
            .field("name", &self.info.name)
            .field("type", &self.info.collection_type)
            .finish()
    }
}
