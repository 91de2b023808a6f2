//! Database handle.

use std::fmt;
use std::sync::Arc;

use crate::infrastructure::ports::ArangoDriver;

/// Handle to a named database on a cluster.
#[derive(Clone)]
pub struct Database {
    driver: Arc<dyn ArangoDriver>,
    name: String,
}

impl Database {
    pub fn new(driver: Arc<dyn ArangoDriver>, name: impl Into<String>) -> Self {
        Self {
            driver,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn driver(&self) -> &Arc<dyn ArangoDriver> {
        &self.driver
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database").field("name", &self.name).finish()
    }
}

impl PartialEq for Database {
    /// Same driver instance and same name.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.driver, &other.driver) && self.name == other.name
    }
}
