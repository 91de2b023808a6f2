//! Bootstrap error types.
//!
//! Every driver failure is wrapped with the step that failed and the resource
//! it was applied to, so callers can inspect errors without string matching.

use std::fmt;

use crate::infrastructure::ports::DriverError;

/// Step of a bootstrap operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Building the driver (endpoints, client).
    Connect,
    /// Asking whether the resource exists.
    CheckExists,
    /// Fetching an existing resource.
    Open,
    /// Creating an absent resource.
    Create,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => write!(f, "connect to"),
            Self::CheckExists => write!(f, "check existence of"),
            Self::Open => write!(f, "open"),
            Self::Create => write!(f, "create"),
        }
    }
}

/// Resource a bootstrap operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Endpoints(Vec<String>),
    Database {
        name: String,
    },
    Collection {
        database: String,
        name: String,
    },
    Index {
        database: String,
        collection: String,
        name: String,
    },
}

impl Resource {
    pub fn database(name: impl Into<String>) -> Self {
        Self::Database { name: name.into() }
    }

    pub fn collection(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Collection {
            database: database.into(),
            name: name.into(),
        }
    }

    pub fn index(
        database: impl Into<String>,
        collection: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::Index {
            database: database.into(),
            collection: collection.into(),
            name: name.into(),
        }
    }

    /// Name of the targeted resource itself.
    pub fn name(&self) -> String {
        match self {
            Self::Endpoints(endpoints) => endpoints.join(","),
            Self::Database { name } | Self::Collection { name, .. } | Self::Index { name, .. } => {
                name.clone()
            }
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Endpoints(endpoints) => write!(f, "endpoints [{}]", endpoints.join(", ")),
            Self::Database { name } => write!(f, "database `{name}`"),
            Self::Collection { database, name } => write!(f, "collection `{database}.{name}`"),
            Self::Index {
                database,
                collection,
                name,
            } => write!(f, "index `{name}` on `{database}.{collection}`"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// A driver call failed.
    #[error("failed to {operation} {resource}: {source}")]
    Driver {
        operation: Operation,
        resource: Resource,
        #[source]
        source: DriverError,
    },

    /// Options were rejected before reaching the driver.
    #[error("invalid options for {resource}: {reason}")]
    InvalidOptions { resource: Resource, reason: String },
}

impl BootstrapError {
    pub fn driver(operation: Operation, resource: Resource, source: DriverError) -> Self {
        Self::Driver {
            operation,
            resource,
            source,
        }
    }

    pub fn invalid_options(resource: Resource, reason: impl ToString) -> Self {
        Self::InvalidOptions {
            resource,
            reason: reason.to_string(),
        }
    }

    /// Failed step, if a driver call failed.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Driver { operation, .. } => Some(*operation),
            Self::InvalidOptions { .. } => None,
        }
    }

    pub fn resource(&self) -> &Resource {
        match self {
            Self::Driver { resource, .. } | Self::InvalidOptions { resource, .. } => resource,
        }
    }

    /// Underlying driver failure, if any.
    pub fn driver_error(&self) -> Option<&DriverError> {
        match self {
            Self::Driver { source, .. } => Some(source),
            Self::InvalidOptions { .. } => None,
        }
    }
}
