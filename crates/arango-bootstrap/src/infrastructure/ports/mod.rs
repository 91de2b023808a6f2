//! Port traits for infrastructure boundaries.
//!
//! The driver port is the ONLY abstraction in this crate. Everything else is
//! concrete types. It exists so the bootstrap logic can run against the HTTP
//! adapter, the in-memory fake, or a mock.

mod driver;
mod error;
pub mod types;

// =============================================================================
// Driver Port
// =============================================================================
pub use driver::ArangoDriver;

#[cfg(test)]
pub use driver::MockArangoDriver;

// =============================================================================
// Types
// =============================================================================
pub use types::{
    // Databases
    CreateDatabaseOptions, DatabaseInfo, DatabaseUser,
    // Collections
    CollectionInfo, CollectionType, CreateCollectionOptions, KeyGenerator, KeyOptions,
    // Indexes
    EnsuredIndex, PersistentIndex, PersistentIndexOptions, TtlIndex, TtlIndexOptions,
};

// =============================================================================
// Error Types
// =============================================================================
pub use error::DriverError;
