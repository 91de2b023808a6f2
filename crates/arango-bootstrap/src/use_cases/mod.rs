//! Bootstrap use cases.
//!
//! Callers run them at startup in order: database, then collections, then
//! indexes. Each one checks by name before creating, so repeating a call is
//! safe. Two processes racing on the same missing resource may still see the
//! server's duplicate-name error from the loser's create call.

pub mod collection;
pub mod database;
pub mod index;

pub use collection::bootstrap_collection;
pub use database::{bootstrap_database, bootstrap_database_with};
pub use index::{bootstrap_persistent_index, bootstrap_ttl_index};
