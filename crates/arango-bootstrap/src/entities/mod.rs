//! Resource handles.
//!
//! Handles are cheap to clone and carry only the driver and the resource
//! identity. Nothing here is closed or released.

mod collection;
mod database;

pub use collection::Collection;
pub use database::Database;
