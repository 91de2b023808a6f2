//! Index bootstrap (persistent and TTL indexes).
//!
//! Indexes are looked up by name only. An existing index with the same name
//! is reused as-is, even when its fields or options differ from the request.

use crate::entities::Collection;
use crate::error::{BootstrapError, Operation, Resource};
use crate::infrastructure::ports::{PersistentIndex, TtlIndex};

/// Ensure the persistent index `index.options.name` exists on `collection`.
///
/// Returns whether the index was created by this call.
pub async fn bootstrap_persistent_index(
    collection: &Collection,
    index: &PersistentIndex,
) -> Result<bool, BootstrapError> {
    let resource = || index_resource(collection, &index.options.name);

    index
        .validate()
        .map_err(|reason| BootstrapError::invalid_options(resource(), reason))?;

    if index_exists(collection, &index.options.name).await? {
        return Ok(false);
    }

    let ensured = collection
        .driver()
        .ensure_persistent_index(
            collection.database().name(),
            collection.name(),
            &index.fields,
            &index.options,
        )
        .await
        .map_err(|e| BootstrapError::driver(Operation::Create, resource(), e))?;

    tracing::info!(
        database = %collection.database().name(),
        collection = %collection.name(),
        index = %index.options.name,
        fields = ?index.fields,
        unique = index.options.unique,
        created = ensured.created,
        "Ensured persistent index"
    );
    Ok(ensured.created)
}

/// Ensure the TTL index `index.options.name` exists on `collection`.
///
/// The expiry is passed in whole seconds (fractions truncated). Returns
/// whether the index was created by this call.
pub async fn bootstrap_ttl_index(
    collection: &Collection,
    index: &TtlIndex,
) -> Result<bool, BootstrapError> {
    let resource = || index_resource(collection, &index.options.name);

    index
        .validate()
        .map_err(|reason| BootstrapError::invalid_options(resource(), reason))?;

    if index_exists(collection, &index.options.name).await? {
        return Ok(false);
    }

    let expire_after = index.expire_after_secs();
    let ensured = collection
        .driver()
        .ensure_ttl_index(
            collection.database().name(),
            collection.name(),
            &index.field,
            expire_after,
            &index.options,
        )
        .await
        .map_err(|e| BootstrapError::driver(Operation::Create, resource(), e))?;

    tracing::info!(
        database = %collection.database().name(),
        collection = %collection.name(),
        index = %index.options.name,
        field = %index.field,
        expire_after,
        created = ensured.created,
        "Ensured TTL index"
    );
    Ok(ensured.created)
}

fn index_resource(collection: &Collection, name: &str) -> Resource {
    Resource::index(collection.database().name(), collection.name(), name)
}

async fn index_exists(collection: &Collection, name: &str) -> Result<bool, BootstrapError> {
    let exists = collection
        .driver()
        .index_exists(collection.database().name(), collection.name(), name)
        .await
        .map_err(|e| {
            BootstrapError::driver(
                Operation::CheckExists,
                index_resource(collection, name),
                e,
            )
        })?;

    if exists {
        tracing::debug!(
            database = %collection.database().name(),
            collection = %collection.name(),
            index = %name,
            "Index already exists, definition not compared"
        );
    }
    Ok(exists)
}
