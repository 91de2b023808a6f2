//! Collection bootstrap.

use crate::entities::{Collection, Database};
use crate::error::{BootstrapError, Operation, Resource};
use crate::infrastructure::ports::CreateCollectionOptions;

/// Ensure collection `name` exists in `database`.
///
/// Returns `(true, handle)` when the collection was created with `options`
/// and `(false, handle)` when it already existed; `options` are then ignored.
pub async fn bootstrap_collection(
    database: &Database,
    name: &str,
    options: &CreateCollectionOptions,
) -> Result<(bool, Collection), BootstrapError> {
    let resource = || Resource::collection(database.name(), name);

    if name.trim().is_empty() {
        return Err(BootstrapError::invalid_options(
            resource(),
            "collection name must not be empty",
        ));
    }
    options
        .validate()
        .map_err(|reason| BootstrapError::invalid_options(resource(), reason))?;

    let driver = database.driver();
    let exists = driver
        .collection_exists(database.name(), name)
        .await
        .map_err(|e| BootstrapError::driver(Operation::CheckExists, resource(), e))?;

    if exists {
        let info = driver
            .open_collection(database.name(), name)
            .await
            .map_err(|e| BootstrapError::driver(Operation::Open, resource(), e))?;
        tracing::debug!(
            database = %database.name(),
            collection = %name,
            "Collection already exists"
        );
        return Ok((false, Collection::new(database.clone(), info)));
    }

    let info = driver
        .create_collection(database.name(), name, options)
        .await
        .map_err(|e| BootstrapError::driver(Operation::Create, resource(), e))?;
    tracing::info!(
        database = %database.name(),
        collection = %name,
        kind = %info.collection_type,
        "Created ArangoDB collection"
    );
    Ok((true, Collection::new(database.clone(), info)))
}
