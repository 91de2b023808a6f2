//! Connection bootstrap: connect and ensure the target database exists.

use std::sync::Arc;

use crate::entities::Database;
use crate::error::{BootstrapError, Operation, Resource};
use crate::infrastructure::config::ArangoConfig;
use crate::infrastructure::http::{Credentials, HttpDriver};
use crate::infrastructure::ports::{ArangoDriver, CreateDatabaseOptions, DatabaseUser};

/// Connect over HTTP and ensure `config.database` exists.
///
/// A missing database is created with a single active user carrying the
/// connecting credentials. Nothing is retried and a half-created database is
/// left to the server.
pub async fn bootstrap_database(config: &ArangoConfig) -> Result<Database, BootstrapError> {
    let credentials = Credentials::basic(&config.user, &config.password);
    let driver = HttpDriver::connect(&config.endpoints, credentials).map_err(|e| {
        BootstrapError::driver(
            Operation::Connect,
            Resource::Endpoints(config.endpoints.clone()),
            e,
        )
    })?;

    tracing::debug!(endpoints = ?config.endpoints, "ArangoDB HTTP driver ready");
    bootstrap_database_with(Arc::new(driver), config).await
}

/// Ensure `config.database` exists using an already constructed driver.
pub async fn bootstrap_database_with(
    driver: Arc<dyn ArangoDriver>,
    config: &ArangoConfig,
) -> Result<Database, BootstrapError> {
    let name = config.database.as_str();
    let resource = || Resource::database(name);

    if name.trim().is_empty() {
        return Err(BootstrapError::invalid_options(
            resource(),
            "database name must not be empty",
        ));
    }

    let exists = driver
        .database_exists(name)
        .await
        .map_err(|e| BootstrapError::driver(Operation::CheckExists, resource(), e))?;

    if exists {
        let info = driver
            .open_database(name)
            .await
            .map_err(|e| BootstrapError::driver(Operation::Open, resource(), e))?;
        tracing::info!(database = %info.name, id = %info.id, "Opened existing ArangoDB database");
    } else {
        let users = [DatabaseUser::active(&config.user, &config.password)];
        driver
            .create_database(name, &users, &CreateDatabaseOptions::default())
            .await
            .map_err(|e| BootstrapError::driver(Operation::Create, resource(), e))?;
        tracing::info!(database = %name, user = %config.user, "Created ArangoDB database");
    }

    Ok(Database::new(driver, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryDriver;
    use crate::infrastructure::ports::{DatabaseInfo, DriverError, MockArangoDriver};

    fn config(database: &str) -> ArangoConfig {
        ArangoConfig::new(
            vec!["http://localhost:8529".to_string()],
            "root",
            "pw",
            database,
        )
    }

    #[tokio::test]
    async fn creates_missing_database_with_connecting_user() {
        let mut driver = MockArangoDriver::new();
        driver
            .expect_database_exists()
            .withf(|name: &str| name == "app")
            .times(1)
            .returning(|_| Ok(false));
        driver
            .expect_create_database()
            .withf(|name: &str, users: &[DatabaseUser], options: &CreateDatabaseOptions| {
                name == "app"
                    && users == [DatabaseUser::active("root", "pw")].as_slice()
                    && *options == CreateDatabaseOptions::default()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        driver.expect_open_database().times(0);

        let db = bootstrap_database_with(Arc::new(driver), &config("app"))
            .await
            .expect("bootstrap should succeed");

        assert_eq!(db.name(), "app");
    }

    #[tokio::test]
    async fn opens_existing_database_without_creating() {
        let mut driver = MockArangoDriver::new();
        driver.expect_database_exists().returning(|_| Ok(true));
        driver.expect_open_database().times(1).returning(|name| {
            Ok(DatabaseInfo {
                name: name.to_string(),
                id: "123".to_string(),
                is_system: false,
            })
        });
        driver.expect_create_database().times(0);

        let db = bootstrap_database_with(Arc::new(driver), &config("app"))
            .await
            .expect("bootstrap should succeed");

        assert_eq!(db.name(), "app");
    }

    #[tokio::test]
    async fn existence_check_failure_is_wrapped() {
        let mut driver = MockArangoDriver::new();
        driver
            .expect_database_exists()
            .returning(|_| Err(DriverError::Transport("connection refused".to_string())));
        driver.expect_create_database().times(0);

        let err = bootstrap_database_with(Arc::new(driver), &config("app"))
            .await
            .expect_err("check should fail");

        assert_eq!(err.operation(), Some(Operation::CheckExists));
        let message = err.to_string();
        assert!(message.contains("`app`"), "{message}");
        assert!(message.contains("check existence"), "{message}");
        assert!(message.contains("connection refused"), "{message}");
    }

    #[tokio::test]
    async fn create_failure_is_wrapped() {
        let mut driver = MockArangoDriver::new();
        driver.expect_database_exists().returning(|_| Ok(false));
        driver
            .expect_create_database()
            .returning(|_, _, _| Err(DriverError::server(403, "forbidden")));

        let err = bootstrap_database_with(Arc::new(driver), &config("app"))
            .await
            .expect_err("create should fail");

        assert_eq!(err.operation(), Some(Operation::Create));
        assert!(err.to_string().contains("failed to create database `app`"));
    }

    #[tokio::test]
    async fn open_failure_is_wrapped() {
        let mut driver = MockArangoDriver::new();
        driver.expect_database_exists().returning(|_| Ok(true));
        driver
            .expect_open_database()
            .returning(|_| Err(DriverError::server(500, "boom")));

        let err = bootstrap_database_with(Arc::new(driver), &config("app"))
            .await
            .expect_err("open should fail");

        assert_eq!(err.operation(), Some(Operation::Open));
        assert!(err.to_string().contains("open database `app`"));
    }

    #[tokio::test]
    async fn empty_database_name_is_rejected_without_driver_calls() {
        let driver = MockArangoDriver::new();

        let err = bootstrap_database_with(Arc::new(driver), &config(" "))
            .await
            .expect_err("empty name");

        assert!(matches!(err, BootstrapError::InvalidOptions { .. }));
    }

    #[tokio::test]
    async fn invalid_endpoint_fails_on_connect() {
        let mut config = config("app");
        config.endpoints = vec!["ftp://localhost".to_string()];

        let err = bootstrap_database(&config).await.expect_err("bad endpoint");

        assert_eq!(err.operation(), Some(Operation::Connect));
        assert!(err.to_string().contains("ftp://localhost"));
    }

    #[tokio::test]
    async fn second_bootstrap_fetches_existing_database() {
        let driver = Arc::new(InMemoryDriver::new());
        let config = config("app");

        let first = bootstrap_database_with(driver.clone(), &config)
            .await
            .expect("first bootstrap");
        let second = bootstrap_database_with(driver.clone(), &config)
            .await
            .expect("second bootstrap");

        assert_eq!(first, second);
        assert_eq!(driver.create_calls().await, 1);
        assert_eq!(
            driver.database_users("app").await,
            Some(vec![DatabaseUser::active("root", "pw")])
        );
    }
}
