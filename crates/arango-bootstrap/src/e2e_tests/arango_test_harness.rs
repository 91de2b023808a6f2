//! ArangoDB test harness for E2E testing.

use std::time::Duration;

use testcontainers::{core::WaitFor, runners::AsyncRunner, ContainerAsync, GenericImage};
use tokio::time::sleep;

use crate::infrastructure::http::{Credentials, HttpDriver};
use crate::infrastructure::ports::ArangoDriver;
use crate::ArangoConfig;

/// Root password used for ArangoDB test containers.
pub const TEST_ARANGO_PASSWORD: &str = "testpassword";

const ARANGO_PORT: u16 = 8529;

/// ArangoDB test harness managing container lifecycle.
pub struct ArangoTestHarness {
    _container: ContainerAsync<GenericImage>,
    endpoint: String,
}

impl ArangoTestHarness {
    /// Start a new ArangoDB container and wait until it answers requests.
    pub async fn start() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container: ContainerAsync<GenericImage> =
            arango_image(TEST_ARANGO_PASSWORD).start().await;
        let port = container.get_host_port_ipv4(ARANGO_PORT).await;
        let endpoint = format!("http://127.0.0.1:{port}");

        wait_until_ready(&endpoint).await?;

        Ok(Self {
            _container: container,
            endpoint,
        })
    }

    /// Config pointing at the container as root.
    pub fn config(&self, database: &str) -> ArangoConfig {
        ArangoConfig::new(
            vec![self.endpoint.clone()],
            "root",
            TEST_ARANGO_PASSWORD,
            database,
        )
    }
}

/// ArangoDB single-server image with a fixed root password.
pub fn arango_image(password: &str) -> GenericImage {
    GenericImage::new("arangodb", "3.11")
        .with_env_var("ARANGO_ROOT_PASSWORD", password)
        .with_exposed_port(ARANGO_PORT)
        // Readiness is checked by wait_until_ready
        .with_wait_for(WaitFor::seconds(2))
}

/// Poll `_system` until the server answers, backing off up to 5s per attempt.
async fn wait_until_ready(endpoint: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let driver = HttpDriver::with_timeout(
        &[endpoint.to_string()],
        Credentials::basic("root", TEST_ARANGO_PASSWORD),
        Duration::from_secs(5),
    )?;

    let max_attempts = 30;
    let mut delay = Duration::from_millis(500);
    let mut last_err = String::new();

    for attempt in 1..=max_attempts {
        match driver.database_exists("_system").await {
            Ok(true) => {
                tracing::info!(attempt, endpoint, "ArangoDB container ready");
                return Ok(());
            }
            Ok(false) => last_err = "_system database not visible yet".to_string(),
            Err(e) => last_err = e.to_string(),
        }

        tracing::debug!(
            attempt,
            delay_ms = delay.as_millis() as u64,
            error = %last_err,
            "Waiting for ArangoDB"
        );
        sleep(delay).await;
        delay = std::cmp::min(delay.saturating_mul(2), Duration::from_secs(5));
    }

    Err(format!("ArangoDB at {endpoint} not ready after {max_attempts} attempts: {last_err}").into())
}
