//! ArangoDB connection configuration

use std::env;
use std::fmt;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub const ENV_ENDPOINTS: &str = "ARANGODB_ENDPOINTS";
pub const ENV_USER: &str = "ARANGODB_USER";
pub const ENV_PASSWORD: &str = "ARANGODB_PASSWORD";
pub const ENV_DATABASE: &str = "ARANGODB_DATABASE";

/// Connection settings for the target cluster and database.
///
/// Built once at startup and passed by reference to the bootstrap calls.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArangoConfig {
    /// Cluster endpoints in preference order, e.g. `http://localhost:8529`
    #[serde(rename = "adb_endpoints")]
    pub endpoints: Vec<String>,
    /// User for basic authentication (also the owner of a created database)
    #[serde(rename = "adb_user")]
    pub user: String,
    #[serde(rename = "adb_password")]
    pub password: String,
    /// Target database name
    #[serde(rename = "adb_database")]
    pub database: String,
}

impl ArangoConfig {
    pub fn new(
        endpoints: Vec<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            endpoints,
            user: user.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// All four `ARANGODB_*` variables are required. `ARANGODB_ENDPOINTS` is
    /// a comma-separated list.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key).with_context(|| format!("{key} environment variable is required"))
        };

        let endpoints = split_endpoints(&require(ENV_ENDPOINTS)?);
        if endpoints.is_empty() {
            bail!("{ENV_ENDPOINTS} must list at least one endpoint");
        }

        Ok(Self {
            endpoints,
            user: require(ENV_USER)?,
            password: require(ENV_PASSWORD)?,
            database: require(ENV_DATABASE)?,
        })
    }

    /// Parse configuration from a JSON document using the `adb_*` keys.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid ArangoDB JSON configuration")
    }
}

impl fmt::Debug for ArangoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArangoConfig")
            .field("endpoints", &self.endpoints)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

fn split_endpoints(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
