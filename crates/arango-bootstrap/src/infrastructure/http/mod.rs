//! ArangoDB HTTP driver (REST API over reqwest)

mod wire;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::infrastructure::ports::{
    ArangoDriver, CollectionInfo, CreateCollectionOptions, CreateDatabaseOptions, DatabaseInfo,
    DatabaseUser, DriverError, EnsuredIndex, PersistentIndexOptions, TtlIndexOptions,
};

use wire::{
    error_from_response, CollectionBody, CreateCollectionRequest, CreateDatabaseRequest,
    CurrentDatabaseResponse, EnsureIndexResponse, IndexListResponse, PersistentIndexRequest,
    TtlIndexRequest,
};

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Database that hosts server-wide operations such as creating databases.
const SYSTEM_DATABASE: &str = "_system";

/// Basic-auth credentials.
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn basic(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Driver for the ArangoDB HTTP API.
///
/// Requests go to the endpoint that last answered. When an endpoint cannot be
/// reached the next one in the list is tried; server error responses are
/// returned as-is.
#[derive(Clone)]
pub struct HttpDriver {
    client: Client,
    endpoints: Arc<[Url]>,
    credentials: Credentials,
    active: Arc<AtomicUsize>,
}

impl HttpDriver {
    /// Create a driver for the given endpoints. No request is sent yet.
    pub fn connect(endpoints: &[String], credentials: Credentials) -> Result<Self, DriverError> {
        Self::with_timeout(endpoints, credentials, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create driver with custom request timeout.
    pub fn with_timeout(
        endpoints: &[String],
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, DriverError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DriverError::Client(e.to_string()))?;

        Self::with_client(endpoints, credentials, client)
    }

    /// Create driver around a preconfigured reqwest client.
    pub fn with_client(
        endpoints: &[String],
        credentials: Credentials,
        client: Client,
    ) -> Result<Self, DriverError> {
        let endpoints = parse_endpoints(endpoints)?;

        Ok(Self {
            client,
            endpoints: endpoints.into(),
            credentials,
            active: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    /// Send a request, failing over across endpoints on transport errors.
    ///
    /// Timeouts only fail over for idempotent methods: a timed-out `POST` may
    /// already have been applied by the first coordinator.
    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<Response, DriverError> {
        let count = self.endpoints.len();
        let start = self.active.load(Ordering::Relaxed) % count;
        let mut last_error = String::new();

        for offset in 0..count {
            let index = (start + offset) % count;
            let endpoint = &self.endpoints[index];
            let url = endpoint_url(endpoint, segments)?;

            let mut request = self
                .client
                .request(method.clone(), url)
                .basic_auth(&self.credentials.user, Some(&self.credentials.password));
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = &body {
                request = request
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.clone());
            }

            match request.send().await {
                Ok(response) => {
                    if index != start {
                        self.active.store(index, Ordering::Relaxed);
                        tracing::info!(endpoint = %endpoint, "Switched ArangoDB endpoint");
                    }
                    return Ok(response);
                }
                Err(e) if e.is_connect() || (e.is_timeout() && method.is_idempotent()) => {
                    tracing::warn!(
                        endpoint = %endpoint,
                        error = %e,
                        "ArangoDB endpoint unreachable"
                    );
                    last_error = e.to_string();
                }
                Err(e) => return Err(DriverError::Transport(e.to_string())),
            }
        }

        Err(DriverError::Transport(format!(
            "no ArangoDB endpoint reachable ({count} tried): {last_error}"
        )))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, DriverError> {
        let response = self.send(Method::GET, segments, query, None).await?;
        decode(response).await
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<Response, DriverError> {
        let body = serde_json::to_vec(body).map_err(|e| DriverError::Client(e.to_string()))?;
        self.send(Method::POST, segments, query, Some(body)).await
    }

    /// `GET` whose 404 means "absent".
    async fn exists(&self, segments: &[&str]) -> Result<bool, DriverError> {
        let response = self.send(Method::GET, segments, &[], None).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if status.is_success() {
            return Ok(true);
        }
        Err(error_response(response).await)
    }

    async fn ensure_index<B: Serialize + ?Sized>(
        &self,
        database: &str,
        collection: &str,
        body: &B,
    ) -> Result<EnsuredIndex, DriverError> {
        let response = self
            .post(
                &["_db", database, "_api", "index"],
                &[("collection", collection)],
                body,
            )
            .await?;
        let status = response.status();
        let ensured: EnsureIndexResponse = decode(response).await?;

        Ok(EnsuredIndex {
            name: ensured.name.unwrap_or_default(),
            id: ensured.id,
            created: ensured
                .is_newly_created
                .unwrap_or(status == StatusCode::CREATED),
        })
    }
}

impl fmt::Debug for HttpDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDriver")
            .field("endpoints", &self.endpoints)
            .field("credentials", &self.credentials)
            .finish()
    }
}

#[async_trait]
impl ArangoDriver for HttpDriver {
    async fn database_exists(&self, name: &str) -> Result<bool, DriverError> {
        self.exists(&["_db", name, "_api", "database", "current"])
            .await
    }

    async fn open_database(&self, name: &str) -> Result<DatabaseInfo, DriverError> {
        let current: CurrentDatabaseResponse = self
            .get(&["_db", name, "_api", "database", "current"], &[])
            .await?;
        Ok(current.result.into())
    }

    async fn create_database(
        &self,
        name: &str,
        users: &[DatabaseUser],
        options: &CreateDatabaseOptions,
    ) -> Result<(), DriverError> {
        let request = CreateDatabaseRequest::new(name, users, options);
        let response = self
            .post(&["_db", SYSTEM_DATABASE, "_api", "database"], &[], &request)
            .await?;
        if !response.status().is_success() {
            return Err(error_response(response).await);
        }
        Ok(())
    }

    async fn collection_exists(&self, database: &str, name: &str) -> Result<bool, DriverError> {
        self.exists(&["_db", database, "_api", "collection", name])
            .await
    }

    async fn open_collection(
        &self,
        database: &str,
        name: &str,
    ) -> Result<CollectionInfo, DriverError> {
        let body: CollectionBody = self
            .get(&["_db", database, "_api", "collection", name], &[])
            .await?;
        body.try_into()
    }

    async fn create_collection(
        &self,
        database: &str,
        name: &str,
        options: &CreateCollectionOptions,
    ) -> Result<CollectionInfo, DriverError> {
        let request = CreateCollectionRequest::new(name, options);
        let response = self
            .post(&["_db", database, "_api", "collection"], &[], &request)
            .await?;
        let body: CollectionBody = decode(response).await?;
        body.try_into()
    }

    async fn index_exists(
        &self,
        database: &str,
        collection: &str,
        name: &str,
    ) -> Result<bool, DriverError> {
        let list: IndexListResponse = self
            .get(
                &["_db", database, "_api", "index"],
                &[("collection", collection)],
            )
            .await?;
        Ok(list.contains_name(name))
    }

    async fn ensure_persistent_index(
        &self,
        database: &str,
        collection: &str,
        fields: &[String],
        options: &PersistentIndexOptions,
    ) -> Result<EnsuredIndex, DriverError> {
        self.ensure_index(
            database,
            collection,
            &PersistentIndexRequest::new(fields, options),
        )
        .await
    }

    async fn ensure_ttl_index(
        &self,
        database: &str,
        collection: &str,
        field: &str,
        expire_after_secs: u64,
        options: &TtlIndexOptions,
    ) -> Result<EnsuredIndex, DriverError> {
        self.ensure_index(
            database,
            collection,
            &TtlIndexRequest::new(field, expire_after_secs, options),
        )
        .await
    }
}

fn parse_endpoints(endpoints: &[String]) -> Result<Vec<Url>, DriverError> {
    if endpoints.is_empty() {
        return Err(DriverError::InvalidEndpoint(
            "at least one endpoint is required".to_string(),
        ));
    }

    endpoints
        .iter()
        .map(|raw| {
            let url = Url::parse(raw.trim())
                .map_err(|e| DriverError::InvalidEndpoint(format!("{raw}: {e}")))?;
            match url.scheme() {
                "http" | "https" if !url.cannot_be_a_base() => Ok(url),
                scheme => Err(DriverError::InvalidEndpoint(format!(
                    "{raw}: unsupported scheme `{scheme}`"
                ))),
            }
        })
        .collect()
}

/// Append percent-encoded path segments to an endpoint URL.
fn endpoint_url(endpoint: &Url, segments: &[&str]) -> Result<Url, DriverError> {
    let mut url = endpoint.clone();
    url.path_segments_mut()
        .map_err(|_| DriverError::InvalidEndpoint(endpoint.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DriverError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| DriverError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(error_from_response(status.as_u16(), &bytes));
    }

    serde_json::from_slice(&bytes).map_err(|e| DriverError::InvalidResponse(e.to_string()))
}

async fn error_response(response: Response) -> DriverError {
    let status = response.status().as_u16();
    match response.bytes().await {
        Ok(bytes) => error_from_response(status, &bytes),
        Err(e) => DriverError::Transport(e.to_string()),
    }
}
