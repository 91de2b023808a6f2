//! ArangoDB REST request and response bodies.

use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{
    CollectionInfo, CollectionType, CreateCollectionOptions, CreateDatabaseOptions, DatabaseInfo,
    DatabaseUser, DriverError, KeyOptions, PersistentIndexOptions, TtlIndexOptions,
};

// =============================================================================
// Errors
// =============================================================================

/// Error body returned with every non-2xx ArangoDB response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArangoErrorBody {
    pub error_num: Option<i64>,
    pub error_message: Option<String>,
}

/// Map a non-2xx response to a driver error.
pub fn error_from_response(status: u16, body: &[u8]) -> DriverError {
    let parsed = serde_json::from_slice::<ArangoErrorBody>(body).ok();
    let error_num = parsed.as_ref().and_then(|b| b.error_num);
    let message = parsed
        .and_then(|b| b.error_message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                format!("HTTP {status}")
            } else {
                text
            }
        });

    match status {
        401 | 403 => DriverError::Unauthorized { status, message },
        _ => DriverError::Server {
            status,
            error_num,
            message,
        },
    }
}

// =============================================================================
// Databases
// =============================================================================

#[derive(Debug, Serialize)]
pub struct CreateDatabaseRequest<'a> {
    pub name: &'a str,
    pub options: DatabaseOptionsBody<'a>,
    pub users: Vec<DatabaseUserBody<'a>>,
}

impl<'a> CreateDatabaseRequest<'a> {
    pub fn new(
        name: &'a str,
        users: &'a [DatabaseUser],
        options: &'a CreateDatabaseOptions,
    ) -> Self {
        Self {
            name,
            options: DatabaseOptionsBody {
                sharding: options.sharding.as_deref(),
                replication_factor: options.replication_factor,
                write_concern: options.write_concern,
            },
            users: users
                .iter()
                .map(|u| DatabaseUserBody {
                    username: &u.username,
                    passwd: &u.password,
                    active: u.active,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseOptionsBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharding: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication_factor: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_concern: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DatabaseUserBody<'a> {
    pub username: &'a str,
    pub passwd: &'a str,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct CurrentDatabaseResponse {
    pub result: DatabaseBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseBody {
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub is_system: bool,
}

impl From<DatabaseBody> for DatabaseInfo {
    fn from(body: DatabaseBody) -> Self {
        Self {
            name: body.name,
            id: body.id,
            is_system: body.is_system,
        }
    }
}

// =============================================================================
// Collections
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionRequest<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub collection_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_sync: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_shards: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shard_keys: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication_factor: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_concern: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_options: Option<KeyOptionsBody>,
}

impl<'a> CreateCollectionRequest<'a> {
    pub fn new(name: &'a str, options: &'a CreateCollectionOptions) -> Self {
        Self {
            name,
            collection_type: options.collection_type.code(),
            wait_for_sync: options.wait_for_sync,
            number_of_shards: options.number_of_shards,
            shard_keys: options.shard_keys.as_deref(),
            replication_factor: options.replication_factor,
            write_concern: options.write_concern,
            key_options: options.key_options.as_ref().map(KeyOptionsBody::from),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyOptionsBody {
    #[serde(rename = "type")]
    pub generator: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_user_keys: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub increment: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl From<&KeyOptions> for KeyOptionsBody {
    fn from(options: &KeyOptions) -> Self {
        Self {
            generator: options.generator.as_str(),
            allow_user_keys: options.allow_user_keys,
            increment: options.increment,
            offset: options.offset,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CollectionBody {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub collection_type: u8,
}

impl TryFrom<CollectionBody> for CollectionInfo {
    type Error = DriverError;

    fn try_from(body: CollectionBody) -> Result<Self, Self::Error> {
        let collection_type = CollectionType::from_code(body.collection_type).ok_or_else(|| {
            DriverError::InvalidResponse(format!(
                "unknown collection type {} for `{}`",
                body.collection_type, body.name
            ))
        })?;
        Ok(Self {
            id: body.id,
            name: body.name,
            collection_type,
        })
    }
}

// =============================================================================
// Indexes
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct IndexListResponse {
    #[serde(default)]
    pub indexes: Vec<IndexBody>,
}

impl IndexListResponse {
    pub fn contains_name(&self, name: &str) -> bool {
        self.indexes.iter().any(|i| i.name.as_deref() == Some(name))
    }
}

#[derive(Debug, Deserialize)]
pub struct IndexBody {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentIndexRequest<'a> {
    #[serde(rename = "type")]
    pub index_type: &'static str,
    pub fields: &'a [String],
    pub name: &'a str,
    pub unique: bool,
    pub sparse: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduplicate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimates: Option<bool>,
    pub in_background: bool,
}

impl<'a> PersistentIndexRequest<'a> {
    pub fn new(fields: &'a [String], options: &'a PersistentIndexOptions) -> Self {
        Self {
            index_type: "persistent",
            fields,
            name: &options.name,
            unique: options.unique,
            sparse: options.sparse,
            deduplicate: options.deduplicate,
            estimates: options.estimates,
            in_background: options.in_background,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TtlIndexRequest<'a> {
    #[serde(rename = "type")]
    pub index_type: &'static str,
    pub fields: [&'a str; 1],
    pub expire_after: u64,
    pub name: &'a str,
    pub in_background: bool,
}

impl<'a> TtlIndexRequest<'a> {
    pub fn new(field: &'a str, expire_after: u64, options: &'a TtlIndexOptions) -> Self {
        Self {
            index_type: "ttl",
            fields: [field],
            expire_after,
            name: &options.name,
            in_background: options.in_background,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsureIndexResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub is_newly_created: Option<bool>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::infrastructure::ports::KeyGenerator;

    #[test]
    fn create_database_body_carries_active_user() {
        let users = [DatabaseUser::active("app", "pw")];
        let options = CreateDatabaseOptions::default();
        let body = serde_json::to_value(CreateDatabaseRequest::new("appdb", &users, &options))
            .expect("serialize");

        assert_eq!(
            body,
            json!({
                "name": "appdb",
                "options": {},
                "users": [{"username": "app", "passwd": "pw", "active": true}]
            })
        );
    }

    #[test]
    fn create_collection_body_skips_unset_options() {
        let options = CreateCollectionOptions::edge()
            .with_shards(3)
            .with_shard_keys(vec!["_key".to_string()])
            .with_key_options(KeyOptions {
                generator: KeyGenerator::Padded,
                ..KeyOptions::default()
            });
        let body = serde_json::to_value(CreateCollectionRequest::new("knows", &options))
            .expect("serialize");

        assert_eq!(
            body,
            json!({
                "name": "knows",
                "type": 3,
                "numberOfShards": 3,
                "shardKeys": ["_key"],
                "keyOptions": {"type": "padded"}
            })
        );
    }

    #[test]
    fn ttl_index_body_uses_single_field() {
        let options = TtlIndexOptions::named("sessions_ttl");
        let body = serde_json::to_value(TtlIndexRequest::new("expires_at", 90, &options))
            .expect("serialize");

        assert_eq!(
            body,
            json!({
                "type": "ttl",
                "fields": ["expires_at"],
                "expireAfter": 90,
                "name": "sessions_ttl",
                "inBackground": false
            })
        );
    }

    #[test]
    fn persistent_index_body() {
        let fields = vec!["email".to_string(), "tenant".to_string()];
        let options = PersistentIndexOptions::named("by_email").unique();
        let body = serde_json::to_value(PersistentIndexRequest::new(&fields, &options))
            .expect("serialize");

        assert_eq!(
            body,
            json!({
                "type": "persistent",
                "fields": ["email", "tenant"],
                "name": "by_email",
                "unique": true,
                "sparse": false,
                "inBackground": false
            })
        );
    }

    #[test]
    fn error_body_maps_to_server_error() {
        let err = error_from_response(
            409,
            br#"{"error":true,"code":409,"errorNum":1207,"errorMessage":"duplicate name"}"#,
        );
        assert_eq!(
            err,
            DriverError::Server {
                status: 409,
                error_num: Some(1207),
                message: "duplicate name".to_string(),
            }
        );
    }

    #[test]
    fn auth_failures_map_to_unauthorized() {
        let err = error_from_response(401, b"");
        assert_eq!(
            err,
            DriverError::Unauthorized {
                status: 401,
                message: "HTTP 401".to_string(),
            }
        );
    }

    #[test]
    fn index_list_matches_by_name() {
        let list: IndexListResponse = serde_json::from_value(json!({
            "error": false,
            "code": 200,
            "indexes": [
                {"id": "users/0", "name": "primary", "type": "primary"},
                {"id": "users/12", "name": "by_email", "type": "persistent"}
            ]
        }))
        .expect("deserialize");

        assert!(list.contains_name("by_email"));
        assert!(!list.contains_name("users/12"));
    }

    #[test]
    fn unknown_collection_type_is_invalid_response() {
        let body = CollectionBody {
            id: "1".to_string(),
            name: "odd".to_string(),
            collection_type: 9,
        };
        assert!(matches!(
            CollectionInfo::try_from(body),
            Err(DriverError::InvalidResponse(_))
        ));
    }
}
