//! Driver-neutral option and info types passed across the driver port.

use std::fmt;
use std::time::Duration;

// =============================================================================
// Databases
// =============================================================================

/// User provisioned together with a freshly created database.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseUser {
    pub username: String,
    pub password: String,
    pub active: bool,
}

impl DatabaseUser {
    pub fn active(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            active: true,
        }
    }
}

impl fmt::Debug for DatabaseUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseUser")
            .field("username", &self.username)
            .field("password", &"***")
            .field("active", &self.active)
            .finish()
    }
}

/// Cluster options applied when a database is created.
///
/// `Default` leaves every field to the server, which is what the bootstrap uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDatabaseOptions {
    /// `"flexible"`, `"single"` or empty for the server default.
    pub sharding: Option<String>,
    pub replication_factor: Option<u32>,
    pub write_concern: Option<u32>,
}

/// Database metadata reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseInfo {
    pub name: String,
    pub id: String,
    pub is_system: bool,
}

// =============================================================================
// Collections
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollectionType {
    #[default]
    Document,
    Edge,
}

impl CollectionType {
    /// Numeric type code used by the ArangoDB API.
    pub fn code(self) -> u8 {
        match self {
            Self::Document => 2,
            Self::Edge => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(Self::Document),
            3 => Some(Self::Edge),
            _ => None,
        }
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::Edge => write!(f, "edge"),
        }
    }
}

/// Document key generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyGenerator {
    #[default]
    Traditional,
    Autoincrement,
    Uuid,
    Padded,
}

impl KeyGenerator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Traditional => "traditional",
            Self::Autoincrement => "autoincrement",
            Self::Uuid => "uuid",
            Self::Padded => "padded",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOptions {
    pub generator: KeyGenerator,
    pub allow_user_keys: Option<bool>,
    /// Autoincrement only.
    pub increment: Option<u64>,
    /// Autoincrement only.
    pub offset: Option<u64>,
}

/// Options used when a collection has to be created.
///
/// Every field except the type is optional and left to the server when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCollectionOptions {
    pub collection_type: CollectionType,
    pub wait_for_sync: Option<bool>,
    pub number_of_shards: Option<u32>,
    pub shard_keys: Option<Vec<String>>,
    pub replication_factor: Option<u32>,
    pub write_concern: Option<u32>,
    pub key_options: Option<KeyOptions>,
}

impl CreateCollectionOptions {
    pub fn document() -> Self {
        Self::default()
    }

    pub fn edge() -> Self {
        Self {
            collection_type: CollectionType::Edge,
            ..Self::default()
        }
    }

    pub fn with_shards(mut self, number_of_shards: u32) -> Self {
        self.number_of_shards = Some(number_of_shards);
        self
    }

    pub fn with_shard_keys(mut self, keys: Vec<String>) -> Self {
        self.shard_keys = Some(keys);
        self
    }

    pub fn with_replication_factor(mut self, replication_factor: u32) -> Self {
        self.replication_factor = Some(replication_factor);
        self
    }

    pub fn with_write_concern(mut self, write_concern: u32) -> Self {
        self.write_concern = Some(write_concern);
        self
    }

    pub fn with_wait_for_sync(mut self, wait_for_sync: bool) -> Self {
        self.wait_for_sync = Some(wait_for_sync);
        self
    }

    pub fn with_key_options(mut self, key_options: KeyOptions) -> Self {
        self.key_options = Some(key_options);
        self
    }

    /// Check the recognized fields before they reach the server.
    pub fn validate(&self) -> Result<(), String> {
        if self.number_of_shards == Some(0) {
            return Err("number_of_shards must be at least 1".to_string());
        }
        if self.replication_factor == Some(0) {
            return Err("replication_factor must be at least 1".to_string());
        }
        if let Some(write_concern) = self.write_concern {
            if write_concern == 0 {
                return Err("write_concern must be at least 1".to_string());
            }
            if let Some(replication_factor) = self.replication_factor {
                if write_concern > replication_factor {
                    return Err(format!(
                        "write_concern {write_concern} exceeds replication_factor {replication_factor}"
                    ));
                }
            }
        }
        if let Some(keys) = &self.shard_keys {
            if keys.is_empty() {
                return Err("shard_keys must not be empty when set".to_string());
            }
            if keys.iter().any(|k| k.trim().is_empty()) {
                return Err("shard_keys must not contain blank keys".to_string());
            }
        }
        if let Some(key_options) = &self.key_options {
            let autoincrement_only =
                key_options.increment.is_some() || key_options.offset.is_some();
            if autoincrement_only && key_options.generator != KeyGenerator::Autoincrement {
                return Err(format!(
                    "increment/offset require the autoincrement key generator, got {}",
                    key_options.generator.as_str()
                ));
            }
            if key_options.increment == Some(0) {
                return Err("increment must be at least 1".to_string());
            }
        }
        Ok(())
    }
}

/// Collection metadata reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    pub id: String,
    pub name: String,
    pub collection_type: CollectionType,
}

// =============================================================================
// Indexes
// =============================================================================

/// Options for a persistent index. `name` is the idempotency key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistentIndexOptions {
    pub name: String,
    pub unique: bool,
    pub sparse: bool,
    pub deduplicate: Option<bool>,
    pub estimates: Option<bool>,
    pub in_background: bool,
}

impl PersistentIndexOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn sparse(mut self) -> Self {
        self.sparse = true;
        self
    }

    pub fn in_background(mut self) -> Self {
        self.in_background = true;
        self
    }
}

/// Persistent index requested on a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistentIndex {
    pub fields: Vec<String>,
    pub options: PersistentIndexOptions,
}

impl PersistentIndex {
    pub fn new<I, S>(fields: I, options: PersistentIndexOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            options,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.options.name.trim().is_empty() {
            return Err("index name must not be empty".to_string());
        }
        if self.fields.is_empty() {
            return Err("persistent index needs at least one field".to_string());
        }
        for (i, field) in self.fields.iter().enumerate() {
            if field.trim().is_empty() {
                return Err("index fields must not be blank".to_string());
            }
            if self.fields[..i].contains(field) {
                return Err(format!("field `{field}` is listed twice"));
            }
        }
        Ok(())
    }
}

/// Options for a TTL index. `name` is the idempotency key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TtlIndexOptions {
    pub name: String,
    pub in_background: bool,
}

impl TtlIndexOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            in_background: false,
        }
    }
}

/// TTL index: documents expire `ttl` after the timestamp stored in `field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlIndex {
    pub field: String,
    pub ttl: Duration,
    pub options: TtlIndexOptions,
}

impl TtlIndex {
    pub fn new(field: impl Into<String>, ttl: Duration, options: TtlIndexOptions) -> Self {
        Self {
            field: field.into(),
            ttl,
            options,
        }
    }

    /// Expiry in whole seconds; fractions are truncated.
    pub fn expire_after_secs(&self) -> u64 {
        self.ttl.as_secs()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.options.name.trim().is_empty() {
            return Err("index name must not be empty".to_string());
        }
        if self.field.trim().is_empty() {
            return Err("ttl index field must not be empty".to_string());
        }
        Ok(())
    }
}

/// Result of an ensure-index call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsuredIndex {
    pub id: String,
    pub name: String,
    pub created: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_seconds_are_truncated() {
        let index = TtlIndex::new(
            "expires_at",
            Duration::from_secs_f64(90.7),
            TtlIndexOptions::named("ttl"),
        );
        assert_eq!(index.expire_after_secs(), 90);
    }

    #[test]
    fn persistent_index_rejects_duplicate_fields() {
        let index = PersistentIndex::new(["a", "b", "a"], PersistentIndexOptions::named("idx"));
        let err = index.validate().expect_err("duplicate field should be rejected");
        assert!(err.contains("`a`"));
    }

    #[test]
    fn persistent_index_requires_name_and_fields() {
        assert!(PersistentIndex::new(["a"], PersistentIndexOptions::default())
            .validate()
            .is_err());
        assert!(
            PersistentIndex::new(Vec::<String>::new(), PersistentIndexOptions::named("idx"))
                .validate()
                .is_err()
        );
        assert!(PersistentIndex::new(["a", "b"], PersistentIndexOptions::named("idx"))
            .validate()
            .is_ok());
    }

    #[test]
    fn collection_options_reject_write_concern_above_replication() {
        let options = CreateCollectionOptions::document()
            .with_replication_factor(2)
            .with_write_concern(3);
        assert!(options.validate().is_err());

        let options = CreateCollectionOptions::document()
            .with_replication_factor(3)
            .with_write_concern(2);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn collection_options_reject_increment_without_autoincrement() {
        let options = CreateCollectionOptions::document().with_key_options(KeyOptions {
            generator: KeyGenerator::Uuid,
            increment: Some(5),
            ..KeyOptions::default()
        });
        assert!(options.validate().is_err());

        let options = CreateCollectionOptions::document().with_key_options(KeyOptions {
            generator: KeyGenerator::Autoincrement,
            increment: Some(5),
            offset: Some(100),
            ..KeyOptions::default()
        });
        assert!(options.validate().is_ok());
    }

    #[test]
    fn collection_type_codes() {
        assert_eq!(CollectionType::Document.code(), 2);
        assert_eq!(CollectionType::Edge.code(), 3);
        assert_eq!(CollectionType::from_code(3), Some(CollectionType::Edge));
        assert_eq!(CollectionType::from_code(7), None);
    }

    #[test]
    fn user_debug_hides_password() {
        let user = DatabaseUser::active("app", "s3cret");
        assert!(!format!("{user:?}").contains("s3cret"));
    }
}
