//! Record to JSON map conversion.

use serde::Serialize;
use serde_json::{Map, Value};

/// Convert a serializable record into a string-keyed map.
///
/// The record goes through `serde_json`, so its serde attributes (`rename`,
/// `skip`, ...) decide the keys. Records that do not serialize to a JSON
/// object are an error. Useful for AQL bind variables and patch documents.
pub fn to_map<T>(record: &T) -> Result<Map<String, Value>, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(record)?;
    serde_json::from_value(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    #[allow(non_snake_case)]
    struct Record {
        Name: String,
        Count: u32,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Session {
        user_id: String,
        #[serde(skip)]
        _secret: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        expires_at: Option<String>,
    }

    #[test]
    fn struct_fields_become_keys() {
        let map = to_map(&Record {
            Name: "a".to_string(),
            Count: 3,
        })
        .expect("record should convert");

        assert_eq!(map.len(), 2);
        assert_eq!(map["Name"], json!("a"));
        assert_eq!(map["Count"], json!(3));
    }

    #[test]
    fn serde_attributes_apply() {
        let map = to_map(&Session {
            user_id: "u1".to_string(),
            _secret: "hidden".to_string(),
            expires_at: None,
        })
        .expect("session should convert");

        assert_eq!(Value::Object(map), json!({"userId": "u1"}));
    }

    #[test]
    fn non_string_keys_fail_to_serialize() {
        let mut record = HashMap::new();
        record.insert((1, 2), "pair");

        assert!(to_map(&record).is_err());
    }

    #[test]
    fn non_object_records_are_rejected() {
        assert!(to_map(&vec![1, 2, 3]).is_err());
        assert!(to_map("plain").is_err());
    }
}
