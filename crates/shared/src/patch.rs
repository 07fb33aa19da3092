//! Helpers for partial-update payloads.

use serde::{Deserialize, Deserializer};

/// Deserializes a nullable field of a partial update.
///
/// Use together with `#[serde(default)]`:
/// - field absent -> `None` (leave unchanged)
/// - field `null` -> `Some(None)` (clear)
/// - field value  -> `Some(Some(value))` (set)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        description: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.description, None);

        let null: Patch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(null.description, Some(None));

        let set: Patch = serde_json::from_str(r#"{"description": "text"}"#).unwrap();
        assert_eq!(set.description, Some(Some("text".to_string())));

        let empty: Patch = serde_json::from_str(r#"{"description": ""}"#).unwrap();
        assert_eq!(empty.description, Some(Some(String::new())));
    }
}
