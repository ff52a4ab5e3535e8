//! Custom serde helpers for API wire formats.

/// Deserializes JSON `null` into `T::default()`.
///
/// `#[serde(default)]` only covers absent keys; the API also sends explicit
/// `null` for unset strings, heights and cursors.
pub mod null_default {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Record {
        #[serde(deserialize_with = "super::null_default::deserialize")]
        name: String,
        #[serde(deserialize_with = "super::null_default::deserialize")]
        height: i64,
    }

    #[test]
    fn test_null_and_missing_become_default() {
        let r: Record = serde_json::from_str(r#"{"name":null,"height":null}"#).unwrap();
        assert_eq!(r.name, "");
        assert_eq!(r.height, 0);

        let r: Record = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(r.name, "");

        let r: Record = serde_json::from_str(r#"{"name":"x","height":7}"#).unwrap();
        assert_eq!(r.name, "x");
        assert_eq!(r.height, 7);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        assert!(serde_json::from_str::<Record>(r#"{"height":"seven"}"#).is_err());
    }
}
