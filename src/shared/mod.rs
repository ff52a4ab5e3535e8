//! Shared types and utilities used across the HTTP and domain layers.

pub mod serde_util;
pub mod units;

pub use units::{parse_satoshis, to_bitcoins, to_satoshis, UnitError, SATOSHIS_PER_BITCOIN};

// ─── QueryParams ─────────────────────────────────────────────────────────────

/// Ordered multi-map of query string parameters.
///
/// Encoding keeps insertion order. Duplicate keys are allowed through
/// [`add`](Self::add); [`set`](Self::set) replaces every value of a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value, keeping existing values of the same key.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Replace all values of `key` with a single value.
    ///
    /// The key keeps the position of its first occurrence; new keys go last.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter().position(|(k, _)| *k == key) {
            Some(first) => {
                self.0[first].1 = value;
                let mut i = 0;
                self.0.retain(|(k, _)| {
                    let keep = i <= first || *k != key;
                    i += 1;
                    keep
                });
            }
            None => self.0.push((key, value)),
        }
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove all values of `key`.
    pub fn remove(&mut self, key: &str) {
        self.0.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` rendering, in insertion order.
    pub fn encode(&self) -> String {
        // Serializing a sequence of string pairs cannot fail.
        serde_urlencoded::to_string(&self.0).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_keeps_insertion_order() {
        let mut q = QueryParams::new();
        q.add("minValue", "1000");
        q.add("limit", "25");
        q.add("coin", "btc");
        assert_eq!(q.encode(), "minValue=1000&limit=25&coin=btc");
    }

    #[test]
    fn test_encode_escapes_values() {
        let q: QueryParams = [("prevId", "a b&c=d")].into_iter().collect();
        assert_eq!(q.encode(), "prevId=a+b%26c%3Dd");
    }

    #[test]
    fn test_set_replaces_all_values_in_place() {
        let mut q = QueryParams::new();
        q.add("a", "1");
        q.add("prevId", "x");
        q.add("b", "2");
        q.add("prevId", "y");
        q.set("prevId", "z");
        assert_eq!(q.encode(), "a=1&prevId=z&b=2");
        assert_eq!(q.get("prevId"), Some("z"));
    }

    #[test]
    fn test_set_appends_new_key() {
        let mut q: QueryParams = [("minHeight", "100")].into_iter().collect();
        q.set("prevId", "abc");
        assert_eq!(q.encode(), "minHeight=100&prevId=abc");
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_remove_and_empty() {
        let mut q = QueryParams::new();
        assert!(q.is_empty());
        assert_eq!(q.encode(), "");
        q.add("prevId", "abc");
        q.remove("prevId");
        assert!(q.is_empty());
        assert_eq!(q.get("prevId"), None);
    }
}
