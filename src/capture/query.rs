//! Insertion-ordered query parameter set.

use url::form_urlencoded;

/// Query parameters accumulated before a request is built.
///
/// Keys are unique; setting an existing key replaces its value in place, so
/// later options for the same parameter win while the original position in
/// the encoded query is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter_mut().find(|(existing, _)| existing == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Returns the value for `key`, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if `key` is set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Encodes the set as `application/x-www-form-urlencoded` (`k=v&k=v`).
    #[must_use]
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_encodes_to_empty_string() {
        let params = QueryParams::new();
        assert!(params.is_empty());
        assert_eq!(params.encode(), "");
    }

    #[test]
    fn test_set_keeps_insertion_order() {
        let mut params = QueryParams::new();
        params.set("apiKey", "k");
        params.set("url", "example.com");
        params.set("type", "png");
        assert_eq!(params.encode(), "apiKey=k&url=example.com&type=png");
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut params = QueryParams::new();
        params.set("width", "800");
        params.set("height", "600");
        params.set("width", "1024");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("width"), Some("1024"));
        assert_eq!(params.encode(), "width=1024&height=600");
    }

    #[test]
    fn test_encode_escapes_reserved_characters() {
        let mut params = QueryParams::new();
        params.set("cookies", "a=1;b=2");
        params.set("ua", "Mozilla 5.0");
        assert_eq!(params.encode(), "cookies=a%3D1%3Bb%3D2&ua=Mozilla+5.0");
    }

    #[test]
    fn test_contains_and_get_missing_key() {
        let params = QueryParams::new();
        assert!(!params.contains("thumbWidth"));
        assert_eq!(params.get("thumbWidth"), None);
    }
}
