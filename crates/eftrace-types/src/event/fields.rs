use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open bag of log-type specific attributes
///
/// Nothing in here has a fixed schema. Every accessor checks the JSON type
/// and returns `None` when the key is missing, `null`, or of the wrong type,
/// so consumers never have to care how sloppy a given log line was.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Raw accessor for forward compatibility with unrecognized families.
    /// `null` is treated as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Finite JSON number
    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key)
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite())
    }

    /// Non-negative integral JSON number (`12` and `12.0` both qualify)
    pub fn u64(&self, key: &str) -> Option<u64> {
        let value = self.get(key)?;
        if let Some(n) = value.as_u64() {
            return Some(n);
        }
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
            .map(|n| n as u64)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// String form of any present value, for use as a counter key.
    /// Strings are taken verbatim, everything else uses its JSON text (`200`, `true`).
    pub fn key_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Insert only when the key is not already set
    pub fn insert_missing(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Fields {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => Fields::from(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_typed_accessors_reject_wrong_types() {
        let f = fields(json!({"rtt": "12", "url": 5, "cacheHit": "false"}));
        assert_eq!(f.f64("rtt"), None);
        assert_eq!(f.str("url"), None);
        assert_eq!(f.bool("cacheHit"), None);
    }

    #[test]
    fn test_null_is_absent() {
        let f = fields(json!({"groupId": null}));
        assert!(!f.contains("groupId"));
        assert_eq!(f.key_string("groupId"), None);
    }

    #[test]
    fn test_key_string_coercion() {
        let f = fields(json!({"code": 228, "flag": true, "name": "abc", "ratio": 1.5}));
        assert_eq!(f.key_string("code").as_deref(), Some("228"));
        assert_eq!(f.key_string("flag").as_deref(), Some("true"));
        assert_eq!(f.key_string("name").as_deref(), Some("abc"));
        assert_eq!(f.key_string("ratio").as_deref(), Some("1.5"));
    }

    #[test]
    fn test_u64_accepts_integral_floats_only() {
        let f = fields(json!({"a": 12, "b": 12.0, "c": 12.5, "d": -3}));
        assert_eq!(f.u64("a"), Some(12));
        assert_eq!(f.u64("b"), Some(12));
        assert_eq!(f.u64("c"), None);
        assert_eq!(f.u64("d"), None);
    }

    #[test]
    fn test_insert_missing_keeps_existing() {
        let mut f = Fields::new();
        f.insert("url", "/a");
        f.insert_missing("url", "/b");
        f.insert_missing("code", 200);
        assert_eq!(f.str("url"), Some("/a"));
        assert_eq!(f.u64("code"), Some(200));
    }
}
