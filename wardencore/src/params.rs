//! Runtime parameters supplied alongside an authorization query.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Params(HashMap<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accessors() -> anyhow::Result<()> {
        let params = Params::new()
            .with("targetUserId", "bob")
            .with("count", 3);
        assert_eq!(params.get_str("targetUserId"), Some("bob"));
        // not a string
        assert_eq!(params.get_str("count"), None);
        assert_eq!(params.get("count"), Some(&Value::from(3)));
        assert_eq!(params.get_str("missing"), None);

        let parsed: Params = serde_json::from_str(r#"{"targetUserId": "bob", "count": 3}"#)?;
        assert_eq!(parsed, params);
        assert!(Params::default().is_empty());
        Ok(())
    }
}
