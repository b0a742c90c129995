use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::algorithm::AlgorithmId;

/// Token header
///
/// A flat JSON object. Tokens issued by this crate carry `type` (`"JWT"`) and
/// `alg`; any other member is preserved as-is. When reading the token type the
/// standard `typ` member is accepted as well, so headers produced by other JWT
/// libraries are understood.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header(Map<String, Value>);

impl Header {
    /// `{"alg": <algorithm>, "type": "JWT"}`
    pub fn new(algorithm: AlgorithmId) -> Self {
        let mut header = Self::default();
        header.insert("alg", algorithm.as_str());
        header.insert("type", "JWT");
        header
    }

    /// Algorithm name from the `alg` member, if it is a string
    pub fn algorithm_str(&self) -> Option<&str> {
        self.0.get("alg").and_then(Value::as_str)
    }

    /// Token type from `type`, falling back to `typ`
    pub fn token_type(&self) -> Option<&str> {
        self.0
            .get("type")
            .or_else(|| self.0.get("typ"))
            .and_then(Value::as_str)
    }

    /// Key ID (`kid`) if present
    pub fn key_id(&self) -> Option<&str> {
        self.0.get("kid").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a member, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Header {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<AlgorithmId> for Header {
    fn from(algorithm: AlgorithmId) -> Self {
        Self::new(algorithm)
    }
}
