use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Token payload
///
/// An arbitrary JSON object of claims. Only `exp` carries meaning for the
/// token engine itself; the application reads `userId` to address the user
/// record once a token has been verified.
///
/// ```
/// use tokenlink::Claims;
///
/// let claims = Claims::new().with("userId", 42);
/// assert_eq!(claims.user_id(), Some(42));
/// assert_eq!(claims.expiration(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

/// State of the `exp` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Expiration {
    Absent,
    At(i64),
    /// Present but not a number
    Invalid,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a claim, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Subject of verification and reset links (`userId`)
    pub fn user_id(&self) -> Option<u64> {
        self.0.get("userId").and_then(Value::as_u64)
    }

    /// Expiration time (`exp`) in seconds since the Unix epoch
    pub fn expiration(&self) -> Option<i64> {
        match self.expiration_claim() {
            Expiration::At(exp) => Some(exp),
            Expiration::Absent | Expiration::Invalid => None,
        }
    }

    /// Issued-at time (`iat`) in seconds since the Unix epoch
    pub fn issued_at(&self) -> Option<i64> {
        self.0.get("iat").and_then(Value::as_i64)
    }

    pub fn set_expiration(&mut self, timestamp: i64) {
        self.insert("exp", timestamp);
    }

    pub fn set_issued_at(&mut self, timestamp: i64) {
        self.insert("iat", timestamp);
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Fractional timestamps are truncated toward negative infinity, unsigned
    /// values beyond `i64::MAX` saturate.
    pub(crate) fn expiration_claim(&self) -> Expiration {
        let Some(exp) = self.0.get("exp") else {
            return Expiration::Absent;
        };
        if let Some(exp) = exp.as_i64() {
            return Expiration::At(exp);
        }
        if exp.as_u64().is_some() {
            return Expiration::At(i64::MAX);
        }
        match exp.as_f64() {
            Some(exp) if exp.is_finite() => Expiration::At(exp.floor() as i64),
            _ => Expiration::Invalid,
        }
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Claims {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::FormatInvalidJson(format!(
                "expected a JSON object for claims, found {other}"
            ))),
        }
    }
}
