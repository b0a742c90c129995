use std::collections::HashMap;
use std::sync::Arc;

use crate::algorithm::Algorithm;
use crate::algorithm::hmac::{HS256, HS384, HS512};
use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;

/// Lookup table from `alg` header values to algorithm implementations
///
/// The default registry holds the HMAC family. Additional algorithms are
/// registered by name; registering a name again replaces the previous entry.
/// `"none"` is refused on lookup regardless of what has been registered.
#[derive(Clone)]
pub struct AlgorithmRegistry {
    algorithms: HashMap<&'static str, Arc<dyn Algorithm>>,
}

impl AlgorithmRegistry {
    /// A registry with nothing in it
    pub fn empty() -> Self {
        Self {
            algorithms: HashMap::new(),
        }
    }

    /// HS256, HS384 and HS512
    pub fn hmac() -> Self {
        Self::empty().with(HS256).with(HS384).with(HS512)
    }

    /// Only HS256
    pub fn hs256_only() -> Self {
        Self::empty().with(HS256)
    }

    /// Add an algorithm, keyed by its [`Algorithm::name`]
    pub fn with<A: Algorithm + 'static>(mut self, algorithm: A) -> Self {
        self.register(algorithm);
        self
    }

    /// Add an algorithm in place
    pub fn register<A: Algorithm + 'static>(&mut self, algorithm: A) {
        self.algorithms.insert(algorithm.name(), Arc::new(algorithm));
    }

    /// Find the implementation for an `alg` header value
    pub fn get(&self, name: &str) -> Result<&dyn Algorithm> {
        if name == "none" {
            return Err(Error::AlgorithmNoneRejected);
        }
        if let Some(algorithm) = self.algorithms.get(name) {
            return Ok(&**algorithm);
        }
        // Unknown names come from untrusted headers; only a prefix is echoed
        if name.len() > MAX_ALG_LENGTH {
            let prefix: String = name.chars().take(MAX_ALG_LENGTH).collect();
            return Err(Error::AlgorithmUnsupported(format!("{prefix}...")));
        }
        Err(Error::AlgorithmUnsupported(name.to_string()))
    }

    /// Whether `name` resolves to an algorithm
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Registered algorithm names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.algorithms.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::hmac()
    }
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("algorithms", &self.names())
            .finish()
    }
}
