//! Configuration for issuing and checking tokens
//!
//! [`ValidationConfig`] tunes the expiry check. [`TokenConfig`] bundles what an
//! application reads from its environment: the signing secret, the validity
//! stamped onto link tokens and the validation settings.

use std::time::Duration;

use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::limits::{MAX_CLOCK_SKEW_SECONDS, MAX_VALIDITY_SECONDS};

/// Environment variable holding the signing secret
pub const SECRET_ENV: &str = "APP_JWT_SECRET";
/// Environment variable holding the link validity in seconds
pub const VALIDITY_ENV: &str = "APP_JWT_VALIDITY_SECONDS";
/// Environment variable holding the clock skew tolerance in seconds
pub const CLOCK_SKEW_ENV: &str = "APP_JWT_CLOCK_SKEW_SECONDS";
/// Environment variable switching on the `exp` requirement
pub const REQUIRE_EXP_ENV: &str = "APP_JWT_REQUIRE_EXP";

/// Validity of verification and reset links (3 hours)
pub const DEFAULT_VALIDITY: Duration = Duration::from_secs(3 * 60 * 60);

/// Configuration for the expiry check
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationConfig {
    /// Seconds a token stays acceptable past its `exp` (default: 0)
    pub clock_skew_seconds: u64,

    /// Treat tokens without an `exp` claim as expired (default: false)
    pub require_expiration: bool,
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set clock skew tolerance
    pub fn clock_skew(mut self, seconds: u64) -> Self {
        self.clock_skew_seconds = seconds;
        self
    }

    /// Reject tokens that carry no `exp` claim
    pub fn require_expiration(mut self) -> Self {
        self.require_expiration = true;
        self
    }

    /// Check the configured values against their bounds
    pub fn validate(&self) -> Result<()> {
        if self.clock_skew_seconds > MAX_CLOCK_SKEW_SECONDS {
            return Err(Error::ConfigurationInvalid(format!(
                "clock skew too large: {} seconds (maximum: {} seconds)",
                self.clock_skew_seconds, MAX_CLOCK_SKEW_SECONDS
            )));
        }
        Ok(())
    }
}

/// Symmetric signing secret
///
/// Never printed by `Debug` and wiped from memory on drop.
#[derive(Clone)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Secret {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }
}

impl From<String> for Secret {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret([REDACTED; {} bytes])", self.0.len())
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Application-level token settings
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Signing secret
    pub secret: Secret,

    /// Validity stamped by [`TokenService::generate_with_validity`](crate::TokenService::generate_with_validity)
    pub validity: Duration,

    /// Expiry check settings
    pub validation: ValidationConfig,
}

impl TokenConfig {
    /// Create a configuration with the default validity and validation
    pub fn new(secret: impl Into<Secret>) -> Self {
        Self {
            secret: secret.into(),
            validity: DEFAULT_VALIDITY,
            validation: ValidationConfig::default(),
        }
    }

    /// Set the link validity
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    /// Set the validation settings
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    /// Load from the process environment
    ///
    /// `APP_JWT_SECRET` is required; the other variables fall back to their
    /// defaults when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_ENV)
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| Error::ConfigurationInvalid(format!("{SECRET_ENV} is not set")))?;

        let validity = match lookup(VALIDITY_ENV) {
            Some(value) => Duration::from_secs(parse_var(VALIDITY_ENV, &value)?),
            None => DEFAULT_VALIDITY,
        };

        let clock_skew_seconds = match lookup(CLOCK_SKEW_ENV) {
            Some(value) => parse_var(CLOCK_SKEW_ENV, &value)?,
            None => 0,
        };

        let require_expiration = match lookup(REQUIRE_EXP_ENV) {
            Some(value) => parse_bool(REQUIRE_EXP_ENV, &value)?,
            None => false,
        };

        let config = Self {
            secret: Secret::from(secret),
            validity,
            validation: ValidationConfig {
                clock_skew_seconds,
                require_expiration,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configured values against their bounds
    pub fn validate(&self) -> Result<()> {
        if self.secret.is_empty() {
            return Err(Error::ConfigurationInvalid("secret is empty".to_string()));
        }
        if self.validity.as_secs() > MAX_VALIDITY_SECONDS {
            return Err(Error::ConfigurationInvalid(format!(
                "validity too large: {} seconds (maximum: {} seconds)",
                self.validity.as_secs(),
                MAX_VALIDITY_SECONDS
            )));
        }
        self.validation.validate()
    }
}

fn parse_var(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| Error::ConfigurationInvalid(format!("{key}={value:?}: {e}")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::ConfigurationInvalid(format!(
            "{key}={value:?}: expected a boolean"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TokenConfig::from_lookup(lookup(&[(SECRET_ENV, "s3cr3t")])).unwrap();
        assert_eq!(config.secret.as_bytes(), b"s3cr3t");
        assert_eq!(config.validity, DEFAULT_VALIDITY);
        assert_eq!(config.validation, ValidationConfig::default());
    }

    #[test]
    fn test_all_variables() {
        let config = TokenConfig::from_lookup(lookup(&[
            (SECRET_ENV, "s3cr3t"),
            (VALIDITY_ENV, "600"),
            (CLOCK_SKEW_ENV, " 30 "),
            (REQUIRE_EXP_ENV, "true"),
        ]))
        .unwrap();
        assert_eq!(config.validity, Duration::from_secs(600));
        assert_eq!(config.validation.clock_skew_seconds, 30);
        assert!(config.validation.require_expiration);
    }

    #[test]
    fn test_missing_secret() {
        assert!(matches!(
            TokenConfig::from_lookup(lookup(&[])),
            Err(Error::ConfigurationInvalid(_))
        ));
        assert!(matches!(
            TokenConfig::from_lookup(lookup(&[(SECRET_ENV, "")])),
            Err(Error::ConfigurationInvalid(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        for vars in [
            [(SECRET_ENV, "s"), (VALIDITY_ENV, "three hours")],
            [(SECRET_ENV, "s"), (CLOCK_SKEW_ENV, "-1")],
            [(SECRET_ENV, "s"), (CLOCK_SKEW_ENV, "301")],
            [(SECRET_ENV, "s"), (REQUIRE_EXP_ENV, "maybe")],
            [(SECRET_ENV, "s"), (VALIDITY_ENV, "999999999")],
        ] {
            assert!(
                matches!(
                    TokenConfig::from_lookup(lookup(&vars)),
                    Err(Error::ConfigurationInvalid(_))
                ),
                "{vars:?}"
            );
        }
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = Secret::from("hunter2");
        let printed = format!("{secret:?}");
        assert!(!printed.contains("hunter2"));
        assert_eq!(printed, "Secret([REDACTED; 7 bytes])");

        let config = TokenConfig::new("hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn test_validation_builder() {
        let config = ValidationConfig::new().clock_skew(60).require_expiration();
        assert_eq!(config.clock_skew_seconds, 60);
        assert!(config.require_expiration);
        assert!(config.validate().is_ok());
        assert!(ValidationConfig::new().clock_skew(301).validate().is_err());
    }
}
