//! The token service
//!
//! [`TokenService`] is the surface applications talk to. It composes the
//! [`TokenCodec`] and the [`Signer`] and adds the expiry check. Secrets are
//! passed on every call and never kept.
//!
//! Two kinds of operations exist side by side:
//!
//! - `generate`, `get_payload`, `get_header` and `verify` return a [`Result`]
//! - `is_valid`, `is_expired` and `check` are total predicates that collapse
//!   every failure into the conservative answer (invalid, expired, mismatch)
//!
//! The predicates are independent. A caller must establish
//! `is_valid && !is_expired && check` before it trusts what `get_payload`
//! returns; [`TokenService::verify`] runs that sequence in one call.

use std::time::Duration;

use tracing::{debug, trace};

use crate::algorithm::AlgorithmRegistry;
use crate::config::{TokenConfig, ValidationConfig};
use crate::error::{Error, Result};
use crate::signer::Signer;
use crate::token::{Claims, DecodedToken, Expiration, Header, TokenCodec};
use crate::utils::clock::{apply_clock_skew, unix_now};

/// Issues and checks signed, time-bound tokens
///
/// ```
/// use tokenlink::{AlgorithmId, Claims, Header, TokenService};
///
/// let service = TokenService::new();
/// let token = service
///     .generate(&Header::new(AlgorithmId::HS256), &Claims::new().with("userId", 42), "secret123")
///     .unwrap();
///
/// assert!(service.is_valid(&token));
/// assert!(!service.is_expired(&token));
/// assert!(service.check(&token, "secret123"));
/// assert!(!service.check(&token, "wrong"));
/// assert_eq!(service.get_payload(&token).unwrap().user_id(), Some(42));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenService {
    signer: Signer,
    config: ValidationConfig,
}

impl TokenService {
    /// Service for the HMAC family with the default validation settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            signer: Signer::new(),
            config,
        }
    }

    /// Service built from application settings
    ///
    /// The secret is not taken over; it is still passed on each call.
    pub fn from_config(config: &TokenConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config.validation.clone()))
    }

    pub fn with_signer(signer: Signer, config: ValidationConfig) -> Self {
        Self { signer, config }
    }

    /// Restrict or extend the accepted algorithms
    pub fn with_registry(mut self, registry: AlgorithmRegistry) -> Self {
        self.signer = Signer::with_registry(registry);
        self
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Sign `claims` under `header` and return the compact token
    ///
    /// The payload is encoded as given: no claim is added or overwritten.
    /// The algorithm comes from the header's `alg` member.
    pub fn generate(
        &self,
        header: &Header,
        claims: &Claims,
        secret: impl AsRef<[u8]>,
    ) -> Result<String> {
        let token = self.signer.sign_token(header, claims, secret.as_ref())?;
        trace!(
            alg = header.algorithm_str().unwrap_or_default(),
            claims = claims.len(),
            "token generated"
        );
        Ok(token)
    }

    /// Like [`generate`](Self::generate), stamping `iat` and `exp`
    ///
    /// `exp` is set to now plus `validity`. A zero validity leaves the
    /// claims untouched and issues a token without expiry.
    pub fn generate_with_validity(
        &self,
        header: &Header,
        claims: &Claims,
        secret: impl AsRef<[u8]>,
        validity: Duration,
    ) -> Result<String> {
        if validity.is_zero() {
            return self.generate(header, claims, secret);
        }

        let now = unix_now();
        let validity = i64::try_from(validity.as_secs()).unwrap_or(i64::MAX);
        let mut claims = claims.clone();
        claims.set_issued_at(now);
        claims.set_expiration(now.saturating_add(validity));
        self.generate(header, &claims, secret)
    }

    /// Whether the token has the compact shape and decodable header and payload
    ///
    /// Says nothing about the signature or expiry.
    pub fn is_valid(&self, token: &str) -> bool {
        match TokenCodec::decode(token) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "token rejected as malformed");
                false
            }
        }
    }

    /// Whether the token is past its `exp`, against the current time
    ///
    /// An undecodable token counts as expired. A token without `exp` counts as
    /// live unless [`ValidationConfig::require_expiration`] is set.
    pub fn is_expired(&self, token: &str) -> bool {
        self.is_expired_at(token, unix_now())
    }

    /// [`is_expired`](Self::is_expired) against an explicit Unix time
    pub fn is_expired_at(&self, token: &str, now: i64) -> bool {
        let claims = match TokenCodec::decode(token) {
            Ok(decoded) => decoded.into_claims(),
            Err(e) => {
                debug!(error = %e, "undecodable token treated as expired");
                return true;
            }
        };

        match self.check_expiration(&claims, now) {
            Ok(()) => false,
            Err(e) => {
                debug!(error = %e, "token expired");
                true
            }
        }
    }

    /// Whether the token's signature matches under `secret`
    ///
    /// Any failure (malformed token, missing or unsupported `alg`) is a mismatch.
    pub fn check(&self, token: &str, secret: impl AsRef<[u8]>) -> bool {
        let decoded = match TokenCodec::decode(token) {
            Ok(decoded) => decoded,
            Err(e) => {
                debug!(error = %e, "signature check on malformed token");
                return false;
            }
        };

        match self.signer.verify_token(&decoded, secret.as_ref()) {
            Ok(true) => true,
            Ok(false) => {
                debug!(
                    alg = decoded.header().algorithm_str().unwrap_or_default(),
                    "signature mismatch"
                );
                false
            }
            Err(e) => {
                debug!(error = %e, "signature could not be checked");
                false
            }
        }
    }

    /// Decoded payload, without verifying anything
    pub fn get_payload(&self, token: &str) -> Result<Claims> {
        TokenCodec::decode(token).map(DecodedToken::into_claims)
    }

    /// Decoded header, without verifying anything
    pub fn get_header(&self, token: &str) -> Result<Header> {
        TokenCodec::decode(token).map(|decoded| decoded.header().clone())
    }

    /// Decode, check expiry and signature, and return the payload
    ///
    /// Equivalent to `is_valid && !is_expired && check` followed by
    /// `get_payload`, with the reason for a rejection preserved.
    pub fn verify(&self, token: &str, secret: impl AsRef<[u8]>) -> Result<Claims> {
        self.verify_at(token, secret, unix_now())
    }

    /// [`verify`](Self::verify) against an explicit Unix time
    pub fn verify_at(&self, token: &str, secret: impl AsRef<[u8]>, now: i64) -> Result<Claims> {
        let decoded = TokenCodec::decode(token)?;
        self.check_expiration(decoded.claims(), now)?;
        if !self.signer.verify_token(&decoded, secret.as_ref())? {
            debug!(
                alg = decoded.header().algorithm_str().unwrap_or_default(),
                "signature mismatch"
            );
            return Err(Error::SignatureInvalid);
        }
        Ok(decoded.into_claims())
    }

    fn check_expiration(&self, claims: &Claims, now: i64) -> Result<()> {
        match claims.expiration_claim() {
            Expiration::At(exp) => {
                let skew = self.config.clock_skew_seconds;
                if apply_clock_skew(exp, skew) <= now {
                    return Err(Error::TokenExpired {
                        expired_at: exp,
                        now,
                        skew,
                    });
                }
                Ok(())
            }
            Expiration::Absent if self.config.require_expiration => {
                Err(Error::TokenExpirationInvalid)
            }
            Expiration::Absent => Ok(()),
            Expiration::Invalid => Err(Error::TokenExpirationInvalid),
        }
    }
}
