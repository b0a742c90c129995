//! # tokenlink - Signed, Time-Bound Link Tokens
//!
//! > Issue and check HMAC-signed JSON Web Tokens for verification links,
//! > password-reset links and simple API sessions.
//!
//! **tokenlink** is a stateless token engine. It writes a header and a payload
//! into the JWT compact serialization, signs them with a secret the caller
//! supplies on every call, and later answers three independent questions about
//! a token it receives back: is it well-formed, has it expired, and does its
//! signature match.
//!
//! ## Overview
//!
//! A token is three Base64URL segments (no padding) joined by `.`:
//!
//! ```text
//! base64url(header JSON) . base64url(payload JSON) . base64url(MAC)
//! ```
//!
//! The MAC covers exactly the first two encoded segments. The algorithm is
//! named by the header's `alg` member and looked up in an
//! [`AlgorithmRegistry`]; HS256, HS384 and HS512 ship by default and `"none"`
//! is always rejected.
//!
//! ## Quick Start
//!
//! ```
//! use tokenlink::{AlgorithmId, Claims, Header, TokenService};
//!
//! let service = TokenService::new();
//! let header = Header::new(AlgorithmId::HS256);
//! let claims = Claims::new().with("userId", 42);
//!
//! let token = service.generate(&header, &claims, "secret123")?;
//!
//! // Later, when the link is followed
//! if service.is_valid(&token) && !service.is_expired(&token) && service.check(&token, "secret123") {
//!     let payload = service.get_payload(&token)?;
//!     assert_eq!(payload.user_id(), Some(42));
//! }
//! # Ok::<(), tokenlink::Error>(())
//! ```
//!
//! ## Verification
//!
//! The predicates [`is_valid`](TokenService::is_valid),
//! [`is_expired`](TokenService::is_expired) and [`check`](TokenService::check)
//! never fail: a token that cannot be decoded is invalid, expired and
//! unsigned. They do not depend on each other, so a caller must require all
//! three before trusting [`get_payload`](TokenService::get_payload).
//! [`verify`](TokenService::verify) runs the whole sequence and reports why a
//! token was rejected:
//!
//! ```
//! use std::time::Duration;
//! use tokenlink::{AlgorithmId, Claims, Error, Header, TokenService};
//!
//! let service = TokenService::new();
//! let token = service.generate_with_validity(
//!     &Header::new(AlgorithmId::HS256),
//!     &Claims::new().with("userId", 7),
//!     "secret123",
//!     Duration::from_secs(3 * 60 * 60),
//! )?;
//!
//! assert_eq!(service.verify(&token, "secret123")?.user_id(), Some(7));
//! assert!(matches!(service.verify(&token, "wrong"), Err(Error::SignatureInvalid)));
//! # Ok::<(), tokenlink::Error>(())
//! ```
//!
//! ## Expiry
//!
//! Expiry is read from the `exp` claim (Unix seconds). A token is expired once
//! `exp + clock_skew <= now`. `generate` never adds `exp` on its own; use
//! [`generate_with_validity`](TokenService::generate_with_validity) or set it
//! on the [`Claims`]. Tokens without `exp` never expire unless
//! [`ValidationConfig::require_expiration`] is set.
//!
//! ## Configuration
//!
//! [`TokenConfig::from_env`] reads `APP_JWT_SECRET`,
//! `APP_JWT_VALIDITY_SECONDS`, `APP_JWT_CLOCK_SKEW_SECONDS` and
//! `APP_JWT_REQUIRE_EXP`.
//!
//! ## Security
//!
//! ### "none" Algorithm Rejection
//!
//! The `"none"` algorithm (unsigned tokens) is always rejected per [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725).
//!
//! ### Timing Attack Protection
//!
//! Signatures are compared in constant time via the [`constant_time_eq`](https://crates.io/crates/constant_time_eq)
//! crate.
//!
//! ### Secrets
//!
//! [`Secret`] never prints its bytes and wipes them on drop. Secrets and token
//! strings are never written to the log.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515) JSON Web Signature (JWS)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519) JSON Web Token (JWT)
//! - [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725) JSON Web Signature Best Practices

// Core modules
pub mod error;
pub(crate) mod limits;
pub mod utils;

// Algorithm system
pub mod algorithm;
pub mod signer;

// Token types
pub mod token;

// Settings and the service (main public API)
pub mod config;
pub mod service;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use service::TokenService;

pub use config::{Secret, TokenConfig, ValidationConfig};

pub use algorithm::{Algorithm, AlgorithmId, AlgorithmRegistry};
pub use error::{Error, Result};
pub use signer::Signer;
pub use token::{Claims, DecodedToken, Header, TokenCodec};
