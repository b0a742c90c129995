//! Errors for tokenlink
//!
//! Decoding and issuing operations return [`Result`]. The verification
//! predicates on [`TokenService`](crate::TokenService) never surface these
//! errors; they collapse them into a conservative boolean instead.

use thiserror::Error;

/// tokenlink Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors (malformed token)
    // ============================================================================
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Invalid JWT format: expected three non-empty parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    // ============================================================================
    // Signing Errors
    // ============================================================================
    #[error("Missing required header field: {0}")]
    HeaderMissingField(String),

    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("The 'none' algorithm is rejected for security reasons (RFC 8725)")]
    AlgorithmNoneRejected,

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    // ============================================================================
    // Verification Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Token expired at {expired_at} (now: {now}, skew: {skew}s)")]
    TokenExpired {
        expired_at: i64,
        now: i64,
        skew: u64,
    },

    #[error("Token expiration claim 'exp' is missing or not a number")]
    TokenExpirationInvalid,

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),
}

impl Error {
    /// The token could not be decoded into header, payload and signature.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::TokenTooLarge { .. }
                | Error::FormatInvalid
                | Error::FormatInvalidBase64(_)
                | Error::FormatInvalidJson(_)
        )
    }

    /// The token could not be signed (or its signature recomputed) with the
    /// algorithm named in its header.
    pub fn is_signing(&self) -> bool {
        matches!(
            self,
            Error::HeaderMissingField(_)
                | Error::AlgorithmUnsupported(_)
                | Error::AlgorithmNoneRejected
                | Error::SigningFailed(_)
        )
    }
}

/// Result type alias for tokenlink operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes_are_disjoint() {
        let malformed = [
            Error::TokenTooLarge { size: 2, max: 1 },
            Error::FormatInvalid,
            Error::FormatInvalidBase64("x".into()),
            Error::FormatInvalidJson("x".into()),
        ];
        for err in &malformed {
            assert!(err.is_malformed(), "{err:?}");
            assert!(!err.is_signing(), "{err:?}");
        }

        let signing = [
            Error::HeaderMissingField("alg".into()),
            Error::AlgorithmUnsupported("RS256".into()),
            Error::AlgorithmNoneRejected,
            Error::SigningFailed("x".into()),
        ];
        for err in &signing {
            assert!(err.is_signing(), "{err:?}");
            assert!(!err.is_malformed(), "{err:?}");
        }

        assert!(!Error::SignatureInvalid.is_malformed());
        assert!(!Error::SignatureInvalid.is_signing());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::AlgorithmUnsupported("RS256".into()).to_string(),
            "Algorithm 'RS256' is not supported"
        );
        assert_eq!(
            Error::TokenExpired {
                expired_at: 10,
                now: 20,
                skew: 0
            }
            .to_string(),
            "Token expired at 10 (now: 20, skew: 0s)"
        );
    }
}
