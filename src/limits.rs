//! Size limit constants for input validation

/// Maximum length for a token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded header JSON (8KB)
/// Headers are typically small (< 100 bytes), but we allow reasonable margin
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for a Base64URL-encoded signature segment (1.5KB)
/// HS512 produces 86 characters; anything near this bound is not ours
pub(crate) const MAX_SIGNATURE_B64_SIZE: usize = 1536;

/// Maximum length for the algorithm (alg) field in a header (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

/// Maximum clock skew tolerance (300 seconds = 5 minutes)
/// Prevents clock skew from effectively disabling expiration checks
pub(crate) const MAX_CLOCK_SKEW_SECONDS: u64 = 300;

/// Maximum validity stamped onto a generated token (1 year)
pub(crate) const MAX_VALIDITY_SECONDS: u64 = 86400 * 365;
