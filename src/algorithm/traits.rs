use crate::error::Result;
use crate::utils::base64url;

use constant_time_eq::constant_time_eq;

/// Core algorithm trait that all token signature algorithms implement
///
/// An algorithm is looked up by [`name`](Algorithm::name), the value carried
/// in the header's `alg` field. Symmetric algorithms only need to provide
/// [`sign`](Algorithm::sign); verification recomputes the signature and
/// compares the encoded segments in constant time.
pub trait Algorithm: Send + Sync {
    /// The algorithm identifier (e.g., "HS256")
    fn name(&self) -> &'static str;

    /// Compute the raw signature over `signing_input` (header.payload)
    fn sign(&self, signing_input: &str, secret: &[u8]) -> Result<Vec<u8>>;

    /// Verify a Base64URL-encoded signature segment
    ///
    /// Returns `Ok(false)` on mismatch; errors are reserved for failures to
    /// compute the expected signature at all.
    fn verify(&self, signing_input: &str, signature: &str, secret: &[u8]) -> Result<bool> {
        let expected = base64url::encode_bytes(&self.sign(signing_input, secret)?);
        Ok(constant_time_eq(expected.as_bytes(), signature.as_bytes()))
    }
}
