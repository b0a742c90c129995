//! Signature computation and verification over the signing input
//!
//! The signature segment covers exactly `headerSeg.payloadSeg`, the ASCII
//! bytes of the first two encoded segments. The algorithm is chosen by the
//! header's `alg` member through an [`AlgorithmRegistry`]; an algorithm that
//! is not registered is an error, never a fallback.

use crate::algorithm::{Algorithm, AlgorithmRegistry};
use crate::error::{Error, Result};
use crate::token::{Claims, DecodedToken, Header, TokenCodec};
use crate::utils::base64url;

/// Signs and verifies tokens with caller-supplied secrets
#[derive(Debug, Clone, Default)]
pub struct Signer {
    registry: AlgorithmRegistry,
}

impl Signer {
    /// Signer for the HMAC family (HS256, HS384, HS512)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: AlgorithmRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Whether tokens with this `alg` can be signed and verified
    pub fn supports(&self, algorithm: &str) -> bool {
        self.registry.contains(algorithm)
    }

    /// Compute the signature segment for `header_b64.payload_b64`
    pub fn sign(
        &self,
        algorithm: &str,
        header_b64: &str,
        payload_b64: &str,
        secret: &[u8],
    ) -> Result<String> {
        let algorithm = self.registry.get(algorithm)?;
        let signature = algorithm.sign(&format!("{header_b64}.{payload_b64}"), secret)?;
        Ok(base64url::encode_bytes(&signature))
    }

    /// Check a signature segment against `header_b64.payload_b64`
    ///
    /// The comparison runs in constant time over the encoded segments.
    pub fn verify(
        &self,
        algorithm: &str,
        header_b64: &str,
        payload_b64: &str,
        signature_b64: &str,
        secret: &[u8],
    ) -> Result<bool> {
        let algorithm = self.registry.get(algorithm)?;
        algorithm.verify(&format!("{header_b64}.{payload_b64}"), signature_b64, secret)
    }

    /// Encode and sign a complete token
    pub fn sign_token(&self, header: &Header, claims: &Claims, secret: &[u8]) -> Result<String> {
        let algorithm = self.algorithm_for(header)?;
        let signing_input = TokenCodec::encode(header, claims)?;
        let signature = algorithm.sign(&signing_input, secret)?;
        Ok(format!(
            "{signing_input}.{}",
            base64url::encode_bytes(&signature)
        ))
    }

    /// Verify a decoded token's signature with the algorithm named in its header
    pub fn verify_token(&self, token: &DecodedToken, secret: &[u8]) -> Result<bool> {
        let algorithm = self.algorithm_for(token.header())?;
        algorithm.verify(&token.signing_input(), token.signature_segment(), secret)
    }

    fn algorithm_for(&self, header: &Header) -> Result<&dyn Algorithm> {
        let name = header
            .algorithm_str()
            .ok_or_else(|| Error::HeaderMissingField("alg".to_string()))?;
        self.registry.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::AlgorithmId;

    const HEADER_B64: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
    const PAYLOAD_B64: &str =
        "eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ";
    const SIGNATURE_B64: &str = "SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

    #[test]
    fn test_sign_jwtio_reference() {
        let signature = Signer::new()
            .sign("HS256", HEADER_B64, PAYLOAD_B64, b"your-256-bit-secret")
            .unwrap();
        assert_eq!(signature, SIGNATURE_B64);
        assert!(!signature.contains('='));
    }

    #[test]
    fn test_verify() {
        let signer = Signer::new();
        assert!(
            signer
                .verify("HS256", HEADER_B64, PAYLOAD_B64, SIGNATURE_B64, b"your-256-bit-secret")
                .unwrap()
        );
        assert!(
            !signer
                .verify("HS256", HEADER_B64, PAYLOAD_B64, SIGNATURE_B64, b"wrong")
                .unwrap()
        );
        // Signature computed for a different algorithm
        assert!(
            !signer
                .verify("HS512", HEADER_B64, PAYLOAD_B64, SIGNATURE_B64, b"your-256-bit-secret")
                .unwrap()
        );
    }

    #[test]
    fn test_verify_rejects_truncated_and_padded_signatures() {
        let signer = Signer::new();
        let secret = b"your-256-bit-secret";
        let truncated = &SIGNATURE_B64[..SIGNATURE_B64.len() - 1];
        let padded = format!("{SIGNATURE_B64}=");
        assert!(!signer.verify("HS256", HEADER_B64, PAYLOAD_B64, truncated, secret).unwrap());
        assert!(!signer.verify("HS256", HEADER_B64, PAYLOAD_B64, &padded, secret).unwrap());
    }

    #[test]
    fn test_unsupported_algorithm() {
        let signer = Signer::new();
        assert!(matches!(
            signer.sign("RS256", HEADER_B64, PAYLOAD_B64, b"secret"),
            Err(Error::AlgorithmUnsupported(_))
        ));
        assert!(matches!(
            signer.verify("none", HEADER_B64, PAYLOAD_B64, "", b"secret"),
            Err(Error::AlgorithmNoneRejected)
        ));
        assert!(signer.supports("HS256"));
        assert!(!signer.supports("ES256"));
    }

    #[test]
    fn test_sign_token_round_trip() {
        let signer = Signer::new();
        let claims = Claims::new().with("userId", 42);
        let token = signer
            .sign_token(&Header::new(AlgorithmId::HS384), &claims, b"secret")
            .unwrap();

        let decoded = TokenCodec::decode(&token).unwrap();
        assert!(signer.verify_token(&decoded, b"secret").unwrap());
        assert!(!signer.verify_token(&decoded, b"other").unwrap());
        assert_eq!(decoded.claims(), &claims);
    }

    #[test]
    fn test_sign_token_requires_alg() {
        let mut header = Header::default();
        header.insert("type", "JWT");
        assert!(matches!(
            Signer::new().sign_token(&header, &Claims::new(), b"secret"),
            Err(Error::HeaderMissingField(field)) if field == "alg"
        ));
    }

    #[test]
    fn test_restricted_registry() {
        let signer = Signer::with_registry(AlgorithmRegistry::hs256_only());
        assert!(matches!(
            signer.sign_token(&Header::new(AlgorithmId::HS512), &Claims::new(), b"secret"),
            Err(Error::AlgorithmUnsupported(_))
        ));
    }
}
