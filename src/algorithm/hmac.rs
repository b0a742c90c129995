use crate::algorithm::Algorithm;
use crate::error::{Error, Result};

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

macro_rules! hmac_algorithm {
    ($(#[$meta:meta])* $name:ident, $digest:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Algorithm for $name {
            fn name(&self) -> &'static str {
                stringify!($name)
            }

            fn sign(&self, signing_input: &str, secret: &[u8]) -> Result<Vec<u8>> {
                let mut mac = Hmac::<$digest>::new_from_slice(secret)
                    .map_err(|e| Error::SigningFailed(format!("invalid HMAC key: {e}")))?;
                mac.update(signing_input.as_bytes());
                Ok(mac.finalize().into_bytes().to_vec())
            }
        }
    };
}

hmac_algorithm!(
    /// HS256 algorithm (HMAC with SHA-256)
    HS256,
    Sha256
);

hmac_algorithm!(
    /// HS384 algorithm (HMAC with SHA-384)
    HS384,
    Sha384
);

hmac_algorithm!(
    /// HS512 algorithm (HMAC with SHA-512)
    HS512,
    Sha512
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64url;

    const SIGNING_INPUT: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ";

    #[test]
    fn test_hs256_matches_jwtio_reference() {
        let signature = HS256.sign(SIGNING_INPUT, b"your-256-bit-secret").unwrap();
        assert_eq!(
            base64url::encode_bytes(&signature),
            "SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c"
        );
    }

    #[test]
    fn test_signature_lengths() {
        assert_eq!(HS256.sign("a.b", b"k").unwrap().len(), 32);
        assert_eq!(HS384.sign("a.b", b"k").unwrap().len(), 48);
        assert_eq!(HS512.sign("a.b", b"k").unwrap().len(), 64);
    }

    #[test]
    fn test_hs256_valid_signature() {
        let secret = b"your-256-bit-secret";
        let signature = base64url::encode_bytes(&HS256.sign(SIGNING_INPUT, secret).unwrap());
        assert!(HS256.verify(SIGNING_INPUT, &signature, secret).unwrap());
    }

    #[test]
    fn test_hs256_wrong_secret() {
        let signature =
            base64url::encode_bytes(&HS256.sign(SIGNING_INPUT, b"your-256-bit-secret").unwrap());
        assert!(!HS256.verify(SIGNING_INPUT, &signature, b"wrong-secret").unwrap());
    }

    #[test]
    fn test_hs256_invalid_signature() {
        let wrong_signature = base64url::encode("wrong");
        assert!(!HS256.verify(SIGNING_INPUT, &wrong_signature, b"secret").unwrap());
    }

    #[test]
    fn test_hs384_and_hs512_round_trip() {
        let secret = b"your-512-bit-secret-needs-to-be-even-longer-than-384-bit";
        let algorithms: [&dyn Algorithm; 2] = [&HS384, &HS512];
        for alg in algorithms {
            let signature = base64url::encode_bytes(&alg.sign(SIGNING_INPUT, secret).unwrap());
            assert!(alg.verify(SIGNING_INPUT, &signature, secret).unwrap());
            assert!(!HS256.verify(SIGNING_INPUT, &signature, secret).unwrap());
        }
    }

    #[test]
    fn test_empty_secret_is_accepted() {
        // HMAC pads short keys; refusing weak secrets is a configuration concern
        assert!(HS256.sign(SIGNING_INPUT, b"").is_ok());
    }
}
