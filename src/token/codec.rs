use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_SIGNATURE_B64_SIZE, MAX_TOKEN_LENGTH,
};
use crate::token::{Claims, Header};
use crate::utils::base64url;

/// Compact serialization of tokens
///
/// `encode` produces the signing input (`header.payload`); the signature
/// segment is appended by the [`Signer`](crate::Signer). `decode` takes a
/// complete three-segment token apart without checking its signature.
pub struct TokenCodec;

impl TokenCodec {
    /// Encode header and payload into `headerSeg.payloadSeg`
    ///
    /// Members are serialized in key order, so equal inputs always produce
    /// equal segments.
    pub fn encode(header: &Header, claims: &Claims) -> Result<String> {
        Ok(format!(
            "{}.{}",
            encode_segment(header, "header")?,
            encode_segment(claims, "payload")?
        ))
    }

    /// Split and decode a token
    pub fn decode(token: &str) -> Result<DecodedToken> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut parts = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::FormatInvalid);
        };
        if header_b64.is_empty() || payload_b64.is_empty() || signature_b64.is_empty() {
            return Err(Error::FormatInvalid);
        }

        if signature_b64.len() > MAX_SIGNATURE_B64_SIZE {
            return Err(Error::FormatInvalidBase64(format!(
                "Signature too large: {} bytes (max: {})",
                signature_b64.len(),
                MAX_SIGNATURE_B64_SIZE
            )));
        }

        let header: Header = decode_segment(header_b64, MAX_DECODED_HEADER_SIZE, "header")?;
        let claims: Claims = decode_segment(payload_b64, MAX_DECODED_PAYLOAD_SIZE, "payload")?;

        Ok(DecodedToken {
            header,
            claims,
            header_b64: header_b64.to_string(),
            payload_b64: payload_b64.to_string(),
            signature_b64: signature_b64.to_string(),
        })
    }
}

fn encode_segment<T: Serialize>(value: &T, part: &str) -> Result<String> {
    let json = serde_json::to_vec(value)
        .map_err(|e| Error::SigningFailed(format!("Failed to serialize {part}: {e}")))?;
    Ok(base64url::encode_bytes(&json))
}

fn decode_segment<T: DeserializeOwned>(segment: &str, max_size: usize, part: &str) -> Result<T> {
    let json = base64url::decode_bytes(segment, max_size)?;
    serde_json::from_slice(&json)
        .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse {part}: {e}")))
}

/// A token taken apart by [`TokenCodec::decode`]
///
/// Nothing here has been authenticated yet: the signature segment is carried
/// along untouched for the [`Signer`](crate::Signer) to check.
#[derive(Debug, Clone)]
pub struct DecodedToken {
    header: Header,
    claims: Claims,
    header_b64: String,
    payload_b64: String,
    signature_b64: String,
}

impl DecodedToken {
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Unverified claims
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn into_claims(self) -> Claims {
        self.claims
    }

    pub fn header_segment(&self) -> &str {
        &self.header_b64
    }

    pub fn payload_segment(&self) -> &str {
        &self.payload_b64
    }

    pub fn signature_segment(&self) -> &str {
        &self.signature_b64
    }

    /// The signing input (header.payload)
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header_b64, self.payload_b64)
    }
}
