//! # Content Digests
//!
//! `ContentDigest` is a SHA-256 digest with hex rendering, computed
//! exclusively from [`CanonicalBytes`]. Bid commitments use their own
//! domain-separated preimage in `tender-crypto`; this type covers general
//! content addressing (attestation payload digests, event log anchoring).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::{AuctionError, InvalidInput};

/// A SHA-256 content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentDigest(pub [u8; 32]);

impl ContentDigest {
    /// Create a digest from raw bytes.
    ///
    /// Prefer [`sha256_digest()`] for computing digests from canonical
    /// bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Whether every byte is zero. The zero digest is reserved as an
    /// explicit "absent" marker and is rejected wherever a real digest is
    /// required.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a digest from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, AuctionError> {
        let hex = hex.trim().to_lowercase();
        if hex.len() != 64 {
            return Err(InvalidInput::MalformedDigest(format!(
                "digest hex must be 64 chars, got {}",
                hex.len()
            ))
            .into());
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk)
                .map_err(|_| InvalidInput::MalformedDigest("non-utf8 hex".into()))?;
            bytes[i] = u8::from_str_radix(pair, 16)
                .map_err(|_| InvalidInput::MalformedDigest(format!("invalid hex pair {pair:?}")))?;
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for ContentDigest {
    type Error = AuctionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<ContentDigest> for String {
    fn from(digest: ContentDigest) -> Self {
        digest.to_hex()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// Accepts only `&CanonicalBytes`, not raw `&[u8]`, so every digest in the
/// system flows through the canonicalization pipeline.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_digest_is_deterministic() {
        let a = sha256_digest(&CanonicalBytes::new(&json!({"k": 1})).unwrap());
        let b = sha256_digest(&CanonicalBytes::new(&json!({"k": 1})).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_content_different_digest() {
        let a = sha256_digest(&CanonicalBytes::new(&json!({"k": 1})).unwrap());
        let b = sha256_digest(&CanonicalBytes::new(&json!({"k": 2})).unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn test_hex_roundtrip() {
        let d = sha256_digest(&CanonicalBytes::new(&json!("x")).unwrap());
        assert_eq!(ContentDigest::from_hex(&d.to_hex()).unwrap(), d);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(ContentDigest::from_hex("abc").is_err());
        assert!(ContentDigest::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_zero_digest_detected() {
        assert!(ContentDigest::from_bytes([0u8; 32]).is_zero());
        let real = sha256_digest(&CanonicalBytes::new(&json!("x")).unwrap());
        assert!(!real.is_zero());
    }

    #[test]
    fn test_display_prefix() {
        let d = ContentDigest::from_bytes([0u8; 32]);
        assert!(d.to_string().starts_with("sha256:"));
    }
}
