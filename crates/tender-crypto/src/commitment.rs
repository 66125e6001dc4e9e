//! # Bid Commitments
//!
//! A bid commitment is a SHA-256 digest binding a supplier's price, a
//! random 32-byte secret, and the supplier's own identity:
//!
//! ```text
//! commitment = SHA-256(JCS{ domain, price, secret, supplier })
//! ```
//!
//! Binding the supplier identity into the preimage means one supplier's
//! sealed bid cannot be replayed verbatim by another — the replayer's
//! reveal would recompute a different hash. The `domain` field separates
//! this preimage from every other digest in the system.
//!
//! The digest is computed over `CanonicalBytes` (RFC 8785), so the
//! commitment a supplier computes off-line and the one the vault recomputes
//! at reveal time agree byte-for-byte.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use tender_core::error::CryptoError;
use tender_core::{sha256_digest, CanonicalBytes, ContentDigest, ParticipantId, TokenAmount};

/// Domain-separation tag for bid commitment preimages.
const COMMITMENT_DOMAIN: &str = "tender.bid.commit.v1";

/// The random blinding secret a supplier generates per bid.
///
/// `Debug` is redacted so secrets cannot leak through logs before the
/// reveal phase. Serializes as a 64-character hex string.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BidSecret(pub [u8; 32]);

impl BidSecret {
    /// Generate a fresh random secret from the OS entropy source.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Render the secret as a lowercase hex string (for the reveal call).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a secret from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex_to_array::<32>(hex)
            .map_err(|e| CryptoError::KeyError(format!("bid secret: {e}")))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for BidSecret {
    type Error = CryptoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<BidSecret> for String {
    fn from(secret: BidSecret) -> Self {
        secret.to_hex()
    }
}

impl std::fmt::Debug for BidSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BidSecret(..)")
    }
}

/// A bid commitment hash, distinct at the type level from general content
/// digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitmentHash(pub ContentDigest);

impl CommitmentHash {
    /// Whether this is the (invalid) zero commitment.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Render as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        ContentDigest::from_hex(hex)
            .map(Self)
            .map_err(|e| CryptoError::KeyError(format!("commitment hash: {e}")))
    }
}

impl std::fmt::Display for CommitmentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The canonical commitment preimage. Field order is irrelevant — JCS
/// sorts keys — but the `domain` tag is load-bearing.
#[derive(Serialize)]
struct CommitmentPreimage<'a> {
    domain: &'static str,
    price: u64,
    secret: String,
    supplier: &'a ParticipantId,
}

/// Compute the commitment hash for `(price, secret, supplier)`.
pub fn commitment_hash(
    price: TokenAmount,
    secret: &BidSecret,
    supplier: &ParticipantId,
) -> Result<CommitmentHash, CryptoError> {
    let preimage = CommitmentPreimage {
        domain: COMMITMENT_DOMAIN,
        price: price.raw(),
        secret: secret.to_hex(),
        supplier,
    };
    let bytes = CanonicalBytes::new(&preimage)?;
    Ok(CommitmentHash(sha256_digest(&bytes)))
}

/// Recompute the commitment for a reveal and compare against the stored
/// hash. Returns `false` on any mismatch, including a preimage that fails
/// to canonicalize.
pub fn verify_commitment(
    price: TokenAmount,
    secret: &BidSecret,
    supplier: &ParticipantId,
    expected: &CommitmentHash,
) -> bool {
    match commitment_hash(price, secret, supplier) {
        Ok(computed) => computed == *expected,
        Err(_) => false,
    }
}

/// Decode a fixed-length hex string into a byte array.
fn hex_to_array<const N: usize>(hex: &str) -> Result<[u8; N], String> {
    let hex = hex.trim().to_lowercase();
    if hex.len() != N * 2 {
        return Err(format!("expected {} hex chars, got {}", N * 2, hex.len()));
    }
    let mut out = [0u8; N];
    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        let pair =
            std::str::from_utf8(chunk).map_err(|_| "non-utf8 hex input".to_string())?;
        out[i] = u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex pair {pair:?}"))?;
    }
    Ok(out)
}
