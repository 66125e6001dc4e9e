//! # Conflict-of-Interest Attestations
//!
//! Before its first commit, every supplier files a signed declaration that
//! it has no undisclosed conflict of interest in the auction. The
//! attestation is a lightweight non-repudiation record: the vault stores it
//! verbatim and never mutates it.
//!
//! The signed payload binds the supplier, the vault, a fixed statement
//! text, and the attestation timestamp — so an attestation cannot be
//! replayed against a different vault or by a different supplier.

use serde::{Deserialize, Serialize};

use tender_core::error::CryptoError;
use tender_core::{CanonicalBytes, ParticipantId, Timestamp, VaultId};

use crate::ed25519::{verify_signature, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// The fixed statement text every attestation asserts.
pub const CONFLICT_STATEMENT: &str =
    "I declare that I have no undisclosed conflict of interest with the buyer, \
     the delivery oracle, or any other participant in this auction.";

/// The canonical payload the supplier signs.
#[derive(Serialize)]
struct AttestationPayload<'a> {
    statement: &'static str,
    supplier: &'a ParticipantId,
    vault: &'a VaultId,
    attested_at: String,
}

/// A supplier-signed conflict-of-interest declaration for one vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictAttestation {
    /// The attesting supplier.
    pub supplier: ParticipantId,
    /// The vault the attestation is bound to.
    pub vault: VaultId,
    /// When the supplier signed.
    pub attested_at: Timestamp,
    /// Ed25519 signature over the canonical payload.
    pub signature: Ed25519Signature,
}

impl ConflictAttestation {
    /// Sign a new attestation binding `supplier` to `vault` at `now`.
    pub fn sign(
        keypair: &Ed25519KeyPair,
        supplier: ParticipantId,
        vault: VaultId,
        now: Timestamp,
    ) -> Result<Self, CryptoError> {
        let payload = Self::payload_bytes(&supplier, &vault, now)?;
        Ok(Self {
            supplier,
            vault,
            attested_at: now,
            signature: keypair.sign(&payload),
        })
    }

    /// Verify the signature against the supplier's registered public key.
    pub fn verify(&self, key: &Ed25519PublicKey) -> Result<(), CryptoError> {
        let payload = Self::payload_bytes(&self.supplier, &self.vault, self.attested_at)?;
        verify_signature(key, &payload, &self.signature)
    }

    fn payload_bytes(
        supplier: &ParticipantId,
        vault: &VaultId,
        attested_at: Timestamp,
    ) -> Result<CanonicalBytes, CryptoError> {
        let payload = AttestationPayload {
            statement: CONFLICT_STATEMENT,
            supplier,
            vault,
            attested_at: attested_at.to_iso8601(),
        };
        Ok(CanonicalBytes::new(&payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::parse("2026-03-01T12:00:00Z").unwrap()
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let keypair = Ed25519KeyPair::generate();
        let attestation =
            ConflictAttestation::sign(&keypair, ParticipantId::new(), VaultId::new(), now())
                .unwrap();
        assert!(attestation.verify(&keypair.public_key()).is_ok());
    }

    #[test]
    fn test_wrong_key_rejected() {
        let keypair = Ed25519KeyPair::generate();
        let attestation =
            ConflictAttestation::sign(&keypair, ParticipantId::new(), VaultId::new(), now())
                .unwrap();
        let other = Ed25519KeyPair::generate();
        assert!(attestation.verify(&other.public_key()).is_err());
    }

    #[test]
    fn test_rebinding_to_another_vault_rejected() {
        let keypair = Ed25519KeyPair::generate();
        let mut attestation =
            ConflictAttestation::sign(&keypair, ParticipantId::new(), VaultId::new(), now())
                .unwrap();
        // Attacker copies the signature onto a different vault binding.
        attestation.vault = VaultId::new();
        assert!(attestation.verify(&keypair.public_key()).is_err());
    }

    #[test]
    fn test_rebinding_to_another_supplier_rejected() {
        let keypair = Ed25519KeyPair::generate();
        let mut attestation =
            ConflictAttestation::sign(&keypair, ParticipantId::new(), VaultId::new(), now())
                .unwrap();
        attestation.supplier = ParticipantId::new();
        assert!(attestation.verify(&keypair.public_key()).is_err());
    }

    #[test]
    fn test_timestamp_is_part_of_payload() {
        let keypair = Ed25519KeyPair::generate();
        let mut attestation =
            ConflictAttestation::sign(&keypair, ParticipantId::new(), VaultId::new(), now())
                .unwrap();
        attestation.attested_at = Timestamp::parse("2026-03-01T12:00:01Z").unwrap();
        assert!(attestation.verify(&keypair.public_key()).is_err());
    }
}
