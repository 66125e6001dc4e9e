//! # tender-crypto — Cryptographic Primitives
//!
//! Provides the cryptographic building blocks for the Tender Stack:
//!
//! - **Bid commitments** — identity-bound SHA-256 commitments over
//!   `(price, secret, supplier)`, the hiding half of the commit-reveal
//!   protocol.
//! - **Ed25519** signing and verification for conflict-of-interest
//!   attestations. Signing input is `&CanonicalBytes` only.
//! - **Conflict attestations** — the signed non-repudiation record every
//!   supplier must file with a vault before its first commit.
//!
//! ## Crate Policy
//!
//! - Depends only on `tender-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   SHA-256 and real Ed25519.
//! - `unsafe` prohibited.

pub mod attestation;
pub mod commitment;
pub mod ed25519;

pub use attestation::{ConflictAttestation, CONFLICT_STATEMENT};
pub use commitment::{commitment_hash, verify_commitment, BidSecret, CommitmentHash};
pub use ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
