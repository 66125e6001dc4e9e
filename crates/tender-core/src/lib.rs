//! # tender-core — Foundational Types for the Tender Stack
//!
//! This crate is the bedrock of the Tender Stack, a sealed-bid commit-reveal
//! procurement auction system. It defines the type-system primitives that the
//! vault state machine and the compliance registry build on. Every other
//! crate in the workspace depends on `tender-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `ParticipantId`, `VaultId`,
//!    `JurisdictionCode`, `TokenAmount` — all newtypes with validated
//!    constructors. No bare strings or integers for protocol values.
//!
//! 2. **`CanonicalBytes` newtype.** Everything that is signed flows through
//!    `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for signing
//!    input. This prevents canonicalization splits by construction.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision. Deadline eligibility everywhere in the
//!    stack is a pure comparison of `Timestamp` values.
//!
//! 4. **Checked token arithmetic.** `TokenAmount` never wraps silently;
//!    overflow is a structured error, not a corrupted ledger.
//!
//! 5. **Errors name the violated invariant.** The four-category protocol
//!    error taxonomy (`AccessDenied`, `InvalidInput`, `TimingViolation`,
//!    `StateViolation`) gives callers a specific rejection, never a generic
//!    failure.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tender-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` unless secrecy forbids it.

pub mod amount;
pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod jurisdiction;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use amount::{AmountError, SettlementToken, TokenAmount};
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::{
    AccessDenied, AuctionError, CryptoError, InvalidInput, StateViolation, TimingViolation,
};
pub use identity::{ParticipantId, VaultId};
pub use jurisdiction::JurisdictionCode;
pub use temporal::Timestamp;
