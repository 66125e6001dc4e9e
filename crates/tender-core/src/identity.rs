//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the two identifier namespaces in the Tender Stack.
//! These prevent accidental identifier confusion — you cannot pass a
//! `ParticipantId` where a `VaultId` is expected.
//!
//! ## Security Invariant
//!
//! Type-level distinction between identifier namespaces prevents
//! cross-namespace confusion where one kind of identifier is substituted
//! for another. Commitment preimages bind the supplier's `ParticipantId`,
//! so identifier confusion would be a replay vector.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a protocol participant (buyer, supplier, oracle,
/// platform admin — roles are contextual, the identifier is not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub Uuid);

/// Unique identifier for an auction vault instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VaultId(pub Uuid);

impl ParticipantId {
    /// Generate a new random participant identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl VaultId {
    /// Generate a new random vault identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VaultId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "participant:{}", self.0)
    }
}

impl std::fmt::Display for VaultId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vault:{}", self.0)
    }
}
