//! # Bid Records
//!
//! One `Bid` per supplier per vault. Commit-once and reveal-once are
//! expressed as state tags rather than booleans: a supplier with no map
//! entry has not committed, an entry starts `Committed` and moves to
//! `Revealed` (with the revealed price) or `Disqualified` (at settlement,
//! for non-reveal) exactly once. Illegal transitions have no
//! representation.

use serde::{Deserialize, Serialize};

use tender_core::{AuctionError, InvalidInput, Timestamp, TokenAmount};
use tender_crypto::CommitmentHash;

/// Opaque pointer to the off-chain sealed offer documents.
///
/// The protocol never fetches or interprets it; it only requires the
/// pointer to be non-empty, which the constructor enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageRoot(String);

impl StorageRoot {
    /// Construct a storage root, rejecting empty or whitespace-only input.
    pub fn new(root: &str) -> Result<Self, AuctionError> {
        let trimmed = root.trim();
        if trimmed.is_empty() {
            return Err(InvalidInput::EmptyStorageRoot.into());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The pointer string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StorageRoot {
    type Error = AuctionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<StorageRoot> for String {
    fn from(root: StorageRoot) -> Self {
        root.0
    }
}

impl std::fmt::Display for StorageRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a bid's deposit currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositState {
    /// Paid in and held by the vault.
    Held,
    /// Returned to the supplier in full.
    Returned,
    /// Forfeited to the buyer (non-reveal penalty).
    Forfeited,
}

/// The lifecycle state of a bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidState {
    /// Commitment stored; price still sealed.
    Committed,
    /// Commitment opened during the reveal window.
    Revealed {
        /// The revealed price.
        price: TokenAmount,
        /// Position in reveal order (tie-break key at settlement).
        reveal_seq: u32,
        /// When the reveal landed.
        revealed_at: Timestamp,
    },
    /// Never revealed; disqualified and deposit forfeited at settlement.
    Disqualified,
}

/// A supplier's bid in one vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// The sealed commitment `H(price, secret, supplier)`.
    pub commitment: CommitmentHash,
    /// Pointer to the off-chain sealed offer.
    pub storage_root: StorageRoot,
    /// When the commitment was stored.
    pub committed_at: Timestamp,
    /// Position in commit order.
    pub commit_seq: u32,
    /// Lifecycle state.
    pub state: BidState,
    /// Deposit disposition.
    pub deposit: DepositState,
}

impl Bid {
    /// Whether this bid has been revealed.
    pub fn is_revealed(&self) -> bool {
        matches!(self.state, BidState::Revealed { .. })
    }

    /// The revealed price, if revealed.
    pub fn revealed_price(&self) -> Option<TokenAmount> {
        match self.state {
            BidState::Revealed { price, .. } => Some(price),
            _ => None,
        }
    }

    /// The reveal sequence number, if revealed.
    pub fn reveal_seq(&self) -> Option<u32> {
        match self.state {
            BidState::Revealed { reveal_seq, .. } => Some(reveal_seq),
            _ => None,
        }
    }
}
