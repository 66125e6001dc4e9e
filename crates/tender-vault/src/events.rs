//! # Vault Event Log
//!
//! Every state mutation appends to the vault's event log. The log is the
//! integration surface for external collaborators (browsing UI,
//! reputation, advisory analytics) — they consume events read-only and
//! cannot influence settlement.

use serde::{Deserialize, Serialize};

use tender_core::{ParticipantId, Timestamp, TokenAmount};

use crate::vault::Phase;

/// An entry in a vault's append-only event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VaultEvent {
    /// The vault moved to a new phase.
    PhaseChanged {
        /// Phase before the transition.
        from: Phase,
        /// Phase after the transition.
        to: Phase,
        /// When the transition happened.
        at: Timestamp,
    },
    /// A supplier filed its conflict-of-interest attestation.
    AttestationFiled {
        /// The attesting supplier.
        supplier: ParticipantId,
        /// When the attestation was filed with the vault.
        at: Timestamp,
    },
    /// A sealed bid commitment was stored.
    BidCommitted {
        /// The committing supplier.
        supplier: ParticipantId,
        /// The deposit paid in.
        deposit: TokenAmount,
        /// When the commitment landed.
        at: Timestamp,
    },
    /// A commitment was opened during the reveal window.
    BidRevealed {
        /// The revealing supplier.
        supplier: ParticipantId,
        /// The revealed price.
        price: TokenAmount,
        /// When the reveal landed.
        at: Timestamp,
    },
    /// Settlement selected a winner.
    WinnerSelected {
        /// The winning supplier (lowest revealed price).
        winner: ParticipantId,
        /// The winning price.
        price: TokenAmount,
        /// The runner-up retained for the buyer-default fallback.
        second_bidder: Option<ParticipantId>,
        /// The runner-up's price.
        second_bid_amount: Option<TokenAmount>,
    },
    /// Settlement ran with zero revealed bids; no winner exists.
    NoWinner {
        /// When settlement ran.
        at: Timestamp,
    },
    /// The buyer cancelled the auction during OPEN.
    AuctionCancelled {
        /// When the cancellation happened.
        at: Timestamp,
    },
    /// A deposit was returned to its supplier in full.
    DepositReturned {
        /// The supplier refunded.
        supplier: ParticipantId,
        /// The amount returned.
        amount: TokenAmount,
    },
    /// A deposit was forfeited.
    DepositSlashed {
        /// The supplier penalized.
        supplier: ParticipantId,
        /// The amount forfeited.
        amount: TokenAmount,
        /// Who receives the forfeited deposit.
        beneficiary: ParticipantId,
    },
    /// A bid was disqualified at settlement.
    BidDisqualified {
        /// The disqualified supplier.
        supplier: ParticipantId,
        /// Why ("did not reveal").
        reason: String,
    },
    /// The winner transferred the winning price.
    PaymentSubmitted {
        /// The paying winner.
        winner: ParticipantId,
        /// The amount transferred.
        amount: TokenAmount,
        /// When payment landed.
        at: Timestamp,
    },
    /// A submitted payment was refunded (buyer-default fallback).
    PaymentRefunded {
        /// The refunded winner.
        winner: ParticipantId,
        /// The amount refunded.
        amount: TokenAmount,
    },
    /// The delivery oracle confirmed delivery.
    DeliveryConfirmed {
        /// The confirming oracle.
        oracle: ParticipantId,
        /// When delivery was confirmed.
        at: Timestamp,
    },
    /// The winner claimed delivery after the oracle timed out.
    OracleTimeoutClaimed {
        /// The claiming winner.
        winner: ParticipantId,
        /// When the claim landed.
        at: Timestamp,
    },
    /// The winner flagged non-receipt. Adjudication happens off-protocol.
    DeliveryDisputed {
        /// The disputing winner.
        winner: ParticipantId,
        /// When the dispute was flagged.
        at: Timestamp,
    },
    /// Buyer default: the recorded second bidder became the effective
    /// award.
    FallbackActivated {
        /// The fallback awardee.
        second_bidder: ParticipantId,
        /// The fallback award amount.
        amount: TokenAmount,
        /// When the fallback was claimed.
        at: Timestamp,
    },
    /// The creator bond was returned to the buyer.
    CreatorBondReleased {
        /// The bond amount returned.
        amount: TokenAmount,
    },
    /// The creator bond was forfeited.
    CreatorBondSlashed {
        /// The designated victim.
        beneficiary: ParticipantId,
        /// The victim's share.
        beneficiary_share: TokenAmount,
        /// The share sent to the burn sink.
        burned: TokenAmount,
    },
}
