//! # Auction Vault — Commit-Reveal State Machine
//!
//! The vault accepts sealed commitments while OPEN, forces a synchronized
//! reveal after `close_time`, and settles by objective rule after the
//! reveal window. Broken promises become deterministic penalties: a
//! supplier that commits but never reveals forfeits its deposit to the
//! buyer.
//!
//! The true concurrency property protected here is informational: all
//! suppliers commit without seeing each other's prices, and the reveal
//! phase is the single synchronization point that exposes them to
//! everyone at once. A late entrant can never condition on an early bid.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tender_core::{
    AccessDenied, AuctionError, InvalidInput, JurisdictionCode, ParticipantId, SettlementToken,
    StateViolation, Timestamp, TimingViolation, TokenAmount, VaultId,
};
use tender_crypto::{verify_commitment, BidSecret, CommitmentHash, ConflictAttestation};

use crate::bid::{Bid, BidState, DepositState, StorageRoot};
use crate::events::VaultEvent;
use crate::gate::PlatformGate;
use crate::settlement::{select_winner, SettlementOutcome};

/// Reason string recorded when a committed bid is never revealed.
pub const DISQUALIFY_NON_REVEAL: &str = "did not reveal";

/// The vault's lifecycle phase. Monotonic: no backward transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting sealed commitments until `close_time`.
    Open,
    /// Commitments frozen; reveals accepted until `reveal_deadline`.
    Reveal,
    /// Winner (or no-winner outcome) fixed; post-settlement sequence runs
    /// against `settlement_deadline` (terminal phase).
    Settled,
    /// Buyer backed out during OPEN; all deposits refunded (terminal).
    Cancelled,
}

impl Phase {
    /// Whether no further phase transition can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled | Self::Cancelled)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Reveal => "REVEAL",
            Self::Settled => "SETTLED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One-shot lifecycle of the creator bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BondState {
    /// Posted at creation, held by the platform.
    Posted,
    /// Returned to the buyer after normal delivery.
    Released,
    /// Forfeited by admin action for established misconduct.
    Slashed,
}

/// Running totals for the deposit-conservation invariant:
/// `paid_in == returned + slashed + held` at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepositLedger {
    /// Total deposits paid in by suppliers.
    pub paid_in: TokenAmount,
    /// Total returned to suppliers.
    pub returned: TokenAmount,
    /// Total forfeited to the buyer.
    pub slashed: TokenAmount,
}

impl DepositLedger {
    /// Deposits currently held by the vault.
    pub fn held(&self) -> TokenAmount {
        // paid_in >= returned + slashed is maintained by construction:
        // every return/slash moves a deposit that was previously paid in.
        let out = self
            .returned
            .checked_add(self.slashed)
            .unwrap_or(self.paid_in);
        self.paid_in.checked_sub(out).unwrap_or(TokenAmount::ZERO)
    }

    fn record_in(&mut self, amount: TokenAmount) -> Result<(), AuctionError> {
        self.paid_in = self.paid_in.checked_add(amount)?;
        Ok(())
    }

    fn record_return(&mut self, amount: TokenAmount) -> Result<(), AuctionError> {
        self.returned = self.returned.checked_add(amount)?;
        Ok(())
    }

    fn record_slash(&mut self, amount: TokenAmount) -> Result<(), AuctionError> {
        self.slashed = self.slashed.checked_add(amount)?;
        Ok(())
    }
}

/// The immutable header fixed at vault creation.
///
/// `allowed_suppliers` never mutates after creation; the vault exposes no
/// way to touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// This vault's identifier.
    pub vault_id: VaultId,
    /// The auction creator; pays out of the settlement sequence.
    pub buyer: ParticipantId,
    /// The delivery-confirmation authority.
    pub oracle: ParticipantId,
    /// The platform admin (bond slashing authority).
    pub platform_admin: ParticipantId,
    /// Commitments accepted strictly before this instant.
    pub close_time: Timestamp,
    /// Length of the reveal window, fixed when REVEAL begins.
    pub reveal_window_secs: u64,
    /// Length of the payment/delivery window, fixed at settlement.
    pub settlement_window_secs: u64,
    /// How long after payment the winner must wait before claiming an
    /// oracle timeout.
    pub oracle_timeout_secs: u64,
    /// The fixed deposit every bidder posts with its commitment.
    pub deposit_required: TokenAmount,
    /// The closed set of suppliers that may bid.
    pub allowed_suppliers: BTreeSet<ParticipantId>,
    /// The currency the auction settles in.
    pub settlement_token: SettlementToken,
    /// Declared value of the auctioned asset (drives the creator bond).
    pub declared_asset_value: TokenAmount,
    /// The refundable bond the creator posted.
    pub creator_bond: TokenAmount,
    /// Whether bidders must hold the accreditation flag.
    pub require_accredited: bool,
    /// Jurisdictions bidders may be verified in. Empty means any.
    pub allowed_jurisdictions: BTreeSet<JurisdictionCode>,
}

/// One sealed-bid procurement auction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionVault {
    pub(crate) config: VaultConfig,
    pub(crate) phase: Phase,
    /// Set exactly once, on the OPEN → REVEAL transition.
    pub(crate) reveal_deadline: Option<Timestamp>,
    /// Set exactly once, at settlement.
    pub(crate) settlement_deadline: Option<Timestamp>,
    pub(crate) bids: BTreeMap<ParticipantId, Bid>,
    pub(crate) attestations: BTreeMap<ParticipantId, ConflictAttestation>,
    pub(crate) next_commit_seq: u32,
    pub(crate) next_reveal_seq: u32,
    pub(crate) winner: Option<ParticipantId>,
    pub(crate) winning_price: Option<TokenAmount>,
    pub(crate) second_bidder: Option<ParticipantId>,
    pub(crate) second_bid_amount: Option<TokenAmount>,
    pub(crate) fallback_activated: bool,
    pub(crate) payment_submitted: bool,
    pub(crate) paid_at: Option<Timestamp>,
    pub(crate) delivered: bool,
    pub(crate) delivery_disputed: bool,
    pub(crate) bond_state: BondState,
    pub(crate) ledger: DepositLedger,
    pub(crate) events: Vec<VaultEvent>,
}

impl AuctionVault {
    /// Open a vault from a validated configuration.
    ///
    /// Creation-time validation (timing floors, non-empty supplier set,
    /// bond sufficiency) lives in the registry, which is the only
    /// component that instantiates vaults in production. A config that
    /// bypassed the registry gets no guardrails here.
    pub fn open(config: VaultConfig) -> Self {
        info!(vault = %config.vault_id, buyer = %config.buyer, "vault opened");
        Self {
            config,
            phase: Phase::Open,
            reveal_deadline: None,
            settlement_deadline: None,
            bids: BTreeMap::new(),
            attestations: BTreeMap::new(),
            next_commit_seq: 0,
            next_reveal_seq: 0,
            winner: None,
            winning_price: None,
            second_bidder: None,
            second_bid_amount: None,
            fallback_activated: false,
            payment_submitted: false,
            paid_at: None,
            delivered: false,
            delivery_disputed: false,
            bond_state: BondState::Posted,
            ledger: DepositLedger::default(),
            events: Vec::new(),
        }
    }

    // ── Attestation ──────────────────────────────────────────────────

    /// File a supplier's conflict-of-interest attestation.
    ///
    /// Must happen before that supplier's first commit. The signature is
    /// verified against the signing key in the supplier's compliance
    /// record; the attestation must be bound to this vault.
    pub fn file_attestation(
        &mut self,
        now: Timestamp,
        attestation: ConflictAttestation,
        gate: &dyn PlatformGate,
    ) -> Result<(), AuctionError> {
        self.require_phase(Phase::Open)?;
        if attestation.vault != self.config.vault_id {
            return Err(InvalidInput::BadAttestation(
                "attestation is bound to a different vault".to_string(),
            )
            .into());
        }
        let supplier = attestation.supplier;
        let record = gate
            .compliance(&supplier)
            .filter(|r| r.verified)
            .ok_or(AccessDenied::NotVerified)?;
        let key = record
            .signing_key
            .ok_or(AccessDenied::SigningKeyUnregistered)?;
        attestation
            .verify(&key)
            .map_err(|e| InvalidInput::BadAttestation(e.to_string()))?;
        if self.attestations.contains_key(&supplier) {
            return Err(StateViolation::AlreadyAttested.into());
        }

        self.attestations.insert(supplier, attestation);
        self.events.push(VaultEvent::AttestationFiled {
            supplier,
            at: now,
        });
        debug!(vault = %self.config.vault_id, %supplier, "attestation filed");
        Ok(())
    }

    // ── Commit phase ─────────────────────────────────────────────────

    /// Store a sealed bid commitment with its deposit.
    ///
    /// Preconditions are checked in a fixed order, each with a distinct
    /// failure: pause, phase/deadline, buyer self-bid, whitelist,
    /// compliance, attestation, double commit, zero commitment, deposit
    /// amount. Nothing mutates unless all pass.
    pub fn commit_bid(
        &mut self,
        now: Timestamp,
        caller: ParticipantId,
        commitment: CommitmentHash,
        storage_root: StorageRoot,
        attached_deposit: TokenAmount,
        gate: &dyn PlatformGate,
    ) -> Result<(), AuctionError> {
        if gate.is_paused() {
            return Err(AccessDenied::Paused.into());
        }
        if self.phase != Phase::Open || now >= self.config.close_time {
            return Err(TimingViolation::BiddingClosed.into());
        }
        if caller == self.config.buyer {
            return Err(AccessDenied::BuyerCannotBid.into());
        }
        if !self.config.allowed_suppliers.contains(&caller) {
            return Err(AccessDenied::NotWhitelisted.into());
        }
        let record = gate
            .compliance(&caller)
            .filter(|r| r.verified)
            .ok_or(AccessDenied::NotVerified)?;
        if self.config.require_accredited && !record.accredited {
            return Err(AccessDenied::NotAccredited.into());
        }
        if !self.config.allowed_jurisdictions.is_empty()
            && !self.config.allowed_jurisdictions.contains(&record.jurisdiction)
        {
            return Err(AccessDenied::JurisdictionNotAllowed(
                record.jurisdiction.to_string(),
            )
            .into());
        }
        if !self.attestations.contains_key(&caller) {
            return Err(AccessDenied::AttestationMissing.into());
        }
        if self.bids.contains_key(&caller) {
            return Err(StateViolation::AlreadyCommitted.into());
        }
        if commitment.is_zero() {
            return Err(InvalidInput::ZeroCommitment.into());
        }
        if attached_deposit != self.config.deposit_required {
            return Err(InvalidInput::WrongDeposit {
                expected: self.config.deposit_required.raw(),
                got: attached_deposit.raw(),
            }
            .into());
        }

        self.ledger.record_in(attached_deposit)?;
        let commit_seq = self.next_commit_seq;
        self.next_commit_seq += 1;
        self.bids.insert(
            caller,
            Bid {
                commitment,
                storage_root,
                committed_at: now,
                commit_seq,
                state: BidState::Committed,
                deposit: DepositState::Held,
            },
        );
        self.events.push(VaultEvent::BidCommitted {
            supplier: caller,
            deposit: attached_deposit,
            at: now,
        });
        debug!(vault = %self.config.vault_id, supplier = %caller, commit_seq, "bid committed");
        Ok(())
    }

    // ── Reveal phase ─────────────────────────────────────────────────

    /// Advance OPEN → REVEAL once `close_time` has passed.
    ///
    /// Permissionless: liveness must not depend on the buyer acting, so
    /// any party may trigger and the effect is identical regardless of
    /// caller. Calls after the transition are cleanly rejected with no
    /// side effects.
    pub fn trigger_reveal_phase(&mut self, now: Timestamp) -> Result<(), AuctionError> {
        self.require_phase(Phase::Open)?;
        if now < self.config.close_time {
            return Err(TimingViolation::BiddingStillOpen.into());
        }

        self.reveal_deadline = Some(now.plus_secs(self.config.reveal_window_secs));
        self.set_phase(Phase::Reveal, now);
        Ok(())
    }

    /// Open a commitment by disclosing `(price, secret)`.
    ///
    /// The vault recomputes `H(price, secret, caller)` and requires
    /// equality with the stored commitment — binding the caller identity
    /// means a replayed commitment can never be revealed by anyone else.
    pub fn reveal_bid(
        &mut self,
        now: Timestamp,
        caller: ParticipantId,
        price: TokenAmount,
        secret: &BidSecret,
    ) -> Result<(), AuctionError> {
        self.require_phase(Phase::Reveal)?;
        let Some(deadline) = self.reveal_deadline else {
            // Unset deadline in REVEAL cannot happen; reject conservatively.
            return Err(TimingViolation::RevealWindowClosed.into());
        };
        if now >= deadline {
            return Err(TimingViolation::RevealWindowClosed.into());
        }
        let bid = self
            .bids
            .get(&caller)
            .ok_or(StateViolation::NothingCommitted)?;
        if bid.is_revealed() {
            return Err(StateViolation::AlreadyRevealed.into());
        }
        if !verify_commitment(price, secret, &caller, &bid.commitment) {
            return Err(InvalidInput::CommitmentMismatch.into());
        }

        let reveal_seq = self.next_reveal_seq;
        self.next_reveal_seq += 1;
        if let Some(bid) = self.bids.get_mut(&caller) {
            bid.state = BidState::Revealed {
                price,
                reveal_seq,
                revealed_at: now,
            };
        }
        self.events.push(VaultEvent::BidRevealed {
            supplier: caller,
            price,
            at: now,
        });
        debug!(vault = %self.config.vault_id, supplier = %caller, %price, "bid revealed");
        Ok(())
    }

    // ── Cancellation ─────────────────────────────────────────────────

    /// Cancel the auction. Buyer-only, OPEN only.
    ///
    /// Once reveal has begun, suppliers have committed economically and
    /// the buyer can no longer unilaterally back out. Every posted deposit
    /// is refunded in full.
    pub fn cancel(&mut self, now: Timestamp, caller: ParticipantId) -> Result<(), AuctionError> {
        if caller != self.config.buyer {
            return Err(AccessDenied::NotBuyer.into());
        }
        if self.phase == Phase::Cancelled {
            return Err(StateViolation::AlreadyCancelled.into());
        }
        self.require_phase(Phase::Open)?;

        let suppliers: Vec<ParticipantId> = self.bids.keys().copied().collect();
        for supplier in suppliers {
            self.return_deposit(supplier)?;
        }
        self.set_phase(Phase::Cancelled, now);
        self.events.push(VaultEvent::AuctionCancelled { at: now });
        Ok(())
    }

    // ── Settlement ───────────────────────────────────────────────────

    /// Settle the auction after the reveal window closes. Buyer-only.
    ///
    /// Winner: lowest revealed price, ties by earliest reveal. Non-winning
    /// revealed bids get their deposits back; unrevealed bids forfeit to
    /// the buyer and are disqualified. The winner's deposit stays held as
    /// performance collateral until delivery confirms. Zero revealed bids
    /// is a defined no-winner outcome.
    pub fn settle(
        &mut self,
        now: Timestamp,
        caller: ParticipantId,
    ) -> Result<SettlementOutcome, AuctionError> {
        if caller != self.config.buyer {
            return Err(AccessDenied::NotBuyer.into());
        }
        self.require_phase(Phase::Reveal)?;
        let Some(deadline) = self.reveal_deadline else {
            return Err(TimingViolation::RevealWindowOpen.into());
        };
        if now <= deadline {
            return Err(TimingViolation::RevealWindowOpen.into());
        }

        let outcome = select_winner(&self.bids);
        let winner_id = outcome.winner.map(|w| w.supplier);

        let suppliers: Vec<ParticipantId> = self.bids.keys().copied().collect();
        for supplier in suppliers {
            if Some(supplier) == winner_id {
                // Held as performance collateral until delivery confirms.
                continue;
            }
            let revealed = self
                .bids
                .get(&supplier)
                .map(|b| b.is_revealed())
                .unwrap_or(false);
            if revealed {
                self.return_deposit(supplier)?;
            } else {
                self.slash_deposit_to_buyer(supplier)?;
            }
        }

        match outcome.winner {
            Some(winner) => {
                self.winner = Some(winner.supplier);
                self.winning_price = Some(winner.price);
                self.second_bidder = outcome.runner_up.map(|r| r.supplier);
                self.second_bid_amount = outcome.runner_up.map(|r| r.price);
                self.events.push(VaultEvent::WinnerSelected {
                    winner: winner.supplier,
                    price: winner.price,
                    second_bidder: self.second_bidder,
                    second_bid_amount: self.second_bid_amount,
                });
                info!(
                    vault = %self.config.vault_id,
                    winner = %winner.supplier,
                    price = %winner.price,
                    "winner selected"
                );
            }
            None => {
                self.events.push(VaultEvent::NoWinner { at: now });
                info!(vault = %self.config.vault_id, "settled with no winner");
            }
        }

        self.settlement_deadline = Some(now.plus_secs(self.config.settlement_window_secs));
        self.set_phase(Phase::Settled, now);
        Ok(outcome)
    }

    // ── Internal helpers ─────────────────────────────────────────────

    pub(crate) fn require_phase(&self, expected: Phase) -> Result<(), AuctionError> {
        if self.phase != expected {
            return Err(TimingViolation::WrongPhase {
                expected: expected.name(),
                actual: self.phase.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn set_phase(&mut self, to: Phase, now: Timestamp) {
        let from = self.phase;
        self.events.push(VaultEvent::PhaseChanged { from, to, at: now });
        self.phase = to;
        info!(vault = %self.config.vault_id, %from, %to, "phase changed");
    }

    pub(crate) fn return_deposit(&mut self, supplier: ParticipantId) -> Result<(), AuctionError> {
        let amount = self.config.deposit_required;
        let Some(bid) = self.bids.get_mut(&supplier) else {
            return Ok(());
        };
        if bid.deposit != DepositState::Held {
            return Ok(());
        }
        bid.deposit = DepositState::Returned;
        self.ledger.record_return(amount)?;
        self.events.push(VaultEvent::DepositReturned { supplier, amount });
        Ok(())
    }

    fn slash_deposit_to_buyer(&mut self, supplier: ParticipantId) -> Result<(), AuctionError> {
        let amount = self.config.deposit_required;
        let buyer = self.config.buyer;
        let Some(bid) = self.bids.get_mut(&supplier) else {
            return Ok(());
        };
        if bid.deposit != DepositState::Held {
            return Ok(());
        }
        bid.deposit = DepositState::Forfeited;
        bid.state = BidState::Disqualified;
        self.ledger.record_slash(amount)?;
        self.events.push(VaultEvent::DepositSlashed {
            supplier,
            amount,
            beneficiary: buyer,
        });
        self.events.push(VaultEvent::BidDisqualified {
            supplier,
            reason: DISQUALIFY_NON_REVEAL.to_string(),
        });
        Ok(())
    }

    // ── Read accessors ───────────────────────────────────────────────

    /// The immutable creation header.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The reveal deadline, once REVEAL has begun.
    pub fn reveal_deadline(&self) -> Option<Timestamp> {
        self.reveal_deadline
    }

    /// The settlement deadline, once settled.
    pub fn settlement_deadline(&self) -> Option<Timestamp> {
        self.settlement_deadline
    }

    /// A supplier's bid, if committed.
    pub fn bid(&self, supplier: &ParticipantId) -> Option<&Bid> {
        self.bids.get(supplier)
    }

    /// All bids, keyed by supplier.
    pub fn bids(&self) -> &BTreeMap<ParticipantId, Bid> {
        &self.bids
    }

    /// A supplier's filed attestation, if any.
    pub fn attestation(&self, supplier: &ParticipantId) -> Option<&ConflictAttestation> {
        self.attestations.get(supplier)
    }

    /// The winner fixed at settlement. Never reassigned, even after a
    /// buyer-default fallback.
    pub fn winner(&self) -> Option<ParticipantId> {
        self.winner
    }

    /// The winning price fixed at settlement.
    pub fn winning_price(&self) -> Option<TokenAmount> {
        self.winning_price
    }

    /// The fallback bidder recorded at settlement.
    pub fn second_bidder(&self) -> Option<ParticipantId> {
        self.second_bidder
    }

    /// The fallback bidder's price.
    pub fn second_bid_amount(&self) -> Option<TokenAmount> {
        self.second_bid_amount
    }

    /// Whether the buyer-default fallback has been activated.
    pub fn fallback_activated(&self) -> bool {
        self.fallback_activated
    }

    /// Whether the winning price has been transferred.
    pub fn payment_submitted(&self) -> bool {
        self.payment_submitted
    }

    /// Whether delivery has been confirmed (by oracle or timeout claim).
    pub fn delivered(&self) -> bool {
        self.delivered
    }

    /// Whether the winner has flagged non-receipt.
    pub fn delivery_disputed(&self) -> bool {
        self.delivery_disputed
    }

    /// The creator bond lifecycle state.
    pub fn bond_state(&self) -> BondState {
        self.bond_state
    }

    /// Deposit-conservation totals.
    pub fn ledger(&self) -> &DepositLedger {
        &self.ledger
    }

    /// The append-only event log.
    pub fn events(&self) -> &[VaultEvent] {
        &self.events
    }
}
