//! # Protocol Error Taxonomy
//!
//! Every rejection in the stack falls into one of four categories:
//!
//! - **AccessDenied** — wrong role, not whitelisted, not
//!   compliance-verified, buyer bidding on its own auction, platform
//!   paused.
//! - **InvalidInput** — zero or empty commitment fields, wrong deposit or
//!   payment amount, malformed reveal, bad attestation signature.
//! - **TimingViolation** — action attempted outside its valid phase window
//!   or before/after a deadline.
//! - **StateViolation** — double commit, double reveal, double cancel,
//!   settling twice, and every other one-shot flag re-trigger.
//!
//! All rejections are synchronous and leave no partial side effects: a
//! vault operation validates everything before mutating anything. Every
//! variant's message names the specific violated invariant so a calling UI
//! can present it directly.

use thiserror::Error;

use crate::amount::AmountError;
use crate::canonical::CanonicalizationError;

/// Top-level protocol error.
#[derive(Error, Debug)]
pub enum AuctionError {
    /// Caller lacks the role, capability, or standing for the operation.
    #[error("access denied: {0}")]
    AccessDenied(#[from] AccessDenied),

    /// An argument failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// The operation is outside its valid time window or phase.
    #[error("timing violation: {0}")]
    TimingViolation(#[from] TimingViolation),

    /// A one-shot transition was attempted a second time, or a
    /// prerequisite transition has not happened.
    #[error("state violation: {0}")]
    StateViolation(#[from] StateViolation),
}

impl AuctionError {
    /// The taxonomy category, for event annotation and coarse matching.
    pub fn category(&self) -> &'static str {
        match self {
            Self::AccessDenied(_) => "ACCESS_DENIED",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::TimingViolation(_) => "TIMING_VIOLATION",
            Self::StateViolation(_) => "STATE_VIOLATION",
        }
    }
}

impl From<AmountError> for AuctionError {
    fn from(err: AmountError) -> Self {
        Self::InvalidInput(InvalidInput::Arithmetic(err))
    }
}

/// Role and standing rejections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    /// Operation is reserved to the vault's buyer (creator).
    #[error("caller is not the buyer of this vault")]
    NotBuyer,

    /// Operation is reserved to the auction winner.
    #[error("caller is not the winner of this auction")]
    NotWinner,

    /// Operation is reserved to the vault's delivery oracle.
    #[error("caller is not the delivery oracle of this vault")]
    NotOracle,

    /// Operation is reserved to the platform admin.
    #[error("caller is not the platform admin")]
    NotAdmin,

    /// Caller is not in the vault's allowed supplier set.
    #[error("caller is not in the allowed supplier set")]
    NotWhitelisted,

    /// Caller has no verified compliance record.
    #[error("caller is not compliance-verified")]
    NotVerified,

    /// The vault requires accredited suppliers and the caller is not.
    #[error("caller is not accredited and this vault requires accreditation")]
    NotAccredited,

    /// The caller's jurisdiction is outside the vault's allowed set.
    #[error("caller's jurisdiction {0} is not allowed for this vault")]
    JurisdictionNotAllowed(String),

    /// The buyer may not bid on its own auction.
    #[error("the buyer may not bid on its own auction")]
    BuyerCannotBid,

    /// Caller has no conflict attestation on file with this vault.
    #[error("caller has no conflict-of-interest attestation on file")]
    AttestationMissing,

    /// Caller's compliance record has no registered signing key, so its
    /// attestation signature cannot be verified.
    #[error("caller has no registered attestation signing key")]
    SigningKeyUnregistered,

    /// Caller does not hold the auction-creation capability.
    #[error("caller does not hold the auction-creation capability")]
    CreatorCapabilityRequired,

    /// The platform is paused; bid commitments are frozen.
    #[error("the platform is paused; bid commitments are frozen")]
    Paused,
}

/// Argument validation rejections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// The zero digest is not a valid commitment.
    #[error("commitment hash must not be the zero digest")]
    ZeroCommitment,

    /// The off-chain document pointer must be non-empty.
    #[error("storage root must be non-empty")]
    EmptyStorageRoot,

    /// Attached deposit must exactly equal the vault's requirement.
    #[error("deposit must be exactly {expected}, got {got}")]
    WrongDeposit {
        /// The vault's fixed deposit requirement.
        expected: u64,
        /// The amount actually attached.
        got: u64,
    },

    /// The revealed price and secret do not hash to the stored commitment.
    #[error("reveal does not match the stored commitment")]
    CommitmentMismatch,

    /// Payment must exactly equal the winning price.
    #[error("payment must be exactly {expected}, got {got}")]
    WrongPaymentAmount {
        /// The winning price owed.
        expected: u64,
        /// The amount actually transferred.
        got: u64,
    },

    /// The attestation is not a valid signature over its payload, or is
    /// bound to a different vault or supplier.
    #[error("conflict attestation is invalid: {0}")]
    BadAttestation(String),

    /// Ledger arithmetic failed.
    #[error(transparent)]
    Arithmetic(#[from] AmountError),

    /// A timestamp string failed validation.
    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// A digest string failed validation.
    #[error("malformed digest: {0}")]
    MalformedDigest(String),

    /// A jurisdiction code was empty.
    #[error("jurisdiction code must be non-empty")]
    EmptyJurisdiction,

    /// A jurisdiction code contained invalid characters.
    #[error("malformed jurisdiction code: {0}")]
    MalformedJurisdiction(String),
}

/// Deadline and phase-window rejections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimingViolation {
    /// Commitments are only accepted while the vault is OPEN and before
    /// `close_time`.
    #[error("bidding is closed")]
    BiddingClosed,

    /// The reveal phase cannot start before `close_time`.
    #[error("bidding is still open; reveal phase cannot start yet")]
    BiddingStillOpen,

    /// Settlement requires the reveal window to have elapsed.
    #[error("reveal window is still open; settlement is not yet eligible")]
    RevealWindowOpen,

    /// Reveals are only accepted before `reveal_deadline`.
    #[error("reveal window has closed")]
    RevealWindowClosed,

    /// Buyer default can only be claimed after `settlement_deadline`.
    #[error("settlement window is still open; buyer default cannot be claimed yet")]
    SettlementWindowOpen,

    /// Payment is only accepted before `settlement_deadline`.
    #[error("settlement window has closed")]
    SettlementWindowClosed,

    /// The oracle timeout has not yet elapsed since payment.
    #[error("oracle timeout has not elapsed")]
    OracleTimeoutNotElapsed,

    /// The operation is not valid in the vault's current phase.
    #[error("operation requires phase {expected}, vault is in {actual}")]
    WrongPhase {
        /// The phase the operation requires.
        expected: &'static str,
        /// The vault's current phase.
        actual: String,
    },
}

/// One-shot flag and ordering rejections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateViolation {
    /// A supplier may commit at most once per vault.
    #[error("supplier has already committed a bid to this vault")]
    AlreadyCommitted,

    /// A bid may be revealed at most once.
    #[error("bid has already been revealed")]
    AlreadyRevealed,

    /// Reveal requires a prior commitment from the caller.
    #[error("supplier has no committed bid to reveal")]
    NothingCommitted,

    /// A supplier may file at most one conflict attestation per vault.
    #[error("supplier has already filed a conflict attestation")]
    AlreadyAttested,

    /// The vault has already been cancelled.
    #[error("vault has already been cancelled")]
    AlreadyCancelled,

    /// Payment has already been submitted.
    #[error("payment has already been submitted")]
    PaymentAlreadySubmitted,

    /// The operation requires payment to have been submitted first.
    #[error("payment has not been submitted")]
    PaymentNotSubmitted,

    /// Delivery has already been confirmed.
    #[error("delivery has already been confirmed")]
    AlreadyDelivered,

    /// Delivery has already been disputed.
    #[error("delivery has already been disputed")]
    AlreadyDisputed,

    /// The operation requires confirmed delivery.
    #[error("delivery has not been confirmed")]
    NotDelivered,

    /// The auction settled with no winner; no post-settlement sequence
    /// exists.
    #[error("auction settled with no winner")]
    NoWinner,

    /// No second-place bidder was recorded, so the buyer-default fallback
    /// is unavailable. This is a terminal condition, not a retriable one.
    #[error("no second bidder recorded; buyer-default fallback is unavailable")]
    FallbackUnavailable,

    /// The fallback has already been activated.
    #[error("buyer-default fallback has already been activated")]
    FallbackAlreadyActivated,

    /// The creator bond has already been released or slashed.
    #[error("creator bond has already been released or slashed")]
    BondAlreadyResolved,
}

/// Error in cryptographic operations (key handling, signing,
/// verification). Produced by `tender-crypto`; mapped into the protocol
/// taxonomy at the vault boundary.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// Canonicalization of the signing payload failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
