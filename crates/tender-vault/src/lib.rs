//! # tender-vault — Auction Vault State Machine
//!
//! One `AuctionVault` instance per sealed-bid procurement auction. The
//! vault owns its bid commitments, the commit → reveal → settle timeline,
//! winner selection, deposit slashing and refunding, and the
//! post-settlement payment/delivery/fallback sequence.
//!
//! ## Phases
//!
//! ```text
//! OPEN ──────▶ REVEAL ──────▶ SETTLED
//!   │   (close_time      (reveal_deadline
//!   │    reached,         passed, buyer
//!   │    permissionless)  settles)
//!   ▼
//! CANCELLED (buyer, OPEN only)
//! ```
//!
//! Phases are monotonic: there is no backward transition, and every
//! one-shot flag (`payment_submitted`, `delivered`, per-bid reveal state)
//! flips exactly once. Re-entry is a rejected no-op, never a race.
//!
//! ## Time
//!
//! Every operation takes the current time as an explicit argument.
//! Deadline eligibility is a pure function of `(now, stored deadlines)` —
//! there are no background timers, and permissionless triggers
//! (`trigger_reveal_phase`, `claim_buyer_default`) behave identically
//! regardless of caller.
//!
//! ## Compliance
//!
//! The vault never owns compliance state. It queries an injected read-only
//! [`PlatformGate`] at commit time, so vaults are testable against mock
//! compliance providers.

pub mod bid;
pub mod delivery;
pub mod events;
pub mod gate;
pub mod settlement;
pub mod vault;

#[cfg(test)]
pub(crate) mod testkit;

pub use bid::{Bid, BidState, DepositState, StorageRoot};
pub use events::VaultEvent;
pub use gate::{ComplianceRecord, PlatformGate, StaticGate};
pub use settlement::SettlementOutcome;
pub use vault::{AuctionVault, BondState, DepositLedger, Phase, VaultConfig};
