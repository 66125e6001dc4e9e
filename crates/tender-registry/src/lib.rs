//! # tender-registry — Registry & Compliance Gate
//!
//! Platform-global state and the only component that instantiates
//! auction vaults. The registry owns compliance records (institution
//! verification, accreditation, jurisdiction, attestation signing keys),
//! the auction-creator capability set, the vault index, and the global
//! pause switch.
//!
//! Vaults consume this state read-only through the
//! [`tender_vault::PlatformGate`] trait, which the registry implements.
//! Compliance revocation therefore takes effect at a supplier's next
//! commit attempt with no vault-side bookkeeping.

pub mod bond;
pub mod registry;

pub use bond::{required_creator_bond, BOND_RATE_BPS};
pub use registry::{
    CreateVaultError, Registry, RegistryEvent, VaultParams, MIN_CLOSE_DELAY_SECS,
    MIN_REVEAL_WINDOW_SECS,
};
