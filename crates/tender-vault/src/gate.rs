//! # Platform Gate — Injected Compliance Capability
//!
//! Compliance state is global and mutable (the registry's admin updates
//! it), but vaults must only ever read it. Instead of ambient global
//! state, every vault operation that needs compliance data takes a
//! `&dyn PlatformGate` — a read-only lookup capability the registry
//! implements. Tests inject [`StaticGate`] instead.
//!
//! The gate also carries the platform-wide pause switch, which freezes
//! `commit_bid` across all vaults without touching settled ones.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tender_core::{JurisdictionCode, ParticipantId};
use tender_crypto::Ed25519PublicKey;

/// A participant's compliance standing, owned by the registry and read by
/// vaults at commit time. Vaults never write these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    /// Whether the participant passed identity verification.
    pub verified: bool,
    /// Whether the participant is an accredited institution.
    pub accredited: bool,
    /// The jurisdiction the participant is verified in.
    pub jurisdiction: JurisdictionCode,
    /// The key the participant's conflict attestations are verified
    /// against. Registered by the admin at verification time; a supplier
    /// without one cannot attest, and therefore cannot bid.
    pub signing_key: Option<Ed25519PublicKey>,
}

/// Read-only view of platform state that vaults consult.
///
/// All methods take `&self`: a vault holding a gate cannot mutate
/// compliance records or the pause switch through it.
pub trait PlatformGate {
    /// The compliance record for a participant, if any exists.
    fn compliance(&self, id: &ParticipantId) -> Option<ComplianceRecord>;

    /// Whether the platform-wide commit freeze is active.
    fn is_paused(&self) -> bool;
}

/// A fixed in-memory gate for tests and simulations.
#[derive(Debug, Clone, Default)]
pub struct StaticGate {
    records: BTreeMap<ParticipantId, ComplianceRecord>,
    paused: bool,
}

impl StaticGate {
    /// An empty gate: nobody is verified, platform not paused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a compliance record.
    pub fn with_record(mut self, id: ParticipantId, record: ComplianceRecord) -> Self {
        self.records.insert(id, record);
        self
    }

    /// Set the pause switch.
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }
}

impl PlatformGate for StaticGate {
    fn compliance(&self, id: &ParticipantId) -> Option<ComplianceRecord> {
        self.records.get(id).cloned()
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ComplianceRecord {
        ComplianceRecord {
            verified: true,
            accredited: false,
            jurisdiction: JurisdictionCode::new("US").unwrap(),
            signing_key: None,
        }
    }

    #[test]
    fn test_static_gate_lookup() {
        let id = ParticipantId::new();
        let gate = StaticGate::new().with_record(id, record());
        assert_eq!(gate.compliance(&id), Some(record()));
        assert_eq!(gate.compliance(&ParticipantId::new()), None);
    }

    #[test]
    fn test_pause_switch() {
        assert!(!StaticGate::new().is_paused());
        assert!(StaticGate::new().with_paused(true).is_paused());
    }
}
