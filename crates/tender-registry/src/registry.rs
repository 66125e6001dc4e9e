//! # Platform Registry
//!
//! The registry is the single writer for platform-global state: who is a
//! verified institution, who holds the auction-creator capability, which
//! vaults exist, and whether the platform-wide commit freeze is active.
//! Vaults read this state through the [`PlatformGate`] trait and never
//! write it.
//!
//! Vault instantiation goes through [`Registry::create_vault`], which is
//! where creation-time guardrails live: bad parameters block the vault
//! from ever existing, so the vault state machine itself can assume a
//! validated configuration.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use tender_core::{
    AccessDenied, AuctionError, JurisdictionCode, ParticipantId, SettlementToken, Timestamp,
    TokenAmount, VaultId,
};
use tender_crypto::Ed25519PublicKey;
use tender_vault::{AuctionVault, ComplianceRecord, PlatformGate, VaultConfig};

use crate::bond::required_creator_bond;

/// Vaults must close at least this long after creation.
pub const MIN_CLOSE_DELAY_SECS: u64 = 300;

/// Floor on the reveal window length.
pub const MIN_REVEAL_WINDOW_SECS: u64 = 3_600;

/// Why a vault could not be created. Creation-time failures block
/// instantiation entirely; there is no partially-created vault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateVaultError {
    #[error("caller does not hold the auction-creator capability")]
    CreatorCapabilityRequired,
    #[error("invalid auction timing: {0}")]
    InvalidTiming(String),
    #[error("allowed supplier set must be non-empty")]
    InvalidSuppliers,
    #[error("posted bond {posted} below required {required}")]
    InsufficientBond {
        required: TokenAmount,
        posted: TokenAmount,
    },
}

/// Creator-supplied auction parameters. The registry fills in the vault
/// id, records the creator as buyer, and attaches the posted bond.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultParams {
    pub oracle: ParticipantId,
    pub close_time: Timestamp,
    pub reveal_window_secs: u64,
    pub settlement_window_secs: u64,
    pub oracle_timeout_secs: u64,
    pub deposit_required: TokenAmount,
    pub allowed_suppliers: BTreeSet<ParticipantId>,
    pub settlement_token: SettlementToken,
    pub declared_asset_value: TokenAmount,
    pub require_accredited: bool,
    pub allowed_jurisdictions: BTreeSet<JurisdictionCode>,
}

/// Audit record of a registry mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RegistryEvent {
    CreatorGranted {
        participant: ParticipantId,
    },
    CreatorRevoked {
        participant: ParticipantId,
    },
    InstitutionVerified {
        participant: ParticipantId,
        accredited: bool,
        jurisdiction: JurisdictionCode,
    },
    InstitutionRevoked {
        participant: ParticipantId,
    },
    VaultCreated {
        vault: VaultId,
        creator: ParticipantId,
        at: Timestamp,
    },
    PlatformPaused,
    PlatformUnpaused,
}

/// Platform-global state: compliance records, creator capabilities, the
/// vault index, and the pause switch. One admin, fixed at construction.
#[derive(Debug, Clone)]
pub struct Registry {
    admin: ParticipantId,
    records: BTreeMap<ParticipantId, ComplianceRecord>,
    creators: BTreeSet<ParticipantId>,
    /// Vault id -> creator. The registry indexes vaults; it does not own
    /// them — `create_vault` hands the vault to the caller.
    vaults: BTreeMap<VaultId, ParticipantId>,
    vaults_by_creator: BTreeMap<ParticipantId, BTreeSet<VaultId>>,
    paused: bool,
    events: Vec<RegistryEvent>,
}

impl Registry {
    pub fn new(admin: ParticipantId) -> Self {
        Self {
            admin,
            records: BTreeMap::new(),
            creators: BTreeSet::new(),
            vaults: BTreeMap::new(),
            vaults_by_creator: BTreeMap::new(),
            paused: false,
            events: Vec::new(),
        }
    }

    fn require_admin(&self, caller: ParticipantId) -> Result<(), AuctionError> {
        if caller != self.admin {
            return Err(AccessDenied::NotAdmin.into());
        }
        Ok(())
    }

    // ── Creator capability ───────────────────────────────────────────

    /// Grant the auction-creator capability. Admin-only, idempotent.
    pub fn grant_creator(
        &mut self,
        caller: ParticipantId,
        participant: ParticipantId,
    ) -> Result<(), AuctionError> {
        self.require_admin(caller)?;
        if self.creators.insert(participant) {
            self.events.push(RegistryEvent::CreatorGranted { participant });
            info!(%participant, "creator capability granted");
        }
        Ok(())
    }

    /// Revoke the auction-creator capability. Admin-only, idempotent.
    /// Existing vaults are unaffected; the capability gates creation only.
    pub fn revoke_creator(
        &mut self,
        caller: ParticipantId,
        participant: ParticipantId,
    ) -> Result<(), AuctionError> {
        self.require_admin(caller)?;
        if self.creators.remove(&participant) {
            self.events.push(RegistryEvent::CreatorRevoked { participant });
            info!(%participant, "creator capability revoked");
        }
        Ok(())
    }

    // ── Institution verification ─────────────────────────────────────

    /// Record (or re-record) a participant as a verified institution,
    /// together with its accreditation flag, jurisdiction, and the key
    /// its conflict attestations verify against. Admin-only; an upsert,
    /// so re-verifying updates the record in place.
    pub fn verify_institution(
        &mut self,
        caller: ParticipantId,
        participant: ParticipantId,
        accredited: bool,
        jurisdiction: JurisdictionCode,
        signing_key: Ed25519PublicKey,
    ) -> Result<(), AuctionError> {
        self.require_admin(caller)?;
        self.records.insert(
            participant,
            ComplianceRecord {
                verified: true,
                accredited,
                jurisdiction: jurisdiction.clone(),
                signing_key: Some(signing_key),
            },
        );
        self.events.push(RegistryEvent::InstitutionVerified {
            participant,
            accredited,
            jurisdiction: jurisdiction.clone(),
        });
        info!(%participant, %jurisdiction, accredited, "institution verified");
        Ok(())
    }

    /// Clear a participant's verification. Admin-only, idempotent.
    /// Takes effect at the next compliance check: vaults re-query the
    /// gate on every commit.
    pub fn revoke_institution(
        &mut self,
        caller: ParticipantId,
        participant: ParticipantId,
    ) -> Result<(), AuctionError> {
        self.require_admin(caller)?;
        if self.records.remove(&participant).is_some() {
            self.events
                .push(RegistryEvent::InstitutionRevoked { participant });
            warn!(%participant, "institution verification revoked");
        }
        Ok(())
    }

    // ── Vault creation ───────────────────────────────────────────────

    /// Instantiate an auction vault. The caller becomes the buyer.
    ///
    /// Guardrails, each a distinct failure: creator capability, close
    /// time at least [`MIN_CLOSE_DELAY_SECS`] out, reveal window at least
    /// [`MIN_REVEAL_WINDOW_SECS`], non-empty supplier whitelist, and a
    /// posted bond covering [`required_creator_bond`] of the declared
    /// asset value.
    pub fn create_vault(
        &mut self,
        now: Timestamp,
        creator: ParticipantId,
        params: VaultParams,
        bond_posted: TokenAmount,
    ) -> Result<AuctionVault, CreateVaultError> {
        if !self.creators.contains(&creator) {
            return Err(CreateVaultError::CreatorCapabilityRequired);
        }
        if params.close_time <= now.plus_secs(MIN_CLOSE_DELAY_SECS) {
            return Err(CreateVaultError::InvalidTiming(format!(
                "close_time must be more than {MIN_CLOSE_DELAY_SECS}s after creation"
            )));
        }
        if params.reveal_window_secs < MIN_REVEAL_WINDOW_SECS {
            return Err(CreateVaultError::InvalidTiming(format!(
                "reveal window must be at least {MIN_REVEAL_WINDOW_SECS}s"
            )));
        }
        if params.allowed_suppliers.is_empty() {
            return Err(CreateVaultError::InvalidSuppliers);
        }
        let required = required_creator_bond(params.declared_asset_value);
        if bond_posted < required {
            return Err(CreateVaultError::InsufficientBond {
                required,
                posted: bond_posted,
            });
        }

        let vault_id = VaultId::new();
        let vault = AuctionVault::open(VaultConfig {
            vault_id,
            buyer: creator,
            oracle: params.oracle,
            platform_admin: self.admin,
            close_time: params.close_time,
            reveal_window_secs: params.reveal_window_secs,
            settlement_window_secs: params.settlement_window_secs,
            oracle_timeout_secs: params.oracle_timeout_secs,
            deposit_required: params.deposit_required,
            allowed_suppliers: params.allowed_suppliers,
            settlement_token: params.settlement_token,
            declared_asset_value: params.declared_asset_value,
            creator_bond: bond_posted,
            require_accredited: params.require_accredited,
            allowed_jurisdictions: params.allowed_jurisdictions,
        });

        self.vaults.insert(vault_id, creator);
        self.vaults_by_creator
            .entry(creator)
            .or_default()
            .insert(vault_id);
        self.events.push(RegistryEvent::VaultCreated {
            vault: vault_id,
            creator,
            at: now,
        });
        info!(vault = %vault_id, %creator, "vault created");
        Ok(vault)
    }

    // ── Pause switch ─────────────────────────────────────────────────

    /// Freeze `commit_bid` platform-wide. Admin-only, idempotent. Vaults
    /// past their commit window are unaffected.
    pub fn pause(&mut self, caller: ParticipantId) -> Result<(), AuctionError> {
        self.require_admin(caller)?;
        if !self.paused {
            self.paused = true;
            self.events.push(RegistryEvent::PlatformPaused);
            warn!("platform paused");
        }
        Ok(())
    }

    /// Lift the commit freeze. Admin-only, idempotent.
    pub fn unpause(&mut self, caller: ParticipantId) -> Result<(), AuctionError> {
        self.require_admin(caller)?;
        if self.paused {
            self.paused = false;
            self.events.push(RegistryEvent::PlatformUnpaused);
            info!("platform unpaused");
        }
        Ok(())
    }

    // ── Read accessors ───────────────────────────────────────────────

    pub fn admin(&self) -> ParticipantId {
        self.admin
    }

    pub fn is_creator(&self, participant: &ParticipantId) -> bool {
        self.creators.contains(participant)
    }

    pub fn is_verified(&self, participant: &ParticipantId) -> bool {
        self.records
            .get(participant)
            .map(|r| r.verified)
            .unwrap_or(false)
    }

    pub fn is_accredited(&self, participant: &ParticipantId) -> bool {
        self.records
            .get(participant)
            .map(|r| r.accredited)
            .unwrap_or(false)
    }

    pub fn jurisdiction_of(&self, participant: &ParticipantId) -> Option<JurisdictionCode> {
        self.records.get(participant).map(|r| r.jurisdiction.clone())
    }

    /// All vault ids ever created, with their creators.
    pub fn all_vaults(&self) -> impl Iterator<Item = (&VaultId, &ParticipantId)> {
        self.vaults.iter()
    }

    /// Vault ids created by a given participant.
    pub fn vaults_by_creator(&self, creator: &ParticipantId) -> BTreeSet<VaultId> {
        self.vaults_by_creator
            .get(creator)
            .cloned()
            .unwrap_or_default()
    }

    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }
}

impl PlatformGate for Registry {
    fn compliance(&self, id: &ParticipantId) -> Option<ComplianceRecord> {
        self.records.get(id).cloned()
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
