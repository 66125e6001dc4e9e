//! Shared test fixtures: a vault wired to a static compliance gate with a
//! configurable roster of attested suppliers.

use std::collections::BTreeSet;

use tender_core::{
    JurisdictionCode, ParticipantId, SettlementToken, Timestamp, TokenAmount, VaultId,
};
use tender_crypto::{commitment_hash, BidSecret, ConflictAttestation, Ed25519KeyPair};

use crate::bid::StorageRoot;
use crate::gate::{ComplianceRecord, StaticGate};
use crate::vault::{AuctionVault, VaultConfig};

pub(crate) const DEPOSIT: u64 = 100;
pub(crate) const CREATOR_BOND: u64 = 500;

pub(crate) fn t(s: &str) -> Timestamp {
    Timestamp::parse(s).unwrap()
}

/// Commit window: 12:00–13:00. Reveal window: one hour from trigger.
pub(crate) fn open_time() -> Timestamp {
    t("2026-03-01T12:00:00Z")
}

pub(crate) fn close_time() -> Timestamp {
    t("2026-03-01T13:00:00Z")
}

pub(crate) fn reveal_time() -> Timestamp {
    t("2026-03-01T13:30:00Z")
}

pub(crate) fn settle_time() -> Timestamp {
    t("2026-03-01T14:00:01Z")
}

pub(crate) struct Supplier {
    pub id: ParticipantId,
    pub key: Ed25519KeyPair,
}

pub(crate) struct TestBed {
    pub buyer: ParticipantId,
    pub oracle: ParticipantId,
    pub admin: ParticipantId,
    pub suppliers: Vec<Supplier>,
    pub gate: StaticGate,
    pub vault: AuctionVault,
}

impl TestBed {
    /// A vault with `n` verified, accredited, attestation-ready suppliers.
    pub fn new(n: usize) -> Self {
        Self::with_config(n, |_| {})
    }

    pub fn with_config(n: usize, customize: impl FnOnce(&mut VaultConfig)) -> Self {
        let buyer = ParticipantId::new();
        let oracle = ParticipantId::new();
        let admin = ParticipantId::new();
        let suppliers: Vec<Supplier> = (0..n)
            .map(|_| Supplier {
                id: ParticipantId::new(),
                key: Ed25519KeyPair::generate(),
            })
            .collect();

        let mut gate = StaticGate::new();
        for supplier in &suppliers {
            gate = gate.with_record(
                supplier.id,
                ComplianceRecord {
                    verified: true,
                    accredited: true,
                    jurisdiction: JurisdictionCode::new("US").unwrap(),
                    signing_key: Some(supplier.key.public_key()),
                },
            );
        }

        let mut config = VaultConfig {
            vault_id: VaultId::new(),
            buyer,
            oracle,
            platform_admin: admin,
            close_time: close_time(),
            reveal_window_secs: 3600,
            settlement_window_secs: 86_400,
            oracle_timeout_secs: 3600,
            deposit_required: TokenAmount::new(DEPOSIT),
            allowed_suppliers: suppliers.iter().map(|s| s.id).collect::<BTreeSet<_>>(),
            settlement_token: SettlementToken::Native,
            declared_asset_value: TokenAmount::new(100_000),
            creator_bond: TokenAmount::new(CREATOR_BOND),
            require_accredited: false,
            allowed_jurisdictions: BTreeSet::new(),
        };
        customize(&mut config);

        Self {
            buyer,
            oracle,
            admin,
            suppliers,
            gate,
            vault: AuctionVault::open(config),
        }
    }

    /// File supplier `i`'s conflict attestation.
    pub fn attest(&mut self, i: usize) {
        let attestation = self.attestation_for(i);
        self.vault
            .file_attestation(open_time(), attestation, &self.gate)
            .unwrap();
    }

    /// A freshly signed attestation for supplier `i`, bound to this vault.
    pub fn attestation_for(&self, i: usize) -> ConflictAttestation {
        let supplier = &self.suppliers[i];
        ConflictAttestation::sign(
            &supplier.key,
            supplier.id,
            self.vault.config().vault_id,
            open_time(),
        )
        .unwrap()
    }

    /// Attest and commit supplier `i` at `price`; returns the secret
    /// needed for the reveal.
    pub fn commit(&mut self, i: usize, price: u64) -> BidSecret {
        self.attest(i);
        let supplier = self.suppliers[i].id;
        let secret = BidSecret::generate();
        let commitment =
            commitment_hash(TokenAmount::new(price), &secret, &supplier).unwrap();
        self.vault
            .commit_bid(
                open_time(),
                supplier,
                commitment,
                StorageRoot::new("s3://sealed-offers/test").unwrap(),
                TokenAmount::new(DEPOSIT),
                &self.gate,
            )
            .unwrap();
        secret
    }

    /// Move the vault into REVEAL.
    pub fn trigger(&mut self) {
        self.vault.trigger_reveal_phase(close_time()).unwrap();
    }

    /// Reveal supplier `i`'s bid.
    pub fn reveal(&mut self, i: usize, price: u64, secret: &BidSecret) {
        self.vault
            .reveal_bid(
                reveal_time(),
                self.suppliers[i].id,
                TokenAmount::new(price),
                secret,
            )
            .unwrap();
    }

    /// Settle as the buyer after the reveal deadline.
    pub fn settle(&mut self) -> crate::settlement::SettlementOutcome {
        self.vault.settle(settle_time(), self.buyer).unwrap()
    }
}
