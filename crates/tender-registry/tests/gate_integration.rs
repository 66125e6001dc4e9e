//! Registry-created vaults consuming the registry as their compliance
//! gate: verification, revocation, and the pause switch all take effect
//! at the next commit attempt with no vault-side bookkeeping.

use std::collections::BTreeSet;

use tender_core::{
    AccessDenied, AuctionError, JurisdictionCode, ParticipantId, SettlementToken, Timestamp,
    TokenAmount,
};
use tender_crypto::{commitment_hash, BidSecret, ConflictAttestation, Ed25519KeyPair};
use tender_registry::{Registry, VaultParams};
use tender_vault::{AuctionVault, StorageRoot};

fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).unwrap()
}

struct Platform {
    registry: Registry,
    admin: ParticipantId,
    creator: ParticipantId,
    supplier: ParticipantId,
    supplier_key: Ed25519KeyPair,
    vault: AuctionVault,
}

fn platform() -> Platform {
    let admin = ParticipantId::new();
    let creator = ParticipantId::new();
    let supplier = ParticipantId::new();
    let supplier_key = Ed25519KeyPair::generate();

    let mut registry = Registry::new(admin);
    registry.grant_creator(admin, creator).unwrap();
    registry
        .verify_institution(
            admin,
            supplier,
            true,
            JurisdictionCode::new("US").unwrap(),
            supplier_key.public_key(),
        )
        .unwrap();

    let vault = registry
        .create_vault(
            ts("2026-05-01T09:00:00Z"),
            creator,
            VaultParams {
                oracle: ParticipantId::new(),
                close_time: ts("2026-05-01T12:00:00Z"),
                reveal_window_secs: 3_600,
                settlement_window_secs: 86_400,
                oracle_timeout_secs: 3_600,
                deposit_required: TokenAmount::new(250),
                allowed_suppliers: [supplier].into_iter().collect::<BTreeSet<_>>(),
                settlement_token: SettlementToken::Native,
                declared_asset_value: TokenAmount::new(100_000),
                require_accredited: false,
                allowed_jurisdictions: BTreeSet::new(),
            },
            TokenAmount::new(500),
        )
        .unwrap();

    Platform {
        registry,
        admin,
        creator,
        supplier,
        supplier_key,
        vault,
    }
}

fn attest(p: &mut Platform, at: Timestamp) {
    let attestation = ConflictAttestation::sign(
        &p.supplier_key,
        p.supplier,
        p.vault.config().vault_id,
        at,
    )
    .unwrap();
    p.vault
        .file_attestation(at, attestation, &p.registry)
        .unwrap();
}

fn try_commit(p: &mut Platform, at: Timestamp) -> Result<(), AuctionError> {
    let secret = BidSecret::generate();
    let commitment = commitment_hash(TokenAmount::new(1_000), &secret, &p.supplier).unwrap();
    p.vault.commit_bid(
        at,
        p.supplier,
        commitment,
        StorageRoot::new("s3://sealed/offer").unwrap(),
        TokenAmount::new(250),
        &p.registry,
    )
}

#[test]
fn registry_backed_commit_succeeds() {
    let mut p = platform();
    let at = ts("2026-05-01T10:00:00Z");
    attest(&mut p, at);
    try_commit(&mut p, at).unwrap();
    assert!(p.vault.bid(&p.supplier).is_some());
}

#[test]
fn pause_freezes_commits_without_touching_vault_state() {
    let mut p = platform();
    let at = ts("2026-05-01T10:00:00Z");
    attest(&mut p, at);

    let admin = p.admin;
    p.registry.pause(admin).unwrap();
    let err = try_commit(&mut p, at).unwrap_err();
    assert!(matches!(
        err,
        AuctionError::AccessDenied(AccessDenied::Paused)
    ));

    // Unpause and the same supplier commits normally.
    p.registry.unpause(admin).unwrap();
    try_commit(&mut p, ts("2026-05-01T10:05:00Z")).unwrap();
}

#[test]
fn revocation_takes_effect_at_next_commit() {
    let mut p = platform();
    let at = ts("2026-05-01T10:00:00Z");
    attest(&mut p, at);

    let (admin, supplier) = (p.admin, p.supplier);
    p.registry.revoke_institution(admin, supplier).unwrap();
    let err = try_commit(&mut p, at).unwrap_err();
    assert!(matches!(
        err,
        AuctionError::AccessDenied(AccessDenied::NotVerified)
    ));
}

#[test]
fn creator_revocation_leaves_existing_vault_alive() {
    let mut p = platform();
    let (admin, creator) = (p.admin, p.creator);
    p.registry.revoke_creator(admin, creator).unwrap();

    // The existing vault still accepts commits; only new creation is
    // blocked.
    let at = ts("2026-05-01T10:00:00Z");
    attest(&mut p, at);
    try_commit(&mut p, at).unwrap();
    assert!(p
        .registry
        .create_vault(
            at,
            creator,
            VaultParams {
                oracle: ParticipantId::new(),
                close_time: ts("2026-05-01T12:00:00Z"),
                reveal_window_secs: 3_600,
                settlement_window_secs: 86_400,
                oracle_timeout_secs: 3_600,
                deposit_required: TokenAmount::new(250),
                allowed_suppliers: [p.supplier].into_iter().collect::<BTreeSet<_>>(),
                settlement_token: SettlementToken::Native,
                declared_asset_value: TokenAmount::new(100_000),
                require_accredited: false,
                allowed_jurisdictions: BTreeSet::new(),
            },
            TokenAmount::new(500),
        )
        .is_err());
}
