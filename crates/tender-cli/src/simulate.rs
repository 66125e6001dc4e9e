//! # Simulate Subcommand
//!
//! Runs a complete sealed-tender auction in-process: three verified
//! suppliers commit, reveal, and settle, the winner pays, and the oracle
//! confirms delivery. Time is synthetic — every vault operation takes its
//! timestamp explicitly, so the simulation advances a virtual clock
//! instead of sleeping.
//!
//! Output is the registry and vault event logs as JSON lines, one event
//! per line, suitable for piping into `jq`.

use std::collections::BTreeSet;

use anyhow::Context;
use clap::Args;
use tracing::info;

use tender_core::{
    JurisdictionCode, ParticipantId, SettlementToken, Timestamp, TokenAmount,
};
use tender_crypto::{commitment_hash, BidSecret, ConflictAttestation, Ed25519KeyPair};
use tender_registry::{required_creator_bond, Registry, VaultParams};
use tender_vault::StorageRoot;

/// Arguments for the simulate subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Fixed deposit each supplier posts with its commitment.
    #[arg(long, default_value_t = 1_000)]
    pub deposit: u64,
    /// Declared value of the auctioned asset.
    #[arg(long, default_value_t = 1_000_000)]
    pub declared_value: u64,
}

const PRICES: [u64; 3] = [150_000, 120_000, 130_000];

/// Run the canned three-supplier flow and print both event logs.
pub fn run(args: &SimulateArgs) -> anyhow::Result<()> {
    let admin = ParticipantId::new();
    let buyer = ParticipantId::new();
    let oracle = ParticipantId::new();
    let suppliers: Vec<(ParticipantId, Ed25519KeyPair)> = (0..3)
        .map(|_| (ParticipantId::new(), Ed25519KeyPair::generate()))
        .collect();

    let mut registry = Registry::new(admin);
    registry.grant_creator(admin, buyer)?;
    for (id, key) in &suppliers {
        registry.verify_institution(
            admin,
            *id,
            true,
            JurisdictionCode::new("CH")?,
            key.public_key(),
        )?;
    }

    // Synthetic clock: creation now, commits shortly after, close in ten
    // minutes, one-hour reveal window.
    let t0 = Timestamp::now();
    let close = t0.plus_secs(600);
    let declared = TokenAmount::new(args.declared_value);
    let bond = required_creator_bond(declared);

    let mut vault = registry
        .create_vault(
            t0,
            buyer,
            VaultParams {
                oracle,
                close_time: close,
                reveal_window_secs: 3_600,
                settlement_window_secs: 86_400,
                oracle_timeout_secs: 3_600,
                deposit_required: TokenAmount::new(args.deposit),
                allowed_suppliers: suppliers.iter().map(|(id, _)| *id).collect::<BTreeSet<_>>(),
                settlement_token: SettlementToken::Native,
                declared_asset_value: declared,
                require_accredited: false,
                allowed_jurisdictions: BTreeSet::new(),
            },
            bond,
        )
        .context("vault creation failed")?;
    let vault_id = vault.config().vault_id;
    info!(vault = %vault_id, "simulation vault created");

    let commit_at = t0.plus_secs(60);
    let mut secrets = Vec::new();
    for ((id, key), price) in suppliers.iter().zip(PRICES) {
        let attestation = ConflictAttestation::sign(key, *id, vault_id, commit_at)?;
        vault.file_attestation(commit_at, attestation, &registry)?;

        let secret = BidSecret::generate();
        let commitment = commitment_hash(TokenAmount::new(price), &secret, id)?;
        vault.commit_bid(
            commit_at,
            *id,
            commitment,
            StorageRoot::new("sim://sealed-offer")?,
            TokenAmount::new(args.deposit),
            &registry,
        )?;
        secrets.push(secret);
    }

    vault.trigger_reveal_phase(close)?;
    let reveal_at = close.plus_secs(60);
    for ((id, _), (price, secret)) in suppliers.iter().zip(PRICES.iter().zip(&secrets)) {
        vault.reveal_bid(reveal_at, *id, TokenAmount::new(*price), secret)?;
    }

    let settle_at = close.plus_secs(3_601);
    let outcome = vault.settle(settle_at, buyer)?;
    let winner = outcome
        .winner
        .context("canned flow always produces a winner")?;
    info!(winner = %winner.supplier, price = %winner.price, "simulation settled");

    let pay_at = settle_at.plus_secs(600);
    vault.submit_payment(pay_at, winner.supplier, winner.price)?;
    vault.confirm_delivery(pay_at.plus_secs(600), oracle)?;
    vault.release_creator_bond(pay_at.plus_secs(1_200), buyer)?;

    for event in registry.events() {
        println!("{}", serde_json::to_string(event)?);
    }
    for event in vault.events() {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}
