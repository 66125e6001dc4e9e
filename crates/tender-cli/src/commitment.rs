//! # Commitment Subcommands
//!
//! Supplier-side commitment tooling: secret generation, commitment
//! computation, and reveal verification. All output is JSON on stdout so
//! the commands compose in scripts.

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use tender_core::{ParticipantId, TokenAmount};
use tender_crypto::{commitment_hash, verify_commitment, BidSecret, CommitmentHash};

/// Arguments for the commit subcommand.
#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Bid price in settlement token units.
    #[arg(long)]
    pub price: u64,
    /// Blinding secret as 64 hex characters (from `tender secret`).
    #[arg(long)]
    pub secret: String,
    /// Supplier participant id (UUID).
    #[arg(long)]
    pub supplier: String,
}

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub reveal: CommitArgs,
    /// The stored commitment hash to check against, as 64 hex characters.
    #[arg(long)]
    pub commitment: String,
}

#[derive(Serialize)]
struct SecretOutput {
    secret: String,
}

#[derive(Serialize)]
struct CommitOutput {
    commitment: String,
    supplier: ParticipantId,
    price: u64,
}

#[derive(Serialize)]
struct VerifyOutput {
    valid: bool,
}

fn parse_supplier(raw: &str) -> anyhow::Result<ParticipantId> {
    let uuid = Uuid::parse_str(raw).context("supplier must be a UUID")?;
    Ok(ParticipantId(uuid))
}

/// Generate a fresh blinding secret and print it as hex.
pub fn run_secret() -> anyhow::Result<()> {
    let output = SecretOutput {
        secret: BidSecret::generate().to_hex(),
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

/// Compute the commitment hash for `(price, secret, supplier)`.
pub fn run_commit(args: &CommitArgs) -> anyhow::Result<()> {
    let secret = BidSecret::from_hex(&args.secret).context("invalid --secret")?;
    let supplier = parse_supplier(&args.supplier)?;
    let commitment = commitment_hash(TokenAmount::new(args.price), &secret, &supplier)
        .context("commitment computation failed")?;
    let output = CommitOutput {
        commitment: commitment.to_hex(),
        supplier,
        price: args.price,
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

/// Check a reveal against a stored commitment. Exits nonzero on mismatch
/// so scripts can branch on the result.
pub fn run_verify(args: &VerifyArgs) -> anyhow::Result<()> {
    let secret = BidSecret::from_hex(&args.reveal.secret).context("invalid --secret")?;
    let supplier = parse_supplier(&args.reveal.supplier)?;
    let expected = CommitmentHash::from_hex(&args.commitment).context("invalid --commitment")?;

    let valid = verify_commitment(
        TokenAmount::new(args.reveal.price),
        &secret,
        &supplier,
        &expected,
    );
    println!("{}", serde_json::to_string(&VerifyOutput { valid })?);
    if !valid {
        anyhow::bail!("reveal does not match commitment");
    }
    Ok(())
}
