//! # tender CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Tender Stack CLI — sealed-bid procurement tooling.
///
/// Generates bid secrets, computes and verifies commitments, and runs an
/// in-process auction simulation.
#[derive(Parser, Debug)]
#[command(name = "tender", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate a fresh bid blinding secret.
    Secret,
    /// Compute the commitment hash for a sealed bid.
    Commit(tender_cli::commitment::CommitArgs),
    /// Check a reveal against a stored commitment.
    Verify(tender_cli::commitment::VerifyArgs),
    /// Run a canned three-supplier auction and print its event log.
    Simulate(tender_cli::simulate::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Secret => tender_cli::commitment::run_secret(),
        Commands::Commit(args) => tender_cli::commitment::run_commit(&args),
        Commands::Verify(args) => tender_cli::commitment::run_verify(&args),
        Commands::Simulate(args) => tender_cli::simulate::run(&args),
    }
}
