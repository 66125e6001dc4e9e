//! # tender-cli — Tender Stack Command-Line Interface
//!
//! Supplier-side tooling for the sealed-bid protocol plus an in-process
//! simulation of a full auction.
//!
//! ## Subcommands
//!
//! - `secret` — Generate a fresh bid blinding secret
//! - `commit` — Compute the commitment hash for a sealed bid
//! - `verify` — Check a reveal against a stored commitment
//! - `simulate` — Run a canned three-supplier auction and print its
//!   event log as JSON lines
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates — no protocol logic here.
//! - Machine-readable output goes to stdout as JSON; diagnostics go to
//!   tracing on stderr.

pub mod commitment;
pub mod simulate;
