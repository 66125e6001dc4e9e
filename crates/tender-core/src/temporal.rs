//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC-only timestamp type truncated to seconds
//! precision. Every deadline in the protocol (`close_time`,
//! `reveal_deadline`, `settlement_deadline`, oracle timeout) is a
//! `Timestamp`, and every eligibility check is a pure comparison of the
//! caller-supplied current time against a stored deadline. There are no
//! background timers anywhere in the stack.
//!
//! ## Security Invariant
//!
//! Timestamps must be UTC with Z suffix. Local timezone offsets would make
//! the same instant render to different canonical bytes, breaking signed
//! attestation payloads. Non-UTC inputs are rejected at construction.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AuctionError, InvalidInput};

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`] — from an ISO8601 string, rejecting non-UTC offsets.
/// - [`Timestamp::from_epoch_secs()`] — from a Unix timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating
    /// sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 string.
    ///
    /// **Rejects non-UTC inputs.** Only the `Z` suffix is accepted — even
    /// `+00:00`, which is semantically equivalent, is rejected so that the
    /// canonical rendering of an instant is unique.
    pub fn parse(s: &str) -> Result<Self, AuctionError> {
        if !s.ends_with('Z') {
            return Err(InvalidInput::MalformedTimestamp(format!(
                "timestamp must use Z suffix (UTC only), got {s:?}"
            ))
            .into());
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            InvalidInput::MalformedTimestamp(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, AuctionError> {
        let dt = DateTime::from_timestamp(secs, 0).ok_or_else(|| {
            InvalidInput::MalformedTimestamp(format!("invalid Unix timestamp: {secs}"))
        })?;
        Ok(Self(dt))
    }

    /// The Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// This timestamp advanced by `secs` whole seconds.
    ///
    /// Deadline arithmetic (`close_time + reveal_window`, etc.) flows
    /// through here. Saturates at the chrono range limit rather than
    /// panicking; a saturated deadline is simply unreachable.
    pub fn plus_secs(&self, secs: u64) -> Self {
        let delta = chrono::Duration::seconds(secs.min(i64::MAX as u64) as i64);
        Self(self.0.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-03-01T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision.
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
