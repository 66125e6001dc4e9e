//! # Canonical Serialization — Deterministic Signing Bytes
//!
//! `CanonicalBytes` is the sole construction path for bytes that get signed
//! (conflict attestations). Serialization uses RFC 8785 JCS (sorted keys,
//! compact separators) via `serde_jcs`, after rejecting any float value —
//! floats have non-deterministic canonical renderings at the edges and all
//! protocol amounts are integers anyway.
//!
//! ## Security Invariant
//!
//! The inner buffer is private and the only constructor is
//! [`CanonicalBytes::new()`]. Any function that signs or verifies must take
//! `&CanonicalBytes`, so a non-canonical byte path cannot exist.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Bytes produced exclusively by JCS canonicalization with float rejection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `FloatRejected` if the value contains any non-integer JSON
    /// number, or `SerializationFailed` if serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let bytes = serde_jcs::to_vec(&value)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for signing or digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively reject any float anywhere in the value tree.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Number(n) => {
            if !n.is_i64() && !n.is_u64() {
                // f64() is always Some for a non-integer serde_json number.
                return Err(CanonicalizationError::FloatRejected(
                    n.as_f64().unwrap_or(f64::NAN),
                ));
            }
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(reject_floats),
        Value::Object(map) => map.values().try_for_each(reject_floats),
        _ => Ok(()),
    }
}
