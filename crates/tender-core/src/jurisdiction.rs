//! # Jurisdiction Codes
//!
//! Compliance records carry the jurisdiction a participant is verified in,
//! and vaults may restrict bidding to a set of jurisdictions. The code is a
//! short upper-case token ("US", "GB", "EU-MICA") validated at construction
//! so that comparisons are exact string equality with no case traps.

use serde::{Deserialize, Serialize};

use crate::error::{AuctionError, InvalidInput};

/// A validated jurisdiction code: non-empty, ASCII upper-case letters,
/// digits, and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JurisdictionCode(String);

impl JurisdictionCode {
    /// Construct a jurisdiction code, normalizing to upper-case.
    ///
    /// # Errors
    ///
    /// Rejects empty input and characters outside `[A-Z0-9-]`.
    pub fn new(code: &str) -> Result<Self, AuctionError> {
        let normalized = code.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(InvalidInput::EmptyJurisdiction.into());
        }
        if !normalized
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(InvalidInput::MalformedJurisdiction(normalized).into());
        }
        Ok(Self(normalized))
    }

    /// The normalized code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for JurisdictionCode {
    type Error = AuctionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<JurisdictionCode> for String {
    fn from(code: JurisdictionCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for JurisdictionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
