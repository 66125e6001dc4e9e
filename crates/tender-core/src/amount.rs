//! # Token Amounts and Settlement Currency
//!
//! `TokenAmount` is the single money type in the stack: deposits, bids,
//! bonds, and payments are all indivisible base units of the vault's
//! settlement currency. Arithmetic is checked — an overflowing ledger
//! update is a structured error, never a silent wrap.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Arithmetic failure on a `TokenAmount`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    /// Addition exceeded the representable range.
    #[error("token amount overflow: {0} + {1}")]
    Overflow(u64, u64),

    /// Subtraction went below zero.
    #[error("token amount underflow: {0} - {1}")]
    Underflow(u64, u64),
}

/// An amount of the settlement currency, in indivisible base units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct TokenAmount(u64);

impl TokenAmount {
    /// The zero amount.
    pub const ZERO: TokenAmount = TokenAmount(0);

    /// Construct an amount from base units.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw base-unit value.
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Whether this amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub fn checked_add(self, other: TokenAmount) -> Result<TokenAmount, AmountError> {
        self.0
            .checked_add(other.0)
            .map(TokenAmount)
            .ok_or(AmountError::Overflow(self.0, other.0))
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: TokenAmount) -> Result<TokenAmount, AmountError> {
        self.0
            .checked_sub(other.0)
            .map(TokenAmount)
            .ok_or(AmountError::Underflow(self.0, other.0))
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The currency a vault settles in.
///
/// Either the host ledger's native currency or a reference to a fungible
/// asset. The reference is opaque to the protocol — vaults compare it for
/// equality and record it in events, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementToken {
    /// The host ledger's native currency.
    Native,
    /// A fungible asset, by opaque reference.
    Asset(String),
}

impl std::fmt::Display for SettlementToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Asset(reference) => write!(f, "asset:{reference}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add() {
        let a = TokenAmount::new(100);
        let b = TokenAmount::new(50);
        assert_eq!(a.checked_add(b).unwrap(), TokenAmount::new(150));
    }

    #[test]
    fn test_add_overflow_is_error() {
        let a = TokenAmount::new(u64::MAX);
        let result = a.checked_add(TokenAmount::new(1));
        assert_eq!(result, Err(AmountError::Overflow(u64::MAX, 1)));
    }

    #[test]
    fn test_checked_sub() {
        let a = TokenAmount::new(100);
        assert_eq!(
            a.checked_sub(TokenAmount::new(40)).unwrap(),
            TokenAmount::new(60)
        );
    }

    #[test]
    fn test_sub_underflow_is_error() {
        let a = TokenAmount::new(10);
        assert!(a.checked_sub(TokenAmount::new(11)).is_err());
    }

    #[test]
    fn test_zero() {
        assert!(TokenAmount::ZERO.is_zero());
        assert!(!TokenAmount::new(1).is_zero());
    }

    #[test]
    fn test_settlement_token_display() {
        assert_eq!(SettlementToken::Native.to_string(), "native");
        assert_eq!(
            SettlementToken::Asset("usdc".into()).to_string(),
            "asset:usdc"
        );
    }
}
