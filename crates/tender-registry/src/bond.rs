//! # Creator Bond Sizing
//!
//! Every auction creator posts a refundable bond proportional to the
//! declared asset value. The bond gives the platform admin something to
//! slash when a creator lists a fraudulent asset, without requiring the
//! platform to custody the asset itself.

use tender_core::TokenAmount;

/// Bond rate in basis points of declared asset value.
pub const BOND_RATE_BPS: u64 = 50;

/// The minimum bond for a given declared asset value: 50 basis points,
/// rounded up so any nonzero declaration carries a nonzero bond.
///
/// Widening to u128 keeps the intermediate product exact for the full
/// u64 range of declared values.
pub fn required_creator_bond(declared_asset_value: TokenAmount) -> TokenAmount {
    let declared = declared_asset_value.raw() as u128;
    let bps = BOND_RATE_BPS as u128;
    let bond = (declared * bps).div_ceil(10_000);
    // declared * 50 / 10_000 <= declared, so the cast back cannot truncate.
    TokenAmount::new(bond as u64)
}
