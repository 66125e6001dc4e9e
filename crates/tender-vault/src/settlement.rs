//! # Winner Selection
//!
//! The settlement rule is a pure function over the bid map: among revealed
//! bids, the winner is the **lowest** revealed price — reverse-auction
//! semantics, since a procurement buyer wants the cheapest compliant
//! supplier. Ties break by earliest reveal order. The runner-up in the
//! same ordering is retained so a later buyer default can fall back to it
//! without re-running the auction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tender_core::{ParticipantId, TokenAmount};

use crate::bid::Bid;

/// A revealed bid in settlement ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedReveal {
    /// The revealing supplier.
    pub supplier: ParticipantId,
    /// The revealed price.
    pub price: TokenAmount,
    /// Reveal order (tie-break key).
    pub reveal_seq: u32,
}

/// The result of running the settlement rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementOutcome {
    /// The lowest revealed bid, if any bid was revealed.
    pub winner: Option<RankedReveal>,
    /// The second-lowest revealed bid, retained as the buyer-default
    /// fallback.
    pub runner_up: Option<RankedReveal>,
}

/// Rank revealed bids by `(price, reveal_seq)` and pick winner and
/// runner-up.
///
/// Zero revealed bids is a defined outcome (`winner: None`), not an error:
/// the vault still settles, slashing every unrevealed deposit.
pub(crate) fn select_winner(bids: &BTreeMap<ParticipantId, Bid>) -> SettlementOutcome {
    let mut revealed: Vec<RankedReveal> = bids
        .iter()
        .filter_map(|(supplier, bid)| {
            let price = bid.revealed_price()?;
            let reveal_seq = bid.reveal_seq()?;
            Some(RankedReveal {
                supplier: *supplier,
                price,
                reveal_seq,
            })
        })
        .collect();
    revealed.sort_by_key(|r| (r.price, r.reveal_seq));

    SettlementOutcome {
        winner: revealed.first().copied(),
        runner_up: revealed.get(1).copied(),
    }
}
