//! # Post-Settlement Delivery and Bond Lifecycle
//!
//! After SETTLED the sequence is: winner pays the winning price → the
//! delivery oracle confirms → the winner's performance collateral is
//! released. Each failure mode has a deterministic remedy:
//!
//! - Oracle never acts → the winner claims an oracle timeout.
//! - Winner never receives → the winner flags a dispute (trigger only;
//!   adjudication is off-protocol).
//! - Buyer never completes the sequence → anyone claims buyer default and
//!   the pre-recorded second bidder becomes the effective award, without
//!   re-running the auction. With no second bidder recorded this fallback
//!   is unavailable — a terminal condition, not an error to retry.
//!
//! The creator bond is released by the buyer after normal delivery, or
//! slashed by the platform admin for misconduct established out-of-band,
//! split between a designated victim and a burn sink.

use tracing::info;

use tender_core::{
    AccessDenied, AuctionError, InvalidInput, ParticipantId, StateViolation, Timestamp,
    TimingViolation, TokenAmount,
};

use crate::events::VaultEvent;
use crate::vault::{AuctionVault, BondState, Phase};

impl AuctionVault {
    /// Transfer the winning price into the vault. Winner-only, once,
    /// before the settlement deadline.
    pub fn submit_payment(
        &mut self,
        now: Timestamp,
        caller: ParticipantId,
        amount: TokenAmount,
    ) -> Result<(), AuctionError> {
        let (winner, price) = self.require_settled_winner()?;
        if caller != winner {
            return Err(AccessDenied::NotWinner.into());
        }
        if self.fallback_activated {
            return Err(StateViolation::FallbackAlreadyActivated.into());
        }
        if self.payment_submitted {
            return Err(StateViolation::PaymentAlreadySubmitted.into());
        }
        if let Some(deadline) = self.settlement_deadline {
            if now > deadline {
                return Err(TimingViolation::SettlementWindowClosed.into());
            }
        }
        if amount != price {
            return Err(InvalidInput::WrongPaymentAmount {
                expected: price.raw(),
                got: amount.raw(),
            }
            .into());
        }

        self.payment_submitted = true;
        self.paid_at = Some(now);
        self.events.push(VaultEvent::PaymentSubmitted {
            winner,
            amount,
            at: now,
        });
        info!(vault = %self.config.vault_id, %winner, %amount, "payment submitted");
        Ok(())
    }

    /// Confirm delivery. Oracle-only, after payment, once. Releases the
    /// winner's performance collateral.
    pub fn confirm_delivery(
        &mut self,
        now: Timestamp,
        caller: ParticipantId,
    ) -> Result<(), AuctionError> {
        let (winner, _) = self.require_settled_winner()?;
        if caller != self.config.oracle {
            return Err(AccessDenied::NotOracle.into());
        }
        if self.fallback_activated {
            return Err(StateViolation::FallbackAlreadyActivated.into());
        }
        if !self.payment_submitted {
            return Err(StateViolation::PaymentNotSubmitted.into());
        }
        if self.delivered {
            return Err(StateViolation::AlreadyDelivered.into());
        }

        self.delivered = true;
        self.return_deposit(winner)?;
        self.events.push(VaultEvent::DeliveryConfirmed {
            oracle: caller,
            at: now,
        });
        info!(vault = %self.config.vault_id, %winner, "delivery confirmed");
        Ok(())
    }

    /// Claim delivery after the oracle has gone silent. Winner-only,
    /// eligible once `oracle_timeout_secs` have elapsed since payment.
    /// Effect is identical to oracle confirmation.
    pub fn claim_oracle_timeout(
        &mut self,
        now: Timestamp,
        caller: ParticipantId,
    ) -> Result<(), AuctionError> {
        let (winner, _) = self.require_settled_winner()?;
        if caller != winner {
            return Err(AccessDenied::NotWinner.into());
        }
        if self.fallback_activated {
            return Err(StateViolation::FallbackAlreadyActivated.into());
        }
        let Some(paid_at) = self.paid_at else {
            return Err(StateViolation::PaymentNotSubmitted.into());
        };
        if self.delivered {
            return Err(StateViolation::AlreadyDelivered.into());
        }
        if self.delivery_disputed {
            return Err(StateViolation::AlreadyDisputed.into());
        }
        if now <= paid_at.plus_secs(self.config.oracle_timeout_secs) {
            return Err(TimingViolation::OracleTimeoutNotElapsed.into());
        }

        self.delivered = true;
        self.return_deposit(winner)?;
        self.events.push(VaultEvent::OracleTimeoutClaimed {
            winner,
            at: now,
        });
        info!(vault = %self.config.vault_id, %winner, "oracle timeout claimed");
        Ok(())
    }

    /// Flag non-receipt. Winner-only, after payment, once. This is the
    /// dispute *trigger*; adjudication happens out-of-band.
    pub fn dispute_delivery(
        &mut self,
        now: Timestamp,
        caller: ParticipantId,
    ) -> Result<(), AuctionError> {
        let (winner, _) = self.require_settled_winner()?;
        if caller != winner {
            return Err(AccessDenied::NotWinner.into());
        }
        if !self.payment_submitted {
            return Err(StateViolation::PaymentNotSubmitted.into());
        }
        if self.delivered {
            return Err(StateViolation::AlreadyDelivered.into());
        }
        if self.delivery_disputed {
            return Err(StateViolation::AlreadyDisputed.into());
        }

        self.delivery_disputed = true;
        self.events.push(VaultEvent::DeliveryDisputed {
            winner,
            at: now,
        });
        info!(vault = %self.config.vault_id, %winner, "delivery disputed");
        Ok(())
    }

    /// Claim buyer default after the settlement window lapses without
    /// delivery. Permissionless: the effect is identical regardless of
    /// caller. Activates the pre-recorded second-bidder fallback, returns
    /// the winner's collateral, and refunds any submitted payment. The
    /// `winner` field itself is never reassigned.
    pub fn claim_buyer_default(
        &mut self,
        now: Timestamp,
        _caller: ParticipantId,
    ) -> Result<(), AuctionError> {
        let (winner, price) = self.require_settled_winner()?;
        if self.fallback_activated {
            return Err(StateViolation::FallbackAlreadyActivated.into());
        }
        if self.delivered {
            return Err(StateViolation::AlreadyDelivered.into());
        }
        let Some(deadline) = self.settlement_deadline else {
            return Err(TimingViolation::SettlementWindowOpen.into());
        };
        if now <= deadline {
            return Err(TimingViolation::SettlementWindowOpen.into());
        }
        let (Some(second_bidder), Some(second_amount)) =
            (self.second_bidder, self.second_bid_amount)
        else {
            return Err(StateViolation::FallbackUnavailable.into());
        };

        self.fallback_activated = true;
        self.return_deposit(winner)?;
        if self.payment_submitted {
            self.events.push(VaultEvent::PaymentRefunded {
                winner,
                amount: price,
            });
        }
        self.events.push(VaultEvent::FallbackActivated {
            second_bidder,
            amount: second_amount,
            at: now,
        });
        info!(
            vault = %self.config.vault_id,
            %second_bidder,
            amount = %second_amount,
            "buyer default: fallback activated"
        );
        Ok(())
    }

    /// Return the creator bond to the buyer after normal delivery.
    /// Buyer-only, once.
    pub fn release_creator_bond(
        &mut self,
        _now: Timestamp,
        caller: ParticipantId,
    ) -> Result<(), AuctionError> {
        if caller != self.config.buyer {
            return Err(AccessDenied::NotBuyer.into());
        }
        if !self.delivered {
            return Err(StateViolation::NotDelivered.into());
        }
        if self.bond_state != BondState::Posted {
            return Err(StateViolation::BondAlreadyResolved.into());
        }

        self.bond_state = BondState::Released;
        self.events.push(VaultEvent::CreatorBondReleased {
            amount: self.config.creator_bond,
        });
        info!(vault = %self.config.vault_id, "creator bond released");
        Ok(())
    }

    /// Forfeit the creator bond for misconduct established out-of-band.
    /// Platform-admin-only, once. Half goes to the designated victim
    /// (odd unit included), half to the burn sink.
    pub fn slash_creator_bond(
        &mut self,
        caller: ParticipantId,
        beneficiary: ParticipantId,
    ) -> Result<(), AuctionError> {
        if caller != self.config.platform_admin {
            return Err(AccessDenied::NotAdmin.into());
        }
        if self.bond_state != BondState::Posted {
            return Err(StateViolation::BondAlreadyResolved.into());
        }

        let bond = self.config.creator_bond;
        let burned = TokenAmount::new(bond.raw() / 2);
        let beneficiary_share = bond.checked_sub(burned)?;

        self.bond_state = BondState::Slashed;
        self.events.push(VaultEvent::CreatorBondSlashed {
            beneficiary,
            beneficiary_share,
            burned,
        });
        info!(
            vault = %self.config.vault_id,
            %beneficiary,
            share = %beneficiary_share,
            %burned,
            "creator bond slashed"
        );
        Ok(())
    }

    /// The award currently in effect: the second bidder after a buyer
    /// default, otherwise the settlement winner.
    pub fn effective_award(&self) -> Option<(ParticipantId, TokenAmount)> {
        if self.fallback_activated {
            Some((self.second_bidder?, self.second_bid_amount?))
        } else {
            Some((self.winner?, self.winning_price?))
        }
    }

    fn require_settled_winner(&self) -> Result<(ParticipantId, TokenAmount), AuctionError> {
        self.require_phase(Phase::Settled)?;
        match (self.winner, self.winning_price) {
            (Some(winner), Some(price)) => Ok((winner, price)),
            _ => Err(StateViolation::NoWinner.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bid::DepositState;
    use crate::testkit::*;

    fn pay_time() -> Timestamp {
        t("2026-03-01T15:00:00Z")
    }

    fn after_settlement_deadline() -> Timestamp {
        t("2026-03-02T14:00:02Z")
    }

    /// Settled vault: suppliers 0/1/2 revealed 100/95/98, so supplier 1
    /// won at 95 with supplier 2 recorded as fallback.
    fn settled_bed() -> TestBed {
        let mut bed = TestBed::new(3);
        let s0 = bed.commit(0, 100);
        let s1 = bed.commit(1, 95);
        let s2 = bed.commit(2, 98);
        bed.trigger();
        bed.reveal(0, 100, &s0);
        bed.reveal(1, 95, &s1);
        bed.reveal(2, 98, &s2);
        bed.settle();
        bed
    }

    fn winner(bed: &TestBed) -> ParticipantId {
        bed.vault.winner().unwrap()
    }

    fn pay(bed: &mut TestBed) {
        let w = winner(bed);
        bed.vault
            .submit_payment(pay_time(), w, TokenAmount::new(95))
            .unwrap();
    }

    // ── Payment ──────────────────────────────────────────────────────

    #[test]
    fn test_payment_roundtrip() {
        let mut bed = settled_bed();
        pay(&mut bed);
        assert!(bed.vault.payment_submitted());
        assert!(bed.vault.events().iter().any(|e| matches!(
            e,
            VaultEvent::PaymentSubmitted { amount, .. } if *amount == TokenAmount::new(95)
        )));
    }

    #[test]
    fn test_payment_only_from_winner() {
        let mut bed = settled_bed();
        let loser = bed.suppliers[0].id;
        let err = bed
            .vault
            .submit_payment(pay_time(), loser, TokenAmount::new(95))
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::AccessDenied(AccessDenied::NotWinner)
        ));
    }

    #[test]
    fn test_payment_must_match_winning_price() {
        let mut bed = settled_bed();
        let w = winner(&bed);
        let err = bed
            .vault
            .submit_payment(pay_time(), w, TokenAmount::new(94))
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::InvalidInput(InvalidInput::WrongPaymentAmount {
                expected: 95,
                got: 94
            })
        ));
    }

    #[test]
    fn test_payment_is_one_shot() {
        let mut bed = settled_bed();
        pay(&mut bed);
        let w = winner(&bed);
        let err = bed
            .vault
            .submit_payment(pay_time(), w, TokenAmount::new(95))
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::PaymentAlreadySubmitted)
        ));
    }

    #[test]
    fn test_payment_after_settlement_deadline_rejected() {
        let mut bed = settled_bed();
        let w = winner(&bed);
        let err = bed
            .vault
            .submit_payment(after_settlement_deadline(), w, TokenAmount::new(95))
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::TimingViolation(TimingViolation::SettlementWindowClosed)
        ));
    }

    #[test]
    fn test_payment_requires_a_winner() {
        let mut bed = TestBed::new(1);
        bed.commit(0, 95);
        bed.trigger();
        bed.settle();
        let supplier = bed.suppliers[0].id;
        let err = bed
            .vault
            .submit_payment(pay_time(), supplier, TokenAmount::new(95))
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::NoWinner)
        ));
    }

    // ── Delivery confirmation ────────────────────────────────────────

    #[test]
    fn test_confirm_delivery_releases_winner_collateral() {
        let mut bed = settled_bed();
        pay(&mut bed);
        let oracle = bed.oracle;
        bed.vault
            .confirm_delivery(t("2026-03-01T16:00:00Z"), oracle)
            .unwrap();

        assert!(bed.vault.delivered());
        let w = winner(&bed);
        assert_eq!(bed.vault.bid(&w).unwrap().deposit, DepositState::Returned);
        // All three deposits are now back with their suppliers.
        assert_eq!(bed.vault.ledger().held(), TokenAmount::ZERO);
        assert_eq!(
            bed.vault.ledger().returned,
            TokenAmount::new(3 * DEPOSIT)
        );
    }

    #[test]
    fn test_confirm_delivery_is_oracle_only() {
        let mut bed = settled_bed();
        pay(&mut bed);
        let buyer = bed.buyer;
        let err = bed
            .vault
            .confirm_delivery(t("2026-03-01T16:00:00Z"), buyer)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::AccessDenied(AccessDenied::NotOracle)
        ));
    }

    #[test]
    fn test_confirm_delivery_requires_payment_first() {
        let mut bed = settled_bed();
        let oracle = bed.oracle;
        let err = bed
            .vault
            .confirm_delivery(t("2026-03-01T16:00:00Z"), oracle)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::PaymentNotSubmitted)
        ));
    }

    #[test]
    fn test_confirm_delivery_is_one_shot() {
        let mut bed = settled_bed();
        pay(&mut bed);
        let oracle = bed.oracle;
        bed.vault
            .confirm_delivery(t("2026-03-01T16:00:00Z"), oracle)
            .unwrap();
        let err = bed
            .vault
            .confirm_delivery(t("2026-03-01T16:05:00Z"), oracle)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::AlreadyDelivered)
        ));
    }

    // ── Oracle timeout ───────────────────────────────────────────────

    #[test]
    fn test_oracle_timeout_needs_full_window() {
        let mut bed = settled_bed();
        pay(&mut bed);
        let w = winner(&bed);
        // Exactly at paid_at + timeout: not yet eligible.
        let err = bed
            .vault
            .claim_oracle_timeout(t("2026-03-01T16:00:00Z"), w)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::TimingViolation(TimingViolation::OracleTimeoutNotElapsed)
        ));
    }

    #[test]
    fn test_oracle_timeout_acts_as_confirmation() {
        let mut bed = settled_bed();
        pay(&mut bed);
        let w = winner(&bed);
        bed.vault
            .claim_oracle_timeout(t("2026-03-01T16:00:01Z"), w)
            .unwrap();
        assert!(bed.vault.delivered());
        assert_eq!(bed.vault.bid(&w).unwrap().deposit, DepositState::Returned);
        assert!(bed
            .vault
            .events()
            .iter()
            .any(|e| matches!(e, VaultEvent::OracleTimeoutClaimed { .. })));
    }

    #[test]
    fn test_oracle_timeout_is_winner_only() {
        let mut bed = settled_bed();
        pay(&mut bed);
        let buyer = bed.buyer;
        let err = bed
            .vault
            .claim_oracle_timeout(t("2026-03-01T17:00:00Z"), buyer)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::AccessDenied(AccessDenied::NotWinner)
        ));
    }

    #[test]
    fn test_dispute_blocks_oracle_timeout() {
        let mut bed = settled_bed();
        pay(&mut bed);
        let w = winner(&bed);
        bed.vault
            .dispute_delivery(t("2026-03-01T15:30:00Z"), w)
            .unwrap();
        let err = bed
            .vault
            .claim_oracle_timeout(t("2026-03-01T17:00:00Z"), w)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::AlreadyDisputed)
        ));
    }

    // ── Dispute ──────────────────────────────────────────────────────

    #[test]
    fn test_dispute_is_one_shot_trigger() {
        let mut bed = settled_bed();
        pay(&mut bed);
        let w = winner(&bed);
        bed.vault
            .dispute_delivery(t("2026-03-01T15:30:00Z"), w)
            .unwrap();
        assert!(bed.vault.delivery_disputed());

        let err = bed
            .vault
            .dispute_delivery(t("2026-03-01T15:31:00Z"), w)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::AlreadyDisputed)
        ));
    }

    #[test]
    fn test_dispute_requires_payment() {
        let mut bed = settled_bed();
        let w = winner(&bed);
        let err = bed
            .vault
            .dispute_delivery(t("2026-03-01T15:30:00Z"), w)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::PaymentNotSubmitted)
        ));
    }

    // ── Buyer default / fallback ─────────────────────────────────────

    #[test]
    fn test_buyer_default_before_deadline_rejected() {
        let mut bed = settled_bed();
        let caller = bed.suppliers[2].id;
        let err = bed
            .vault
            .claim_buyer_default(t("2026-03-02T14:00:01Z"), caller)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::TimingViolation(TimingViolation::SettlementWindowOpen)
        ));
    }

    #[test]
    fn test_buyer_default_activates_fallback() {
        let mut bed = settled_bed();
        let caller = bed.suppliers[2].id;
        bed.vault
            .claim_buyer_default(after_settlement_deadline(), caller)
            .unwrap();

        assert!(bed.vault.fallback_activated());
        // The winner field is never reassigned; the effective award moves.
        assert_eq!(bed.vault.winner(), Some(bed.suppliers[1].id));
        assert_eq!(
            bed.vault.effective_award(),
            Some((bed.suppliers[2].id, TokenAmount::new(98)))
        );
        // Winner's collateral comes back: it is not the defaulting party.
        assert_eq!(
            bed.vault.bid(&bed.suppliers[1].id).unwrap().deposit,
            DepositState::Returned
        );
        assert!(bed.vault.events().iter().any(|e| matches!(
            e,
            VaultEvent::FallbackActivated { amount, .. } if *amount == TokenAmount::new(98)
        )));
    }

    #[test]
    fn test_buyer_default_is_caller_independent() {
        let mut by_supplier = settled_bed();
        let supplier = by_supplier.suppliers[0].id;
        by_supplier
            .vault
            .claim_buyer_default(after_settlement_deadline(), supplier)
            .unwrap();

        let mut by_stranger = settled_bed();
        let stranger = ParticipantId::new();
        by_stranger
            .vault
            .claim_buyer_default(after_settlement_deadline(), stranger)
            .unwrap();

        assert_eq!(
            by_supplier.vault.effective_award().map(|(_, amount)| amount),
            by_stranger.vault.effective_award().map(|(_, amount)| amount)
        );
        assert!(by_supplier.vault.fallback_activated());
        assert!(by_stranger.vault.fallback_activated());
    }

    #[test]
    fn test_buyer_default_refunds_submitted_payment() {
        let mut bed = settled_bed();
        pay(&mut bed);
        let caller = ParticipantId::new();
        bed.vault
            .claim_buyer_default(after_settlement_deadline(), caller)
            .unwrap();
        assert!(bed.vault.events().iter().any(|e| matches!(
            e,
            VaultEvent::PaymentRefunded { amount, .. } if *amount == TokenAmount::new(95)
        )));
    }

    #[test]
    fn test_buyer_default_without_second_bidder_is_terminal() {
        let mut bed = TestBed::new(1);
        let secret = bed.commit(0, 95);
        bed.trigger();
        bed.reveal(0, 95, &secret);
        bed.settle();

        let caller = ParticipantId::new();
        let err = bed
            .vault
            .claim_buyer_default(after_settlement_deadline(), caller)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::FallbackUnavailable)
        ));
    }

    #[test]
    fn test_buyer_default_is_one_shot() {
        let mut bed = settled_bed();
        let caller = ParticipantId::new();
        bed.vault
            .claim_buyer_default(after_settlement_deadline(), caller)
            .unwrap();
        let err = bed
            .vault
            .claim_buyer_default(after_settlement_deadline(), caller)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::FallbackAlreadyActivated)
        ));
    }

    #[test]
    fn test_delivery_blocks_buyer_default() {
        let mut bed = settled_bed();
        pay(&mut bed);
        let oracle = bed.oracle;
        bed.vault
            .confirm_delivery(t("2026-03-01T16:00:00Z"), oracle)
            .unwrap();
        let caller = ParticipantId::new();
        let err = bed
            .vault
            .claim_buyer_default(after_settlement_deadline(), caller)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::AlreadyDelivered)
        ));
    }

    // ── Creator bond ─────────────────────────────────────────────────

    fn delivered_bed() -> TestBed {
        let mut bed = settled_bed();
        pay(&mut bed);
        let oracle = bed.oracle;
        bed.vault
            .confirm_delivery(t("2026-03-01T16:00:00Z"), oracle)
            .unwrap();
        bed
    }

    #[test]
    fn test_bond_release_after_delivery() {
        let mut bed = delivered_bed();
        let buyer = bed.buyer;
        bed.vault
            .release_creator_bond(t("2026-03-01T17:00:00Z"), buyer)
            .unwrap();
        assert_eq!(bed.vault.bond_state(), BondState::Released);
        assert!(bed.vault.events().iter().any(|e| matches!(
            e,
            VaultEvent::CreatorBondReleased { amount } if *amount == TokenAmount::new(CREATOR_BOND)
        )));
    }

    #[test]
    fn test_bond_release_requires_delivery() {
        let mut bed = settled_bed();
        let buyer = bed.buyer;
        let err = bed
            .vault
            .release_creator_bond(t("2026-03-01T17:00:00Z"), buyer)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::NotDelivered)
        ));
    }

    #[test]
    fn test_bond_release_is_buyer_only() {
        let mut bed = delivered_bed();
        let w = winner(&bed);
        let err = bed
            .vault
            .release_creator_bond(t("2026-03-01T17:00:00Z"), w)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::AccessDenied(AccessDenied::NotBuyer)
        ));
    }

    #[test]
    fn test_bond_slash_splits_evenly() {
        let mut bed = settled_bed();
        let admin = bed.admin;
        let victim = bed.suppliers[0].id;
        bed.vault.slash_creator_bond(admin, victim).unwrap();

        assert_eq!(bed.vault.bond_state(), BondState::Slashed);
        assert!(bed.vault.events().iter().any(|e| matches!(
            e,
            VaultEvent::CreatorBondSlashed {
                beneficiary,
                beneficiary_share,
                burned,
            } if *beneficiary == victim
                && *beneficiary_share == TokenAmount::new(250)
                && *burned == TokenAmount::new(250)
        )));
    }

    #[test]
    fn test_bond_slash_odd_unit_goes_to_beneficiary() {
        let mut bed = TestBed::with_config(1, |config| {
            config.creator_bond = TokenAmount::new(501);
        });
        let admin = bed.admin;
        let victim = ParticipantId::new();
        bed.vault.slash_creator_bond(admin, victim).unwrap();
        assert!(bed.vault.events().iter().any(|e| matches!(
            e,
            VaultEvent::CreatorBondSlashed {
                beneficiary_share,
                burned,
                ..
            } if *beneficiary_share == TokenAmount::new(251)
                && *burned == TokenAmount::new(250)
        )));
    }

    #[test]
    fn test_bond_slash_is_admin_only() {
        let mut bed = settled_bed();
        let buyer = bed.buyer;
        let victim = bed.suppliers[0].id;
        let err = bed.vault.slash_creator_bond(buyer, victim).unwrap_err();
        assert!(matches!(
            err,
            AuctionError::AccessDenied(AccessDenied::NotAdmin)
        ));
    }

    #[test]
    fn test_bond_resolves_exactly_once() {
        let mut bed = delivered_bed();
        let buyer = bed.buyer;
        let admin = bed.admin;
        bed.vault
            .release_creator_bond(t("2026-03-01T17:00:00Z"), buyer)
            .unwrap();

        let err = bed
            .vault
            .release_creator_bond(t("2026-03-01T17:01:00Z"), buyer)
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::BondAlreadyResolved)
        ));
        let err = bed
            .vault
            .slash_creator_bond(admin, ParticipantId::new())
            .unwrap_err();
        assert!(matches!(
            err,
            AuctionError::StateViolation(StateViolation::BondAlreadyResolved)
        ));
    }
}
