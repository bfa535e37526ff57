//! Conservation invariants for balances and settlements.
//!
//! ```text
//! Σ net(m) == 0                                   (zero-sum)
//! ∀ m: |net(m) + paid_out(m) - received(m)| ≤ ε   (settlements clear)
//! ```
//!
//! Money only moves between members of a collection, so net balances must
//! cancel out. If either check fails the computation is rejected rather
//! than handed to the caller.

use std::collections::HashMap;

use rust_decimal::Decimal;
use splitkaro_types::{
    MemberBalance, MemberId, Result, Settlement, SplitError, checked_total, constants,
    format_amount,
};

/// Verify Σ net balances is within [`constants::ZERO_SUM_TOLERANCE`] of zero.
///
/// # Errors
/// Returns [`SplitError::BalanceInvariantViolation`] otherwise, or
/// [`SplitError::AmountOverflow`] if the running sum leaves the decimal range.
pub fn verify_zero_sum(balances: &[MemberBalance]) -> Result<()> {
    let total = checked_total(balances.iter().map(|b| b.net_balance)).ok_or_else(|| {
        SplitError::AmountOverflow(format!(
            "net balances of {} members cannot be summed",
            balances.len()
        ))
    })?;
    if total.abs() > constants::ZERO_SUM_TOLERANCE {
        return Err(SplitError::BalanceInvariantViolation {
            reason: format!(
                "net balances of {} members sum to {total}, expected 0",
                balances.len()
            ),
        });
    }
    Ok(())
}

/// Balances after every settlement has been paid, in balance order.
#[must_use]
pub fn apply_settlements(
    balances: &[MemberBalance],
    settlements: &[Settlement],
) -> Vec<(MemberId, Decimal)> {
    let mut deltas: HashMap<MemberId, Decimal> = HashMap::new();
    for s in settlements {
        *deltas.entry(s.from).or_insert(Decimal::ZERO) += s.amount;
        *deltas.entry(s.to).or_insert(Decimal::ZERO) -= s.amount;
    }
    balances
        .iter()
        .map(|b| {
            let delta = deltas.get(&b.member_id).copied().unwrap_or(Decimal::ZERO);
            (b.member_id, b.net_balance + delta)
        })
        .collect()
}

/// Verify that paying every settlement leaves each member within `bound`
/// of zero, and that no settlement is zero, negative, or a self-payment.
///
/// # Errors
/// Returns [`SplitError::SettlementInvariantViolation`] naming the first
/// offending settlement or member.
pub fn verify_settlements_clear(
    balances: &[MemberBalance],
    settlements: &[Settlement],
    bound: Decimal,
) -> Result<()> {
    if let Some(bad) = settlements
        .iter()
        .find(|s| s.amount <= Decimal::ZERO || s.from == s.to)
    {
        return Err(SplitError::SettlementInvariantViolation {
            reason: format!("malformed settlement {bad}"),
        });
    }

    for (member, residual) in apply_settlements(balances, settlements) {
        if residual.abs() > bound {
            return Err(SplitError::SettlementInvariantViolation {
                reason: format!(
                    "{member} left with {} after settlements (bound {bound})",
                    format_amount(residual)
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    fn tol() -> Decimal {
        Decimal::new(1, 2)
    }

    fn bal(id: i64, paid: i64, owed: i64) -> MemberBalance {
        MemberBalance::from_totals(MemberId(id), dec(paid), dec(owed))
    }

    #[test]
    fn empty_is_zero_sum() {
        assert!(verify_zero_sum(&[]).is_ok());
    }

    #[test]
    fn balanced_passes() {
        let balances = vec![bal(1, 90, 30), bal(2, 0, 30), bal(3, 0, 30)];
        assert!(verify_zero_sum(&balances).is_ok());
    }

    #[test]
    fn imbalanced_fails() {
        let balances = vec![bal(1, 90, 30), bal(2, 0, 30)];
        let err = verify_zero_sum(&balances).unwrap_err();
        assert!(matches!(err, SplitError::BalanceInvariantViolation { .. }));
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn zero_sum_overflow_reported() {
        let balances = vec![
            MemberBalance::from_totals(MemberId(1), Decimal::MAX, Decimal::ZERO),
            MemberBalance::from_totals(MemberId(2), Decimal::MAX, Decimal::ZERO),
        ];
        let err = verify_zero_sum(&balances).unwrap_err();
        assert!(matches!(err, SplitError::AmountOverflow(_)), "got {err:?}");
    }

    #[test]
    fn apply_moves_money_from_debtor_to_creditor() {
        let balances = vec![bal(1, 90, 30), bal(2, 0, 30), bal(3, 0, 30)];
        let settlements = vec![
            Settlement::new(MemberId(2), MemberId(1), dec(30)),
            Settlement::new(MemberId(3), MemberId(1), dec(30)),
        ];
        let after = apply_settlements(&balances, &settlements);
        assert_eq!(
            after,
            vec![
                (MemberId(1), Decimal::ZERO),
                (MemberId(2), Decimal::ZERO),
                (MemberId(3), Decimal::ZERO),
            ]
        );
        assert!(verify_settlements_clear(&balances, &settlements, tol()).is_ok());
    }

    #[test]
    fn missing_settlement_detected() {
        let balances = vec![bal(1, 90, 30), bal(2, 0, 30), bal(3, 0, 30)];
        let settlements = vec![Settlement::new(MemberId(2), MemberId(1), dec(30))];
        let err = verify_settlements_clear(&balances, &settlements, tol()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("SK_ERR_401"), "Got: {msg}");
        assert!(msg.contains("member:1"));
    }

    #[test]
    fn non_positive_settlement_detected() {
        let balances = vec![bal(1, 0, 0), bal(2, 0, 0)];
        let settlements = vec![Settlement::new(MemberId(2), MemberId(1), Decimal::ZERO)];
        assert!(verify_settlements_clear(&balances, &settlements, tol()).is_err());
    }

    #[test]
    fn self_payment_detected() {
        let balances = vec![bal(1, 0, 0)];
        let settlements = vec![Settlement::new(MemberId(1), MemberId(1), dec(5))];
        assert!(verify_settlements_clear(&balances, &settlements, tol()).is_err());
    }
}
