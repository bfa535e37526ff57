//! Greedy debt simplification (min-cash-flow heuristic).
//!
//! ## Algorithm
//!
//! 1. Members with `net > ε` are creditors, `net < -ε` are debtors; the
//!    rest are settled and take no part.
//! 2. Pick the debtor with the largest outstanding debt and the creditor
//!    with the largest outstanding credit.
//! 3. `payment = min(debt, credit)`; emit `debtor -> creditor: payment`.
//! 4. Reduce both; retire any party whose remainder fell below ε.
//! 5. Repeat until either side is empty.
//!
//! Ties on magnitude go to the party that appears first in the balance
//! list, i.e. the caller's member order. Every step retires at least one
//! party, so at most `#creditors + #debtors - 1` payments are emitted.
//!
//! A negative tolerance is treated as zero. A party paid down to exactly
//! zero always retires, whatever the tolerance.

use rust_decimal::Decimal;
use splitkaro_types::{MemberBalance, MemberId, Settlement};

/// A creditor or debtor still taking part in the walk.
#[derive(Debug, Clone, Copy)]
struct Party {
    member: MemberId,
    /// Outstanding magnitude. Always positive and `>= tolerance` while the
    /// party is listed.
    remaining: Decimal,
}

impl Party {
    fn is_retired(&self, tolerance: Decimal) -> bool {
        self.remaining <= Decimal::ZERO || self.remaining < tolerance
    }
}

/// Produce the settlement list for a set of balances.
///
/// Pure and deterministic: the same balances in the same order always
/// yield the same payments in the same order. Every emitted amount is
/// strictly positive.
#[must_use]
pub fn simplify_debts(balances: &[MemberBalance], tolerance: Decimal) -> Vec<Settlement> {
    let tolerance = tolerance.max(Decimal::ZERO);
    let mut creditors: Vec<Party> = balances
        .iter()
        .filter(|b| b.is_creditor(tolerance))
        .map(|b| Party {
            member: b.member_id,
            remaining: b.net_balance,
        })
        .collect();

    let mut debtors: Vec<Party> = balances
        .iter()
        .filter(|b| b.is_debtor(tolerance))
        .map(|b| Party {
            member: b.member_id,
            remaining: -b.net_balance,
        })
        .collect();

    let mut settlements = Vec::with_capacity((creditors.len() + debtors.len()).saturating_sub(1));

    while let (Some(d), Some(c)) = (largest(&debtors), largest(&creditors)) {
        let payment = debtors[d].remaining.min(creditors[c].remaining);
        let settlement = Settlement::new(debtors[d].member, creditors[c].member, payment);

        tracing::debug!(
            from = %settlement.from,
            to = %settlement.to,
            amount = %settlement.amount,
            "Settlement emitted"
        );
        settlements.push(settlement);

        debtors[d].remaining -= payment;
        creditors[c].remaining -= payment;

        // `Vec::remove` keeps the survivors in input order for the tie-break.
        if debtors[d].is_retired(tolerance) {
            debtors.remove(d);
        }
        if creditors[c].is_retired(tolerance) {
            creditors.remove(c);
        }
    }

    settlements
}

/// Index of the party with the largest remainder; the earliest wins ties.
fn largest(parties: &[Party]) -> Option<usize> {
    parties
        .iter()
        .enumerate()
        .reduce(|best, cur| if cur.1.remaining > best.1.remaining { cur } else { best })
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tol() -> Decimal {
        Decimal::new(1, 2)
    }

    fn bal(id: i64, net: i64) -> MemberBalance {
        let net = Decimal::new(net, 0);
        if net >= Decimal::ZERO {
            MemberBalance::from_totals(MemberId(id), net, Decimal::ZERO)
        } else {
            MemberBalance::from_totals(MemberId(id), Decimal::ZERO, -net)
        }
    }

    fn pay(from: i64, to: i64, amount: i64) -> Settlement {
        Settlement::new(MemberId(from), MemberId(to), Decimal::new(amount, 0))
    }

    #[test]
    fn empty_balances_no_settlements() {
        assert!(simplify_debts(&[], tol()).is_empty());
    }

    #[test]
    fn all_settled_no_settlements() {
        let balances = vec![bal(1, 0), bal(2, 0)];
        assert!(simplify_debts(&balances, tol()).is_empty());
    }

    #[test]
    fn sub_tolerance_noise_ignored() {
        let balances = vec![
            MemberBalance::from_totals(MemberId(1), Decimal::new(5, 3), Decimal::ZERO),
            MemberBalance::from_totals(MemberId(2), Decimal::ZERO, Decimal::new(5, 3)),
        ];
        assert!(simplify_debts(&balances, tol()).is_empty());
    }

    #[test]
    fn one_creditor_two_equal_debtors_input_order() {
        let balances = vec![bal(1, 60), bal(2, -30), bal(3, -30)];
        let out = simplify_debts(&balances, tol());
        assert_eq!(out, vec![pay(2, 1, 30), pay(3, 1, 30)]);

        // Reordering the input flips the tie-break.
        let balances = vec![bal(1, 60), bal(3, -30), bal(2, -30)];
        let out = simplify_debts(&balances, tol());
        assert_eq!(out, vec![pay(3, 1, 30), pay(2, 1, 30)]);
    }

    #[test]
    fn largest_debtor_pays_largest_creditor_first() {
        // A +50, B +20, C -10, D -60. After D pays A, C and D both owe 10
        // and C wins the tie by input position.
        let balances = vec![bal(1, 50), bal(2, 20), bal(3, -10), bal(4, -60)];
        let out = simplify_debts(&balances, tol());
        assert_eq!(out, vec![pay(4, 1, 50), pay(3, 2, 10), pay(4, 2, 10)]);
    }

    #[test]
    fn chain_collapses_to_single_payment() {
        // A owes B 10, B owes C 10 → nets: A -10, B 0, C +10
        let balances = vec![bal(1, -10), bal(2, 0), bal(3, 10)];
        let out = simplify_debts(&balances, tol());
        assert_eq!(out, vec![pay(1, 3, 10)]);
    }

    #[test]
    fn count_bounded_by_parties_minus_one() {
        let balances = vec![
            bal(1, 40),
            bal(2, 35),
            bal(3, 25),
            bal(4, -33),
            bal(5, -33),
            bal(6, -34),
        ];
        let out = simplify_debts(&balances, tol());
        assert!(out.len() <= 5, "got {} settlements", out.len());
        assert!(out.iter().all(|s| s.amount > Decimal::ZERO));

        let paid_to_1: Decimal = out
            .iter()
            .filter(|s| s.to == MemberId(1))
            .map(|s| s.amount)
            .sum();
        assert_eq!(paid_to_1, Decimal::new(40, 0));
        let paid_by_6: Decimal = out
            .iter()
            .filter(|s| s.from == MemberId(6))
            .map(|s| s.amount)
            .sum();
        assert_eq!(paid_by_6, Decimal::new(34, 0));
    }

    #[test]
    fn unbalanced_input_still_terminates() {
        // Only reachable when contributions were skipped upstream.
        let balances = vec![bal(1, 10), bal(2, -5)];
        let out = simplify_debts(&balances, tol());
        assert_eq!(out, vec![pay(2, 1, 5)]);
    }

    #[test]
    fn zero_tolerance_terminates_with_positive_amounts() {
        let out = simplify_debts(&[bal(1, 10), bal(2, -10)], Decimal::ZERO);
        assert_eq!(out, vec![pay(2, 1, 10)]);

        let balances = vec![bal(1, 50), bal(2, 20), bal(3, -10), bal(4, -60), bal(5, 0)];
        let out = simplify_debts(&balances, Decimal::ZERO);
        assert_eq!(out, vec![pay(4, 1, 50), pay(3, 2, 10), pay(4, 2, 10)]);
    }

    #[test]
    fn zero_tolerance_keeps_tiny_balances() {
        let balances = vec![
            MemberBalance::from_totals(MemberId(1), Decimal::new(5, 3), Decimal::ZERO),
            MemberBalance::from_totals(MemberId(2), Decimal::ZERO, Decimal::new(5, 3)),
        ];
        let out = simplify_debts(&balances, Decimal::ZERO);
        assert_eq!(
            out,
            vec![Settlement::new(MemberId(2), MemberId(1), Decimal::new(5, 3))]
        );
    }

    #[test]
    fn negative_tolerance_treated_as_zero() {
        // Settled members must not turn into zero-amount parties.
        let balances = vec![bal(1, 0), bal(2, 30), bal(3, -30), bal(4, 0)];
        let out = simplify_debts(&balances, Decimal::new(-1, 0));
        assert_eq!(out, vec![pay(3, 2, 30)]);
        assert!(out.iter().all(|s| s.amount > Decimal::ZERO));
        assert!(simplify_debts(&[bal(1, 0), bal(2, 0)], Decimal::new(-5, 2)).is_empty());
    }

    #[test]
    fn largest_prefers_earliest_on_tie() {
        let parties = [
            Party {
                member: MemberId(7),
                remaining: Decimal::new(5, 0),
            },
            Party {
                member: MemberId(8),
                remaining: Decimal::new(9, 0),
            },
            Party {
                member: MemberId(9),
                remaining: Decimal::new(9, 0),
            },
        ];
        assert_eq!(largest(&parties), Some(1));
        assert_eq!(largest(&[]), None);
    }
}
