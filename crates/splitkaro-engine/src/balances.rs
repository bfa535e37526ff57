//! Balance netting: expenses → per-member paid / owed / net totals.
//!
//! ```text
//! total_paid(m) = Σ e.amount             where e.paid_by == m
//! total_owed(m) = Σ e.per_person_amount  where m ∈ e.split_among
//! net(m)        = total_paid(m) - total_owed(m)
//! ```
//!
//! Sums are exact `Decimal` arithmetic; nothing is rounded here. A total
//! that leaves the decimal range fails with `AmountOverflow`.

use rust_decimal::Decimal;
use splitkaro_types::{
    Expense, Member, MemberBalance, Result, SplitError, UnknownMemberPolicy, checked_total,
};

use crate::validation::{MemberIndex, validate_expenses};

/// Output of [`compute_balances`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSheet {
    /// One entry per input member, in input order.
    pub balances: Vec<MemberBalance>,
    /// Number of payer / participant contributions that referenced an
    /// unknown member and were skipped. Always zero under `Reject`.
    pub skipped_contributions: usize,
}

impl BalanceSheet {
    /// Whether every contribution was attributed to some member, so the
    /// zero-sum invariant must hold.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped_contributions == 0
    }

    /// Σ net balances, or `None` if a partial sum overflows.
    #[must_use]
    pub fn net_total(&self) -> Option<Decimal> {
        checked_total(self.balances.iter().map(|b| b.net_balance))
    }
}

/// Compute per-member balances for one collection.
///
/// Returns one [`MemberBalance`] per entry in `members`, preserving order.
/// An empty member list yields an empty sheet without looking at
/// `expenses`.
///
/// # Errors
/// Any validation error from [`validate_expenses`] or
/// [`MemberIndex::build`], and [`SplitError::AmountOverflow`] if a member's
/// paid or owed total leaves the decimal range.
pub fn compute_balances(
    expenses: &[Expense],
    members: &[Member],
    policy: UnknownMemberPolicy,
) -> Result<BalanceSheet> {
    if members.is_empty() {
        return Ok(BalanceSheet {
            balances: Vec::new(),
            skipped_contributions: 0,
        });
    }

    let index = MemberIndex::build(members)?;
    validate_expenses(expenses, &index, policy)?;

    let mut paid = vec![Decimal::ZERO; members.len()];
    let mut owed = vec![Decimal::ZERO; members.len()];
    let mut skipped = 0usize;

    for expense in expenses {
        match index.position(expense.paid_by) {
            Some(pos) => paid[pos] = accumulate(paid[pos], expense.amount, expense, "paid")?,
            None => {
                tracing::warn!(
                    expense = %expense.id,
                    member = %expense.paid_by,
                    amount = %expense.amount,
                    "Skipping payment by unknown member"
                );
                skipped += 1;
            }
        }

        let share = expense.per_person_amount();
        for member in &expense.split_among {
            match index.position(*member) {
                Some(pos) => owed[pos] = accumulate(owed[pos], share, expense, "owed")?,
                None => {
                    tracing::warn!(
                        expense = %expense.id,
                        member = %member,
                        share = %share,
                        "Skipping share owed by unknown member"
                    );
                    skipped += 1;
                }
            }
        }
    }

    let balances = members
        .iter()
        .zip(paid.into_iter().zip(owed))
        .map(|(member, (total_paid, total_owed))| {
            MemberBalance::from_totals(member.id, total_paid, total_owed)
        })
        .collect();

    Ok(BalanceSheet {
        balances,
        skipped_contributions: skipped,
    })
}

fn accumulate(total: Decimal, amount: Decimal, expense: &Expense, kind: &str) -> Result<Decimal> {
    total.checked_add(amount).ok_or_else(|| {
        SplitError::AmountOverflow(format!(
            "{kind} total exceeds the decimal range at {}",
            expense.id
        ))
    })
}
