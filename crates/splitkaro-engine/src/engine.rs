//! The settlement engine: balances and settlements for one collection.
//!
//! ```text
//! compute_balances(expenses, members)    -> Vec<MemberBalance>
//! compute_settlements(expenses, members) -> Vec<Settlement>
//! summarize(expenses, members)           -> SettlementPlan
//! ```
//!
//! The engine holds nothing but its configuration. Every call is
//! independent, side-effect free, and safe to run concurrently.

use rust_decimal::Decimal;
use splitkaro_types::{
    EngineConfig, Expense, Member, MemberBalance, Result, Settlement, SplitError, checked_total,
    constants, format_amount_with_scale,
};

use crate::balances::{BalanceSheet, compute_balances};
use crate::conservation::{verify_settlements_clear, verify_zero_sum};
use crate::determinism::{compute_plan_root, plan_root_hex};
use crate::simplify::simplify_debts;

/// Everything a caller displays for a collection, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPlan {
    /// Per-member balances, in member input order.
    pub balances: Vec<MemberBalance>,
    /// Payments that clear all balances.
    pub settlements: Vec<Settlement>,
    /// Σ amount over all expenses.
    pub total_spent: Decimal,
    /// SHA-256 over `settlements` (see [`compute_plan_root`]).
    pub plan_root: [u8; 32],
}

impl SettlementPlan {
    /// Whether nobody owes anybody anything.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settlements.is_empty()
    }
}

/// Pure, deterministic settlement engine.
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    config: EngineConfig,
}

impl SettlementEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            tolerance = %config.tolerance,
            unknown_members = ?config.unknown_members,
            "Settlement engine configured"
        );
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render `amount` at the configured currency scale.
    #[must_use]
    pub fn format_amount(&self, amount: Decimal) -> String {
        format_amount_with_scale(amount, self.config.currency_scale)
    }

    /// Per-member paid / owed / net totals, in `members` order.
    ///
    /// # Errors
    /// - `DuplicateMember` if `members` repeats an ID
    /// - `InvalidExpense` for a non-positive amount or bad split set
    /// - `UnknownMember` under [`UnknownMemberPolicy::Reject`](splitkaro_types::UnknownMemberPolicy::Reject)
    /// - `AmountOverflow` if a total leaves the decimal range
    /// - `BalanceInvariantViolation` if the result does not sum to zero
    pub fn compute_balances(
        &self,
        expenses: &[Expense],
        members: &[Member],
    ) -> Result<Vec<MemberBalance>> {
        Ok(self.balance_sheet(expenses, members)?.balances)
    }

    /// The minimal-ish list of payments that settles every balance.
    ///
    /// # Errors
    /// Everything [`Self::compute_balances`] returns, plus
    /// `SettlementInvariantViolation` if the payments do not clear the
    /// balances.
    pub fn compute_settlements(
        &self,
        expenses: &[Expense],
        members: &[Member],
    ) -> Result<Vec<Settlement>> {
        let sheet = self.balance_sheet(expenses, members)?;
        self.settle(&sheet)
    }

    /// Balances, settlements, total spent and plan root together.
    pub fn summarize(&self, expenses: &[Expense], members: &[Member]) -> Result<SettlementPlan> {
        let sheet = self.balance_sheet(expenses, members)?;
        let settlements = self.settle(&sheet)?;
        let plan_root = compute_plan_root(&settlements);
        let total_spent = checked_total(expenses.iter().map(|e| e.amount)).ok_or_else(|| {
            SplitError::AmountOverflow(format!(
                "total spent over {} expenses exceeds the decimal range",
                expenses.len()
            ))
        })?;

        tracing::info!(
            members = members.len(),
            expenses = expenses.len(),
            total_spent = %self.format_amount(total_spent),
            settlements = settlements.len(),
            plan_root = plan_root_hex(&plan_root),
            "Settlement plan computed"
        );

        Ok(SettlementPlan {
            balances: sheet.balances,
            settlements,
            total_spent,
            plan_root,
        })
    }

    fn balance_sheet(&self, expenses: &[Expense], members: &[Member]) -> Result<BalanceSheet> {
        let sheet = compute_balances(expenses, members, self.config.unknown_members)?;
        if sheet.is_complete() {
            verify_zero_sum(&sheet.balances)?;
        } else {
            tracing::warn!(
                skipped = sheet.skipped_contributions,
                net_total = ?sheet.net_total(),
                "Balances exclude contributions from unknown members"
            );
        }
        Ok(sheet)
    }

    fn settle(&self, sheet: &BalanceSheet) -> Result<Vec<Settlement>> {
        let settlements = simplify_debts(&sheet.balances, self.config.tolerance);

        // Sub-ε debtors never pay, so one creditor can keep the sum of
        // their balances: residue per member is bounded by ε × members.
        if sheet.is_complete() {
            let bound = self
                .config
                .tolerance
                .checked_mul(Decimal::from(sheet.balances.len().max(1)))
                .unwrap_or(Decimal::MAX);
            verify_settlements_clear(&sheet.balances, &settlements, bound)?;
        }

        tracing::debug!(
            creditors = sheet
                .balances
                .iter()
                .filter(|b| b.is_creditor(self.config.tolerance))
                .count(),
            debtors = sheet
                .balances
                .iter()
                .filter(|b| b.is_debtor(self.config.tolerance))
                .count(),
            settlements = settlements.len(),
            "Debts simplified"
        );
        Ok(settlements)
    }
}
