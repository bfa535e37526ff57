//! Expense model: a single recorded spend within a collection.
//!
//! An [`Expense`] is paid by one member and split equally among a non-empty
//! set of members. The payer does not have to be part of the split.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CollectionId, ExpenseId, MemberId, Result, SplitError};

/// One spending event within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    /// The collection that owns this expense.
    pub collection_id: CollectionId,
    /// Free-text description ("Dinner", "Cab to airport", ...).
    pub description: String,
    /// Total amount spent. Always strictly positive.
    pub amount: Decimal,
    /// The member who paid.
    pub paid_by: MemberId,
    /// Members the amount is split among. Non-empty, no duplicates.
    pub split_among: Vec<MemberId>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Build a validated expense. The ID stays unassigned until storage
    /// numbers it.
    pub fn new(
        collection_id: CollectionId,
        description: impl Into<String>,
        amount: Decimal,
        paid_by: MemberId,
        split_among: Vec<MemberId>,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let expense = Self {
            id: ExpenseId::UNASSIGNED,
            collection_id,
            description: description.into(),
            amount,
            paid_by,
            split_among,
            created_at,
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Share owed by each member of the split: `amount / |split_among|`.
    ///
    /// Not rounded. Returns zero for an (invalid) empty split.
    #[must_use]
    pub fn per_person_amount(&self) -> Decimal {
        if self.split_among.is_empty() {
            return Decimal::ZERO;
        }
        self.amount / Decimal::from(self.split_among.len())
    }

    /// Whether `member` owes a share of this expense.
    #[must_use]
    pub fn is_split_with(&self, member: MemberId) -> bool {
        self.split_among.contains(&member)
    }

    /// Whether `member` paid for or shares this expense.
    #[must_use]
    pub fn involves(&self, member: MemberId) -> bool {
        self.paid_by == member || self.is_split_with(member)
    }

    /// Check the structural invariants: positive amount, non-empty split
    /// set without duplicates.
    ///
    /// # Errors
    /// Returns [`SplitError::InvalidExpense`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(self.invalid(format!("amount must be positive, got {}", self.amount)));
        }
        if self.split_among.is_empty() {
            return Err(self.invalid("split set is empty".to_string()));
        }
        let mut seen = HashSet::with_capacity(self.split_among.len());
        for member in &self.split_among {
            if !seen.insert(*member) {
                return Err(self.invalid(format!("{member} appears twice in the split set")));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> SplitError {
        SplitError::InvalidExpense {
            expense: self.id,
            reason,
        }
    }
}

impl std::fmt::Display for Expense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Expense[{}] {:?} {} paid by {} split {} ways",
            self.id,
            self.description,
            crate::format_amount(self.amount),
            self.paid_by,
            self.split_among.len(),
        )
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Expense {
    /// An equal-split expense in collection 1 for a whole-unit amount.
    pub fn dummy_equal(id: i64, paid_by: i64, amount: i64, split_among: &[i64]) -> Self {
        Self {
            id: ExpenseId(id),
            collection_id: CollectionId(1),
            description: format!("expense #{id}"),
            amount: Decimal::new(amount, 0),
            paid_by: MemberId(paid_by),
            split_among: split_among.iter().copied().map(MemberId).collect(),
            created_at: Utc::now(),
        }
    }
}
