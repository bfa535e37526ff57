//! Per-member balance summary derived from a collection's expenses.
//!
//! `net_balance` is positive when the member is owed money and negative
//! when the member owes money.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::MemberId;

/// Derived (never persisted) balance for one member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberBalance {
    pub member_id: MemberId,
    /// Sum of amounts this member paid.
    pub total_paid: Decimal,
    /// Sum of per-person shares this member owes.
    pub total_owed: Decimal,
    /// `total_paid - total_owed`.
    pub net_balance: Decimal,
}

impl MemberBalance {
    /// A zero balance.
    #[must_use]
    pub fn new(member_id: MemberId) -> Self {
        Self {
            member_id,
            total_paid: Decimal::ZERO,
            total_owed: Decimal::ZERO,
            net_balance: Decimal::ZERO,
        }
    }

    /// Build from totals; the net balance is derived.
    #[must_use]
    pub fn from_totals(member_id: MemberId, total_paid: Decimal, total_owed: Decimal) -> Self {
        Self {
            member_id,
            total_paid,
            total_owed,
            net_balance: total_paid - total_owed,
        }
    }

    /// Owed more than `tolerance`.
    #[must_use]
    pub fn is_creditor(&self, tolerance: Decimal) -> bool {
        self.net_balance > tolerance
    }

    /// Owes more than `tolerance`.
    #[must_use]
    pub fn is_debtor(&self, tolerance: Decimal) -> bool {
        self.net_balance < -tolerance
    }

    /// Within `tolerance` of zero.
    #[must_use]
    pub fn is_settled(&self, tolerance: Decimal) -> bool {
        !self.is_creditor(tolerance) && !self.is_debtor(tolerance)
    }
}
