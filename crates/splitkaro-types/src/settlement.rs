//! Settlement types: suggested payments and their persisted lifecycle.
//!
//! A [`Settlement`] is a fresh, unpersisted value produced by the engine.
//! A [`SettlementRecord`] is the storage-owned row that wraps one, adding a
//! settled flag the user flips once the payment has actually happened.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CollectionId, MemberId, Result, SettlementRecordId, SplitError, format_amount};

/// A single directed payment that reduces outstanding balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// The member who owes money.
    pub from: MemberId,
    /// The member who is owed money.
    pub to: MemberId,
    /// Amount to pay. Always strictly positive.
    pub amount: Decimal,
}

impl Settlement {
    #[must_use]
    pub fn new(from: MemberId, to: MemberId, amount: Decimal) -> Self {
        Self { from, to, amount }
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, format_amount(self.amount))
    }
}

/// A persisted settlement with its confirmation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub id: SettlementRecordId,
    pub collection_id: CollectionId,
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Decimal,
    /// Whether the payer has confirmed the payment.
    pub is_settled: bool,
    /// When the payment was confirmed.
    pub settled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl SettlementRecord {
    /// Wrap a computed settlement as a new, unsettled record.
    #[must_use]
    pub fn from_settlement(
        collection_id: CollectionId,
        settlement: &Settlement,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SettlementRecordId::UNASSIGNED,
            collection_id,
            from: settlement.from,
            to: settlement.to,
            amount: settlement.amount,
            is_settled: false,
            settled_at: None,
            created_at,
        }
    }

    /// The payment this record describes.
    #[must_use]
    pub fn settlement(&self) -> Settlement {
        Settlement::new(self.from, self.to, self.amount)
    }

    /// Flip the settled flag.
    ///
    /// # Errors
    /// Returns [`SplitError::AlreadySettled`] if the record was already
    /// confirmed; `settled_at` keeps its original value.
    pub fn mark_settled(&mut self, at: DateTime<Utc>) -> Result<()> {
        if self.is_settled {
            return Err(SplitError::AlreadySettled(self.id));
        }
        self.is_settled = true;
        self.settled_at = Some(at);
        Ok(())
    }
}
