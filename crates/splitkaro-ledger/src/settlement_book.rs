//! Settlement record lifecycle.
//!
//! ```text
//! computed settlements ──sync──▶ unsettled records ──mark_settled──▶ settled
//!          ▲                                                          │
//!          └──────────── invalidate (expenses changed) ◀──────────────┘
//! ```
//!
//! Records are recreated only when needed: if the collection has not been
//! invalidated and the stored records describe exactly the freshly computed
//! plan (same plan root), `sync` keeps them along with their settled flags.
//! Confirming a record twice is rejected, so a payment is never recorded as
//! made more than once.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use splitkaro_engine::{compute_plan_root, plan_root_hex};
use splitkaro_types::{
    CollectionId, Result, Settlement, SettlementRecord, SettlementRecordId, SplitError,
};

use crate::storage::Storage;

/// Tracks which collections' stored records are out of date.
#[derive(Debug, Clone, Default)]
pub struct SettlementBook {
    /// Collections whose expenses changed since their records were written.
    stale: HashSet<CollectionId>,
}

impl SettlementBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a collection's records as out of date. The next [`Self::sync`]
    /// recreates them even if the plan is unchanged.
    pub fn invalidate(&mut self, collection: CollectionId) {
        self.stale.insert(collection);
    }

    #[must_use]
    pub fn is_stale(&self, collection: CollectionId) -> bool {
        self.stale.contains(&collection)
    }

    /// Forget everything about a deleted collection.
    pub fn forget(&mut self, collection: CollectionId) {
        self.stale.remove(&collection);
    }

    /// Bring the stored records of `collection` in line with `settlements`.
    ///
    /// Returns the records now in storage, in storage order.
    pub fn sync<S: Storage + ?Sized>(
        &mut self,
        storage: &mut S,
        collection: CollectionId,
        settlements: &[Settlement],
        now: DateTime<Utc>,
    ) -> Result<Vec<SettlementRecord>> {
        let existing = storage.settlement_records_by_collection(collection);
        let stored: Vec<Settlement> = existing.iter().map(SettlementRecord::settlement).collect();
        let fresh_root = compute_plan_root(settlements);

        if !self.is_stale(collection) && compute_plan_root(&stored) == fresh_root {
            tracing::debug!(
                collection = %collection,
                records = existing.len(),
                "Settlement records up to date"
            );
            return Ok(existing);
        }

        let removed = storage.delete_settlement_records_by_collection(collection);
        let records = settlements
            .iter()
            .map(|s| {
                storage.insert_settlement_record(SettlementRecord::from_settlement(
                    collection, s, now,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        self.stale.remove(&collection);

        tracing::info!(
            collection = %collection,
            removed,
            created = records.len(),
            plan_root = plan_root_hex(&fresh_root),
            "Settlement records recreated"
        );
        Ok(records)
    }

    /// Confirm that a suggested payment has been made.
    ///
    /// # Errors
    /// - [`SplitError::SettlementNotFound`] for an unknown record
    /// - [`SplitError::AlreadySettled`] if it was confirmed before
    pub fn mark_settled<S: Storage + ?Sized>(
        &self,
        storage: &mut S,
        record_id: SettlementRecordId,
        at: DateTime<Utc>,
    ) -> Result<SettlementRecord> {
        let mut record = storage
            .get_settlement_record(record_id)
            .ok_or(SplitError::SettlementNotFound(record_id))?;
        record.mark_settled(at)?;
        storage.update_settlement_record(record.clone())?;

        tracing::info!(
            record = %record.id,
            collection = %record.collection_id,
            from = %record.from,
            to = %record.to,
            amount = %record.amount,
            "Settlement confirmed"
        );
        Ok(record)
    }

    /// Records of `collection` not yet confirmed, in storage order.
    pub fn outstanding<S: Storage + ?Sized>(
        &self,
        storage: &S,
        collection: CollectionId,
    ) -> Vec<SettlementRecord> {
        storage
            .settlement_records_by_collection(collection)
            .into_iter()
            .filter(|r| !r.is_settled)
            .collect()
    }
}
