//! `BTreeMap`-backed [`Storage`] implementation.

use std::collections::BTreeMap;

use splitkaro_types::{
    CollectionId, Expense, ExpenseCollection, ExpenseId, Member, MemberId, Result,
    SettlementRecord, SettlementRecordId, SplitError,
};

use crate::storage::Storage;

/// In-process store with auto-increment IDs per entity kind.
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    collections: BTreeMap<CollectionId, ExpenseCollection>,
    members: BTreeMap<MemberId, Member>,
    expenses: BTreeMap<ExpenseId, Expense>,
    records: BTreeMap<SettlementRecordId, SettlementRecord>,
    next_collection: i64,
    next_member: i64,
    next_expense: i64,
    next_record: i64,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: BTreeMap::new(),
            members: BTreeMap::new(),
            expenses: BTreeMap::new(),
            records: BTreeMap::new(),
            next_collection: 1,
            next_member: 1,
            next_expense: 1,
            next_record: 1,
        }
    }

    fn require_collection(&self, id: CollectionId) -> Result<()> {
        if self.collections.contains_key(&id) {
            Ok(())
        } else {
            Err(SplitError::CollectionNotFound(id))
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the ID for an insert: the next counter value when `requested` is
/// unassigned, otherwise `requested` itself if free.
fn allocate(next: &mut i64, requested: i64, taken: bool, entity: &'static str) -> Result<i64> {
    if requested == 0 {
        let id = *next;
        *next += 1;
        return Ok(id);
    }
    if taken {
        return Err(SplitError::DuplicateId {
            entity,
            id: requested,
        });
    }
    if requested >= *next {
        *next = requested + 1;
    }
    Ok(requested)
}

impl Storage for InMemoryStorage {
    // -----------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------

    fn insert_collection(&mut self, mut collection: ExpenseCollection) -> Result<ExpenseCollection> {
        let taken = self.collections.contains_key(&collection.id);
        collection.id = CollectionId(allocate(
            &mut self.next_collection,
            collection.id.0,
            taken,
            "collection",
        )?);
        self.collections.insert(collection.id, collection.clone());
        Ok(collection)
    }

    fn get_collection(&self, id: CollectionId) -> Option<ExpenseCollection> {
        self.collections.get(&id).cloned()
    }

    fn list_collections(&self) -> Vec<ExpenseCollection> {
        self.collections.values().cloned().collect()
    }

    fn update_collection(&mut self, collection: ExpenseCollection) -> Result<()> {
        let slot = self
            .collections
            .get_mut(&collection.id)
            .ok_or(SplitError::CollectionNotFound(collection.id))?;
        *slot = collection;
        Ok(())
    }

    fn delete_collection(&mut self, id: CollectionId) -> Result<()> {
        if self.collections.remove(&id).is_none() {
            return Err(SplitError::CollectionNotFound(id));
        }
        self.members.retain(|_, m| m.collection_id != id);
        self.expenses.retain(|_, e| e.collection_id != id);
        self.records.retain(|_, r| r.collection_id != id);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Members
    // -----------------------------------------------------------------

    fn insert_member(&mut self, mut member: Member) -> Result<Member> {
        self.require_collection(member.collection_id)?;
        let taken = self.members.contains_key(&member.id);
        member.id = MemberId(allocate(&mut self.next_member, member.id.0, taken, "member")?);
        self.members.insert(member.id, member.clone());
        Ok(member)
    }

    fn get_member(&self, id: MemberId) -> Option<Member> {
        self.members.get(&id).cloned()
    }

    fn members_by_collection(&self, collection: CollectionId) -> Vec<Member> {
        self.members
            .values()
            .filter(|m| m.collection_id == collection)
            .cloned()
            .collect()
    }

    fn update_member(&mut self, member: Member) -> Result<()> {
        let slot = self
            .members
            .get_mut(&member.id)
            .ok_or(SplitError::MemberNotFound(member.id))?;
        if slot.collection_id != member.collection_id {
            return Err(SplitError::CollectionMismatch {
                expected: slot.collection_id,
                actual: member.collection_id,
            });
        }
        *slot = member;
        Ok(())
    }

    fn delete_member(&mut self, id: MemberId) -> Result<()> {
        if !self.members.contains_key(&id) {
            return Err(SplitError::MemberNotFound(id));
        }
        if let Some(expense) = self.expenses.values().find(|e| e.involves(id)) {
            return Err(SplitError::MemberInUse {
                member: id,
                expense: expense.id,
            });
        }
        self.members.remove(&id);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Expenses
    // -----------------------------------------------------------------

    fn insert_expense(&mut self, mut expense: Expense) -> Result<Expense> {
        self.require_collection(expense.collection_id)?;
        expense.validate()?;
        let taken = self.expenses.contains_key(&expense.id);
        expense.id = ExpenseId(allocate(&mut self.next_expense, expense.id.0, taken, "expense")?);
        self.expenses.insert(expense.id, expense.clone());
        Ok(expense)
    }

    fn get_expense(&self, id: ExpenseId) -> Option<Expense> {
        self.expenses.get(&id).cloned()
    }

    fn expenses_by_collection(&self, collection: CollectionId) -> Vec<Expense> {
        self.expenses
            .values()
            .filter(|e| e.collection_id == collection)
            .cloned()
            .collect()
    }

    fn update_expense(&mut self, expense: Expense) -> Result<()> {
        expense.validate()?;
        let slot = self
            .expenses
            .get_mut(&expense.id)
            .ok_or(SplitError::ExpenseNotFound(expense.id))?;
        if slot.collection_id != expense.collection_id {
            return Err(SplitError::CollectionMismatch {
                expected: slot.collection_id,
                actual: expense.collection_id,
            });
        }
        *slot = expense;
        Ok(())
    }

    fn delete_expense(&mut self, id: ExpenseId) -> Result<()> {
        self.expenses
            .remove(&id)
            .map(|_| ())
            .ok_or(SplitError::ExpenseNotFound(id))
    }

    // -----------------------------------------------------------------
    // Settlement records
    // -----------------------------------------------------------------

    fn insert_settlement_record(&mut self, mut record: SettlementRecord) -> Result<SettlementRecord> {
        self.require_collection(record.collection_id)?;
        let taken = self.records.contains_key(&record.id);
        record.id = SettlementRecordId(allocate(
            &mut self.next_record,
            record.id.0,
            taken,
            "settlement record",
        )?);
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn get_settlement_record(&self, id: SettlementRecordId) -> Option<SettlementRecord> {
        self.records.get(&id).cloned()
    }

    fn settlement_records_by_collection(&self, collection: CollectionId) -> Vec<SettlementRecord> {
        self.records
            .values()
            .filter(|r| r.collection_id == collection)
            .cloned()
            .collect()
    }

    fn update_settlement_record(&mut self, record: SettlementRecord) -> Result<()> {
        let slot = self
            .records
            .get_mut(&record.id)
            .ok_or(SplitError::SettlementNotFound(record.id))?;
        *slot = record;
        Ok(())
    }

    fn delete_settlement_records_by_collection(&mut self, collection: CollectionId) -> usize {
        let before = self.records.len();
        self.records.retain(|_, r| r.collection_id != collection);
        before - self.records.len()
    }
}
