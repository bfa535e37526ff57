//! Settle-up orchestration for one storage backend.
//!
//! ```text
//! storage ──load expenses + members──▶ SettlementEngine ──plan──▶ SettlementBook ──▶ storage
//! ```
//!
//! Every expense write invalidates the collection's settlement records, so
//! the next [`CollectionService::settle_up`] recreates them from current
//! data.

use chrono::Utc;
use splitkaro_engine::{SettlementEngine, SettlementPlan};
use splitkaro_types::{
    CollectionId, Expense, ExpenseCollection, ExpenseId, Member, MemberBalance, MemberId, Result,
    SettlementRecord, SettlementRecordId, SplitError,
};

use crate::settlement_book::SettlementBook;
use crate::storage::Storage;

/// Entry point for clients: collection, member and expense management plus
/// settle-up over any [`Storage`] backend.
///
/// Expense writes and member removals invalidate the collection's stored
/// settlement records; reads never modify storage.
pub struct CollectionService<S: Storage> {
    storage: S,
    engine: SettlementEngine,
    book: SettlementBook,
}

impl<S: Storage> CollectionService<S> {
    /// Wrap `storage` with an engine and an empty settlement book.
    pub fn new(storage: S, engine: SettlementEngine) -> Self {
        Self {
            storage,
            engine,
            book: SettlementBook::new(),
        }
    }

    /// Read access to the backing store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The engine used for balances and settlements.
    pub fn engine(&self) -> &SettlementEngine {
        &self.engine
    }

    // -----------------------------------------------------------------
    // Collections & members
    // -----------------------------------------------------------------

    /// Create an empty collection and return it with its assigned ID.
    pub fn create_collection(&mut self, name: &str) -> Result<ExpenseCollection> {
        let collection = self
            .storage
            .insert_collection(ExpenseCollection::new(name, Utc::now()))?;
        tracing::info!(collection = %collection.id, name, "Collection created");
        Ok(collection)
    }

    /// Change a collection's display name.
    ///
    /// # Errors
    /// [`SplitError::CollectionNotFound`] for an unknown collection.
    pub fn rename_collection(&mut self, collection: CollectionId, name: &str) -> Result<()> {
        let mut existing = self
            .storage
            .get_collection(collection)
            .ok_or(SplitError::CollectionNotFound(collection))?;
        existing.name = name.to_string();
        self.storage.update_collection(existing)
    }

    /// Delete a collection together with its members, expenses and records.
    pub fn delete_collection(&mut self, collection: CollectionId) -> Result<()> {
        self.storage.delete_collection(collection)?;
        self.book.forget(collection);
        tracing::info!(collection = %collection, "Collection deleted");
        Ok(())
    }

    /// Add a member to `collection`. Members keep insertion order, which is
    /// the order balances and tie-breaks use.
    pub fn add_member(&mut self, collection: CollectionId, name: &str) -> Result<Member> {
        let member = self
            .storage
            .insert_member(Member::new(MemberId::UNASSIGNED, collection, name))?;
        tracing::debug!(collection = %collection, member = %member.id, "Member added");
        Ok(member)
    }

    /// Renaming does not touch balances, so settlement records stay valid.
    pub fn rename_member(&mut self, member: MemberId, name: &str) -> Result<()> {
        let mut existing = self
            .storage
            .get_member(member)
            .ok_or(SplitError::MemberNotFound(member))?;
        existing.name = name.to_string();
        self.storage.update_member(existing)
    }

    /// Remove a member that no expense references.
    ///
    /// # Errors
    /// - [`SplitError::MemberNotFound`] for an unknown member
    /// - [`SplitError::MemberInUse`] while an expense still references it
    pub fn remove_member(&mut self, member: MemberId) -> Result<()> {
        let existing = self
            .storage
            .get_member(member)
            .ok_or(SplitError::MemberNotFound(member))?;
        self.storage.delete_member(member)?;
        self.book.invalidate(existing.collection_id);
        Ok(())
    }

    /// Members of `collection` in insertion order.
    pub fn members(&self, collection: CollectionId) -> Result<Vec<Member>> {
        self.require_collection(collection)?;
        Ok(self.storage.members_by_collection(collection))
    }

    // -----------------------------------------------------------------
    // Expenses
    // -----------------------------------------------------------------

    /// Store a new expense after checking that every member it references
    /// belongs to its collection.
    pub fn add_expense(&mut self, expense: Expense) -> Result<Expense> {
        self.check_expense_members(&expense)?;
        let stored = self.storage.insert_expense(expense)?;
        self.book.invalidate(stored.collection_id);
        tracing::debug!(
            collection = %stored.collection_id,
            expense = %stored.id,
            amount = %stored.amount,
            "Expense added"
        );
        Ok(stored)
    }

    /// Replace a stored expense, with the same membership checks as
    /// [`Self::add_expense`].
    pub fn update_expense(&mut self, expense: Expense) -> Result<()> {
        self.check_expense_members(&expense)?;
        let collection = expense.collection_id;
        self.storage.update_expense(expense)?;
        self.book.invalidate(collection);
        Ok(())
    }

    /// Delete an expense and invalidate its collection's records.
    pub fn delete_expense(&mut self, expense: ExpenseId) -> Result<()> {
        let existing = self
            .storage
            .get_expense(expense)
            .ok_or(SplitError::ExpenseNotFound(expense))?;
        self.storage.delete_expense(expense)?;
        self.book.invalidate(existing.collection_id);
        Ok(())
    }

    /// Expenses of `collection` in insertion order.
    pub fn expenses(&self, collection: CollectionId) -> Result<Vec<Expense>> {
        self.require_collection(collection)?;
        Ok(self.storage.expenses_by_collection(collection))
    }

    // -----------------------------------------------------------------
    // Balances & settlements
    // -----------------------------------------------------------------

    /// Per-member paid / owed / net totals for `collection`.
    pub fn balances(&self, collection: CollectionId) -> Result<Vec<MemberBalance>> {
        let (expenses, members) = self.load(collection)?;
        self.engine.compute_balances(&expenses, &members)
    }

    /// Balances, suggested payments, total spent and plan root, without
    /// touching stored records.
    pub fn summary(&self, collection: CollectionId) -> Result<SettlementPlan> {
        let (expenses, members) = self.load(collection)?;
        self.engine.summarize(&expenses, &members)
    }

    /// Compute the current plan and persist it as settlement records.
    ///
    /// Records from an earlier call survive, settled flags included, as
    /// long as no expense changed and the plan is identical.
    pub fn settle_up(&mut self, collection: CollectionId) -> Result<Vec<SettlementRecord>> {
        let plan = self.summary(collection)?;
        self.book
            .sync(&mut self.storage, collection, &plan.settlements, Utc::now())
    }

    /// Mark a suggested payment as made.
    ///
    /// # Errors
    /// - [`SplitError::SettlementNotFound`] for an unknown record
    /// - [`SplitError::AlreadySettled`] if it was confirmed before
    pub fn confirm_settlement(&mut self, record: SettlementRecordId) -> Result<SettlementRecord> {
        self.book.mark_settled(&mut self.storage, record, Utc::now())
    }

    /// Stored records of `collection` not yet confirmed.
    pub fn outstanding(&self, collection: CollectionId) -> Result<Vec<SettlementRecord>> {
        self.require_collection(collection)?;
        Ok(self.book.outstanding(&self.storage, collection))
    }

    // -----------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------

    fn require_collection(&self, collection: CollectionId) -> Result<()> {
        self.storage
            .get_collection(collection)
            .map(|_| ())
            .ok_or(SplitError::CollectionNotFound(collection))
    }

    fn load(&self, collection: CollectionId) -> Result<(Vec<Expense>, Vec<Member>)> {
        self.require_collection(collection)?;
        Ok((
            self.storage.expenses_by_collection(collection),
            self.storage.members_by_collection(collection),
        ))
    }

    fn check_expense_members(&self, expense: &Expense) -> Result<()> {
        self.require_collection(expense.collection_id)?;
        for id in std::iter::once(&expense.paid_by).chain(&expense.split_among) {
            let member = self.storage.get_member(*id).ok_or(SplitError::UnknownMember {
                expense: expense.id,
                member: *id,
            })?;
            if member.collection_id != expense.collection_id {
                return Err(SplitError::CollectionMismatch {
                    expected: expense.collection_id,
                    actual: member.collection_id,
                });
            }
        }
        Ok(())
    }
}
