//! Persistence interface for collections, members, expenses and
//! settlement records.
//!
//! Inserts with an unassigned (`0`) ID receive the next auto-increment
//! value for that entity kind. `*_by_collection` lists come back in
//! ascending ID order, which is the member order the engine sees.

use splitkaro_types::{
    CollectionId, Expense, ExpenseCollection, ExpenseId, Member, MemberId, Result,
    SettlementRecord, SettlementRecordId,
};

pub mod in_memory;

pub trait Storage {
    fn insert_collection(&mut self, collection: ExpenseCollection) -> Result<ExpenseCollection>;
    fn get_collection(&self, id: CollectionId) -> Option<ExpenseCollection>;
    fn list_collections(&self) -> Vec<ExpenseCollection>;
    fn update_collection(&mut self, collection: ExpenseCollection) -> Result<()>;
    /// Removes the collection with its members, expenses and records.
    fn delete_collection(&mut self, id: CollectionId) -> Result<()>;

    fn insert_member(&mut self, member: Member) -> Result<Member>;
    fn get_member(&self, id: MemberId) -> Option<Member>;
    fn members_by_collection(&self, collection: CollectionId) -> Vec<Member>;
    fn update_member(&mut self, member: Member) -> Result<()>;
    /// Fails with `MemberInUse` while an expense still references the member.
    fn delete_member(&mut self, id: MemberId) -> Result<()>;

    fn insert_expense(&mut self, expense: Expense) -> Result<Expense>;
    fn get_expense(&self, id: ExpenseId) -> Option<Expense>;
    fn expenses_by_collection(&self, collection: CollectionId) -> Vec<Expense>;
    fn update_expense(&mut self, expense: Expense) -> Result<()>;
    fn delete_expense(&mut self, id: ExpenseId) -> Result<()>;

    fn insert_settlement_record(&mut self, record: SettlementRecord) -> Result<SettlementRecord>;
    fn get_settlement_record(&self, id: SettlementRecordId) -> Option<SettlementRecord>;
    fn settlement_records_by_collection(&self, collection: CollectionId) -> Vec<SettlementRecord>;
    fn update_settlement_record(&mut self, record: SettlementRecord) -> Result<()>;
    /// Returns how many records were removed.
    fn delete_settlement_records_by_collection(&mut self, collection: CollectionId) -> usize;
}
