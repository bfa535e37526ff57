//! # splitkaro-ledger
//!
//! **Storage and settle-up orchestration** around the pure settlement
//! engine.
//!
//! ## Architecture
//!
//! 1. **Storage**: CRUD interface for collections, members, expenses and
//!    settlement records, with an in-memory implementation
//! 2. **SettlementBook**: settlement record lifecycle (create, confirm,
//!    clear/recreate when expenses change)
//! 3. **CollectionService**: loads a collection, runs the engine, persists
//!    the resulting plan
//!
//! ## Settle-up Flow
//!
//! ```text
//! add_expense() → book.invalidate() → settle_up()
//!     → engine.summarize() → book.sync() → records → confirm_settlement()
//! ```
//!
//! The engine never touches storage; only this crate does.

pub mod service;
pub mod settlement_book;
pub mod storage;

pub use service::CollectionService;
pub use settlement_book::SettlementBook;
pub use storage::Storage;
pub use storage::in_memory::InMemoryStorage;
