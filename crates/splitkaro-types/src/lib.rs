//! # splitkaro-types
//!
//! Shared types, errors, and configuration for the **SplitKaro** settlement
//! engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`MemberId`], [`ExpenseId`], [`CollectionId`], [`SettlementRecordId`]
//! - **Collection model**: [`ExpenseCollection`], [`Member`], [`Expense`]
//! - **Derived results**: [`MemberBalance`], [`Settlement`]
//! - **Persisted lifecycle**: [`SettlementRecord`]
//! - **Money helpers**: [`format_amount`], [`round_to_scale`]
//! - **Configuration**: [`EngineConfig`], [`UnknownMemberPolicy`]
//! - **Errors**: [`SplitError`] with `SK_ERR_` prefix codes
//! - **Constants**: system-wide defaults

pub mod balance;
pub mod collection;
pub mod config;
pub mod constants;
pub mod error;
pub mod expense;
pub mod ids;
pub mod member;
pub mod money;
pub mod settlement;

// Re-export all primary types at crate root for ergonomic imports:
//   use splitkaro_types::{Expense, Member, MemberBalance, Settlement, ...};

pub use balance::*;
pub use collection::*;
pub use config::*;
pub use error::*;
pub use expense::*;
pub use ids::*;
pub use member::*;
pub use money::*;
pub use settlement::*;

// Constants are accessed via `splitkaro_types::constants::FOO`
// (not re-exported to avoid name collisions).
