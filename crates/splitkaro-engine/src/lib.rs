//! # splitkaro-engine
//!
//! **Pure deterministic settlement engine for SplitKaro.**
//!
//! Given the expenses and members of one collection, the engine computes
//! per-member balances and a short list of payments that settles them.
//! It has:
//!
//! - **Zero side effects**: no storage, no I/O, no shared state
//! - **Deterministic output**: same input → same payments in the same order
//! - **Exact arithmetic**: `Decimal` sums, rounding only when formatting
//! - **Conservation checks**: net balances must sum to zero, and the
//!   payments must clear them
//!
//! ## Flow
//!
//! ```text
//! (expenses, members) → validate → compute_balances → simplify_debts
//!     → verify conservation → SettlementPlan { balances, settlements, plan_root }
//! ```

pub mod balances;
pub mod conservation;
pub mod determinism;
pub mod engine;
pub mod simplify;
pub mod validation;

pub use balances::{BalanceSheet, compute_balances};
pub use conservation::{apply_settlements, verify_settlements_clear, verify_zero_sum};
pub use determinism::{compute_plan_root, plan_root_hex, verify_plan_root};
pub use engine::{SettlementEngine, SettlementPlan};
pub use simplify::simplify_debts;
pub use validation::{MemberIndex, validate_expenses};
