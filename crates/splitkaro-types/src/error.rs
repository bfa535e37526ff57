//! Error types for the SplitKaro settlement engine.
//!
//! All errors use the `SK_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Member errors
//! - 2xx: Expense errors
//! - 3xx: Collection errors
//! - 4xx: Settlement errors
//! - 9xx: General errors

use thiserror::Error;

use crate::{CollectionId, ExpenseId, MemberId, SettlementRecordId};

/// Central error enum for all SplitKaro operations.
#[derive(Debug, Error)]
pub enum SplitError {
    // =================================================================
    // Member Errors (1xx)
    // =================================================================
    /// An expense references a member that is not part of the supplied list.
    #[error("SK_ERR_100: Unknown member {member} referenced by {expense}")]
    UnknownMember { expense: ExpenseId, member: MemberId },

    /// The same member ID appears twice in a member list.
    #[error("SK_ERR_101: Duplicate member: {0}")]
    DuplicateMember(MemberId),

    /// The member is still the payer or a participant of an expense.
    #[error("SK_ERR_102: Member {member} is still referenced by {expense}")]
    MemberInUse { member: MemberId, expense: ExpenseId },

    /// The requested member was not found.
    #[error("SK_ERR_103: Member not found: {0}")]
    MemberNotFound(MemberId),

    // =================================================================
    // Expense Errors (2xx)
    // =================================================================
    /// The expense failed validation (non-positive amount, empty split, ...).
    #[error("SK_ERR_200: Invalid expense {expense}: {reason}")]
    InvalidExpense { expense: ExpenseId, reason: String },

    /// The requested expense was not found.
    #[error("SK_ERR_201: Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    /// A running total of amounts exceeded the decimal range.
    #[error("SK_ERR_202: Amount overflow: {0}")]
    AmountOverflow(String),

    // =================================================================
    // Collection Errors (3xx)
    // =================================================================
    /// The requested collection was not found.
    #[error("SK_ERR_300: Collection not found: {0}")]
    CollectionNotFound(CollectionId),

    /// An entity was attached to a different collection than expected.
    #[error("SK_ERR_301: Collection mismatch: expected {expected}, got {actual}")]
    CollectionMismatch {
        expected: CollectionId,
        actual: CollectionId,
    },

    // =================================================================
    // Settlement Errors (4xx)
    // =================================================================
    /// Net balances of a collection do not sum to zero.
    #[error("SK_ERR_400: Balance invariant violation: {reason}")]
    BalanceInvariantViolation { reason: String },

    /// Applying the computed settlements does not clear every balance.
    #[error("SK_ERR_401: Settlement invariant violation: {reason}")]
    SettlementInvariantViolation { reason: String },

    /// The settlement record has already been confirmed.
    #[error("SK_ERR_402: Settlement already confirmed: {0}")]
    AlreadySettled(SettlementRecordId),

    /// The requested settlement record was not found.
    #[error("SK_ERR_403: Settlement record not found: {0}")]
    SettlementNotFound(SettlementRecordId),

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("SK_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid tolerance, bad scale, ...).
    #[error("SK_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// An insert carried an explicit ID that is already taken.
    #[error("SK_ERR_903: Duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: i64 },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SplitError>;

impl From<serde_json::Error> for SplitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
