//! Identifiers used throughout SplitKaro.
//!
//! All entity IDs are integer primary keys, as assigned by the storage
//! layer. The value `0` means "not yet assigned": storage replaces it with
//! the next auto-increment value on insert.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MemberId
// ---------------------------------------------------------------------------

/// Identifier of a participant in an expense collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct MemberId(pub i64);

impl MemberId {
    /// Placeholder for a member that storage has not numbered yet.
    pub const UNASSIGNED: Self = Self(0);

    #[must_use]
    pub fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ExpenseId
// ---------------------------------------------------------------------------

/// Identifier of a single recorded spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ExpenseId(pub i64);

impl ExpenseId {
    pub const UNASSIGNED: Self = Self(0);

    #[must_use]
    pub fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expense:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// CollectionId
// ---------------------------------------------------------------------------

/// Identifier of an expense collection (the group members share costs in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CollectionId(pub i64);

impl CollectionId {
    pub const UNASSIGNED: Self = Self(0);

    #[must_use]
    pub fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collection:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SettlementRecordId
// ---------------------------------------------------------------------------

/// Identifier of a persisted settlement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SettlementRecordId(pub i64);

impl SettlementRecordId {
    pub const UNASSIGNED: Self = Self(0);

    #[must_use]
    pub fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SettlementRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "settlement:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
