//! Expense collections: named groups that own members and expenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CollectionId;

/// A named group of members who share expenses together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCollection {
    pub id: CollectionId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl ExpenseCollection {
    #[must_use]
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CollectionId::UNASSIGNED,
            name: name.into(),
            created_at,
        }
    }
}
