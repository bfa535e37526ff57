//! Members: the participants of an expense collection.

use serde::{Deserialize, Serialize};

use crate::{CollectionId, MemberId};

/// A participant in an expense collection.
///
/// Members are immutable once created and are referenced by [`MemberId`]
/// from expenses and settlements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    /// The collection this member belongs to.
    pub collection_id: CollectionId,
    /// Display name shown next to balances.
    pub name: String,
}

impl Member {
    #[must_use]
    pub fn new(id: MemberId, collection_id: CollectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            collection_id,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Member {
    /// A member of collection 1 with the given numeric id.
    pub fn dummy(id: i64, name: &str) -> Self {
        Self::new(MemberId(id), CollectionId(1), name)
    }
}
