//! Input validation for the settlement engine.
//!
//! The engine only accepts plain data that satisfies the model invariants:
//! - member IDs are unique within the supplied list
//! - every expense has a positive amount and a non-empty, duplicate-free
//!   split set
//! - every member an expense references is in the supplied list, unless
//!   the caller opted into [`UnknownMemberPolicy::Ignore`]

use std::collections::HashMap;

use splitkaro_types::{Expense, Member, MemberId, Result, SplitError, UnknownMemberPolicy};

/// Position of every member in the caller's member list.
///
/// Positions drive output order and the settlement tie-break.
#[derive(Debug, Clone, Default)]
pub struct MemberIndex {
    positions: HashMap<MemberId, usize>,
}

impl MemberIndex {
    /// Index `members` by ID.
    ///
    /// # Errors
    /// Returns [`SplitError::DuplicateMember`] if an ID appears twice.
    pub fn build(members: &[Member]) -> Result<Self> {
        let mut positions = HashMap::with_capacity(members.len());
        for (pos, member) in members.iter().enumerate() {
            if positions.insert(member.id, pos).is_some() {
                return Err(SplitError::DuplicateMember(member.id));
            }
        }
        Ok(Self { positions })
    }

    #[must_use]
    pub fn position(&self, member: MemberId) -> Option<usize> {
        self.positions.get(&member).copied()
    }

    #[must_use]
    pub fn contains(&self, member: MemberId) -> bool {
        self.positions.contains_key(&member)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Validate every expense against its own invariants and, under
/// [`UnknownMemberPolicy::Reject`], against the member index.
///
/// # Errors
/// - [`SplitError::InvalidExpense`] for a structurally invalid expense
/// - [`SplitError::UnknownMember`] for an unknown payer or participant
///   when the policy is `Reject`
pub fn validate_expenses(
    expenses: &[Expense],
    index: &MemberIndex,
    policy: UnknownMemberPolicy,
) -> Result<()> {
    for expense in expenses {
        expense.validate()?;
        if policy == UnknownMemberPolicy::Reject {
            if let Some(member) = first_unknown_member(expense, index) {
                return Err(SplitError::UnknownMember {
                    expense: expense.id,
                    member,
                });
            }
        }
    }
    Ok(())
}

/// The payer if unknown, otherwise the first unknown split member.
fn first_unknown_member(expense: &Expense, index: &MemberIndex) -> Option<MemberId> {
    std::iter::once(&expense.paid_by)
        .chain(&expense.split_among)
        .copied()
        .find(|member| !index.contains(*member))
}
