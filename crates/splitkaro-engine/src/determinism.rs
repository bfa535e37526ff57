//! Settlement plan digests.
//!
//! The same expenses and members must always produce the same settlement
//! list. The `plan_root` is a SHA-256 over the ordered settlements that lets
//! callers compare two plans (for example the stored one and a fresh
//! recomputation) without comparing full payloads.

use sha2::{Digest, Sha256};
use splitkaro_types::{Settlement, constants};

/// Compute the plan root over an ordered settlement list.
///
/// Depends on the payer, payee and amount of every settlement, in order.
/// Amounts are normalized first, so `30` and `30.00` hash identically.
#[must_use]
pub fn compute_plan_root(settlements: &[Settlement]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(constants::PLAN_ROOT_DOMAIN);
    hasher.update((settlements.len() as u64).to_le_bytes());

    for s in settlements {
        hasher.update(s.from.0.to_le_bytes());
        hasher.update(s.to.0.to_le_bytes());
        hasher.update(s.amount.normalize().to_string().as_bytes());
        // Separator keeps "1" + "23" distinct from "12" + "3".
        hasher.update(b";");
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Recompute the root and compare it with `expected_root`.
#[must_use]
pub fn verify_plan_root(settlements: &[Settlement], expected_root: &[u8; 32]) -> bool {
    compute_plan_root(settlements) == *expected_root
}

/// Lowercase hex form of a plan root, for logs and display.
#[must_use]
pub fn plan_root_hex(root: &[u8; 32]) -> String {
    hex::encode(root)
}
