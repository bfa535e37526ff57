//! System-wide constants for the SplitKaro settlement engine.

use rust_decimal::Decimal;

/// Decimal places used when presenting currency amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Largest scale `rust_decimal` can represent.
pub const MAX_DECIMAL_SCALE: u32 = 28;

/// Default settlement tolerance (0.01 currency units).
///
/// Members whose net balance is within this distance of zero are treated
/// as settled, and a party whose remaining debt or credit drops below it is
/// retired from the greedy settlement walk.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Tolerance for the zero-sum check over all net balances (1e-6).
pub const ZERO_SUM_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Domain separator for the settlement plan root hash.
pub const PLAN_ROOT_DOMAIN: &[u8] = b"splitkaro:plan_root:v1:";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "SplitKaro";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_values() {
        assert_eq!(DEFAULT_TOLERANCE, Decimal::new(1, 2));
        assert_eq!(ZERO_SUM_TOLERANCE, Decimal::new(1, 6));
        assert!(ZERO_SUM_TOLERANCE < DEFAULT_TOLERANCE);
    }
}
