//! Currency rounding and formatting.
//!
//! Amounts are carried at full `Decimal` precision through every
//! computation. Rounding happens here, at the presentation boundary only.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::CURRENCY_SCALE;

/// Round `amount` to `scale` decimal places, midpoint away from zero.
#[must_use]
pub fn round_to_scale(amount: Decimal, scale: u32) -> Decimal {
    let rounded = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    // Avoid printing "-0.00" for tiny negative residues.
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Format with exactly `scale` decimal places.
#[must_use]
pub fn format_amount_with_scale(amount: Decimal, scale: u32) -> String {
    let mut rounded = round_to_scale(amount, scale);
    rounded.rescale(scale);
    rounded.to_string()
}

/// Sum `amounts`, or `None` if any partial sum leaves the decimal range.
#[must_use]
pub fn checked_total<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Format at the default currency scale (2 decimal places).
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format_amount_with_scale(amount, CURRENCY_SCALE)
}
