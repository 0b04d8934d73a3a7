// ============================================================================
// Quantity Totals
// Checked sums over whole-unit u64 quantities
// ============================================================================

use super::errors::{NumericError, NumericResult};

/// Sum quantities, failing with `Overflow` instead of wrapping.
pub fn checked_quantity_sum<I>(quantities: I) -> NumericResult<u64>
where
    I: IntoIterator<Item = u64>,
{
    quantities
        .into_iter()
        .try_fold(0u64, |acc, quantity| acc.checked_add(quantity))
        .ok_or(NumericError::Overflow)
}
