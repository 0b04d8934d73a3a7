// ============================================================================
// Lot Matcher Interface
// Defines the contract for resolving SELL quantity against open BUY lots
// ============================================================================

use crate::domain::{Execution, InstrumentOutcome};
use crate::error::PnlResult;

/// Strategy interface for lot matching.
///
/// Implementations receive one instrument's executions, already in
/// chronological order, and must not look at any other instrument. They keep
/// no state between calls, so the same input always yields the same outcome.
pub trait LotMatcher: Send + Sync {
    /// Match every SELL in `executions` against earlier BUYs
    ///
    /// # Arguments
    /// * `instrument` - The instrument every execution must belong to
    /// * `executions` - Chronologically ordered executions
    ///
    /// # Errors
    /// Contract violations (foreign instrument, out-of-order timestamp,
    /// invalid quantity or price) and arithmetic overflow.
    fn match_instrument(
        &self,
        instrument: &str,
        executions: &[Execution],
    ) -> PnlResult<InstrumentOutcome>;

    /// Get the matcher name for logging
    fn name(&self) -> &str;
}
