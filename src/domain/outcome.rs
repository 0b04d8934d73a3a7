// ============================================================================
// Instrument Outcome
// Result of running the lot matcher over one instrument's executions
// ============================================================================

use super::{LotQueue, RealizedMatch};
use crate::numeric::{checked_quantity_sum, NumericResult};
use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::Serialize;

/// SELL quantity left over after the open-lot queue ran dry.
///
/// Typically a position opened before the execution history starts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct UnmatchedSell {
    pub instrument: String,
    pub quantity: u64,
    pub timestamp: DateTime<Utc>,
    pub order_id: Option<String>,
}

/// Matches for one instrument plus the state the matcher ended with.
#[derive(Debug, Clone)]
pub struct InstrumentOutcome {
    pub instrument: String,
    /// Realized matches in the order the SELLs consumed them
    pub matches: Vec<RealizedMatch>,
    /// Lots still open after the last execution
    pub open_lots: LotQueue,
    pub unmatched_sells: Vec<UnmatchedSell>,
}

impl InstrumentOutcome {
    pub fn new(instrument: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            matches: Vec::new(),
            open_lots: LotQueue::new(),
            unmatched_sells: Vec::new(),
        }
    }

    pub fn unmatched_sell_quantity(&self) -> NumericResult<u64> {
        checked_quantity_sum(self.unmatched_sells.iter().map(|u| u.quantity))
    }

    pub fn matched_quantity(&self) -> NumericResult<u64> {
        checked_quantity_sum(self.matches.iter().map(RealizedMatch::quantity))
    }
}
