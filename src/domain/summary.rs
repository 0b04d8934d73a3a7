// ============================================================================
// Summary Domain Models
// Aggregated statistics and display rows handed to presentation code
// ============================================================================

use super::{Outcome, RealizedMatch};
use crate::error::PnlResult;
use crate::numeric::{Pnl, Price};
use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Statistics over a set of realized matches.
///
/// Breakeven matches (pnl == 0) count toward `total_matches` only.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SummaryStatistics {
    pub total_matches: usize,
    pub winning_matches: usize,
    pub losing_matches: usize,
    pub breakeven_matches: usize,
    /// Sum of positive P&L
    pub total_profit: Pnl,
    /// Sum of negative P&L, never positive
    pub total_loss: Pnl,
    pub net_pnl: Pnl,
    /// Winning matches as a percentage of all matches, 0 when there are none
    pub win_rate: f64,
}

impl SummaryStatistics {
    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }
}

/// One row of the matched-trades table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MatchRecord {
    pub instrument: String,
    pub buy_time: DateTime<Utc>,
    pub buy_price: Price,
    pub sell_time: DateTime<Utc>,
    pub sell_price: Price,
    pub quantity: u64,
    /// P&L rounded for display; sums use the exact value on the match
    pub pnl: Pnl,
    pub outcome: Outcome,
}

impl MatchRecord {
    pub fn from_match(realized: &RealizedMatch, display_decimals: u32) -> PnlResult<Self> {
        Ok(Self {
            instrument: realized.instrument().to_string(),
            buy_time: realized.buy_timestamp(),
            buy_price: realized.buy_price(),
            sell_time: realized.sell_timestamp(),
            sell_price: realized.sell_price(),
            quantity: realized.quantity(),
            pnl: realized.pnl().round_dp(display_decimals)?,
            outcome: realized.outcome(),
        })
    }
}

/// Per-instrument breakdown, including the quantity realized P&L could not
/// account for.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct InstrumentSummary {
    pub instrument: String,
    pub statistics: SummaryStatistics,
    /// SELL quantity that found no open BUY lot
    pub unmatched_sell_quantity: u64,
    /// BUY quantity still open after the last execution
    pub open_quantity: u64,
}

impl InstrumentSummary {
    /// Whether every SELL unit was matched against a known BUY.
    pub fn is_fully_realized(&self) -> bool {
        self.unmatched_sell_quantity == 0
    }
}
