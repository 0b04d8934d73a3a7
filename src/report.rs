// ============================================================================
// P&L Report
// Everything a dashboard, report generator or notifier needs from one run
// ============================================================================

use crate::domain::{InstrumentSummary, MatchRecord, RealizedMatch, SummaryStatistics};
use crate::engine::aggregator::{self, MatchPartition};
use crate::error::PnlResult;
use crate::ingest::Rejection;
use crate::numeric::checked_quantity_sum;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Output of a `PnlEngine` run
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PnlReport {
    /// All realized matches, instrument then chronological order
    pub matches: Vec<RealizedMatch>,
    /// Display rows, index-aligned with `matches`
    pub records: Vec<MatchRecord>,
    pub summary: SummaryStatistics,
    /// Per-instrument breakdown, same instrument order as `matches`
    pub instruments: Vec<InstrumentSummary>,
    /// Order records dropped at ingest (empty when executions were passed in)
    pub rejections: Vec<Rejection>,
}

impl PnlReport {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn partition(&self) -> MatchPartition<'_> {
        aggregator::partition_matches(&self.matches)
    }

    pub fn winners(&self) -> Vec<&RealizedMatch> {
        self.partition().winning
    }

    pub fn losers(&self) -> Vec<&RealizedMatch> {
        self.partition().losing
    }

    pub fn instrument(&self, instrument: &str) -> Option<&InstrumentSummary> {
        self.instruments.iter().find(|s| s.instrument == instrument)
    }

    /// SELL quantity across all instruments that realized P&L does not cover.
    ///
    /// Non-zero means the execution history starts mid-position and the
    /// realized figures are incomplete.
    pub fn total_unmatched_sell_quantity(&self) -> PnlResult<u64> {
        let total =
            checked_quantity_sum(self.instruments.iter().map(|s| s.unmatched_sell_quantity))?;
        Ok(total)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
