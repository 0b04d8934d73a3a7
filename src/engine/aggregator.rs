// ============================================================================
// Aggregator
// Summary statistics and display records over realized matches
// ============================================================================

use crate::domain::{MatchRecord, Outcome, RealizedMatch, SummaryStatistics};
use crate::error::PnlResult;

/// Matches split by outcome, borrowing the input in its original order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MatchPartition<'a> {
    pub winning: Vec<&'a RealizedMatch>,
    pub losing: Vec<&'a RealizedMatch>,
    pub breakeven: Vec<&'a RealizedMatch>,
}

/// Compute summary statistics over `matches`.
///
/// The result does not depend on the order of `matches`.
///
/// # Errors
/// `Numeric` if a P&L sum leaves the fixed-point range.
pub fn summarize(matches: &[RealizedMatch]) -> PnlResult<SummaryStatistics> {
    let mut stats = SummaryStatistics {
        total_matches: matches.len(),
        ..SummaryStatistics::default()
    };

    for realized in matches {
        let pnl = realized.pnl();
        match realized.outcome() {
            Outcome::Win => {
                stats.winning_matches += 1;
                stats.total_profit = stats.total_profit.checked_add(pnl)?;
            }
            Outcome::Loss => {
                stats.losing_matches += 1;
                stats.total_loss = stats.total_loss.checked_add(pnl)?;
            }
            Outcome::Breakeven => stats.breakeven_matches += 1,
        }
    }

    stats.net_pnl = stats.total_profit.checked_add(stats.total_loss)?;
    stats.win_rate = win_rate(stats.winning_matches, stats.total_matches);

    Ok(stats)
}

/// Winning share as a percentage; 0 for an empty set
fn win_rate(winning: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        winning as f64 * 100.0 / total as f64
    }
}

/// Split matches into winning, losing and breakeven buckets.
pub fn partition_matches(matches: &[RealizedMatch]) -> MatchPartition<'_> {
    let mut partition = MatchPartition::default();
    for realized in matches {
        match realized.outcome() {
            Outcome::Win => partition.winning.push(realized),
            Outcome::Loss => partition.losing.push(realized),
            Outcome::Breakeven => partition.breakeven.push(realized),
        }
    }
    partition
}

/// One display row per match, P&L rounded to `display_decimals`.
pub fn match_records(
    matches: &[RealizedMatch],
    display_decimals: u32,
) -> PnlResult<Vec<MatchRecord>> {
    matches
        .iter()
        .map(|realized| MatchRecord::from_match(realized, display_decimals))
        .collect()
}
