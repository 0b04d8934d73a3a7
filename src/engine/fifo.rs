// ============================================================================
// FIFO Lot Matching
// Oldest open BUY lot is closed first by each incoming SELL
// ============================================================================

use crate::domain::{Execution, InstrumentOutcome, RealizedMatch, Side, UnmatchedSell};
use crate::error::{PnlError, PnlResult};
use crate::interfaces::LotMatcher;
use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

/// First-In-First-Out lot matcher
///
/// BUYs queue up as open lots. A SELL consumes the front of the queue until
/// it is filled or the queue is empty; each lot it touches yields one
/// realized match.
///
/// # Example
/// ```text
/// Queue: 10 @ 100 (t=1)
///        10 @ 110 (t=2)
///
/// Incoming: SELL 15 @ 120 (t=3)
/// Result: 10 x (120 - 100) = 200, then 5 x (120 - 110) = 50
///         5 @ 110 stays open
/// ```
///
/// SELL quantity left once the queue is empty produces no match. It is
/// recorded as an `UnmatchedSell` on the outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct FifoLotMatcher;

impl FifoLotMatcher {
    pub fn new() -> Self {
        Self
    }

    fn check_contract(
        instrument: &str,
        execution: &Execution,
        previous: Option<DateTime<Utc>>,
    ) -> PnlResult<()> {
        if execution.instrument != instrument {
            return Err(PnlError::InstrumentMismatch {
                expected: instrument.to_string(),
                found: execution.instrument.clone(),
            });
        }

        if let Some(previous) = previous {
            if execution.timestamp < previous {
                return Err(PnlError::OutOfOrder {
                    instrument: instrument.to_string(),
                    previous,
                    current: execution.timestamp,
                });
            }
        }

        execution.validate()
    }

    fn match_sell(sell: &Execution, outcome: &mut InstrumentOutcome) -> PnlResult<()> {
        let mut remaining = sell.quantity;

        while remaining > 0 {
            let fill = match outcome.open_lots.consume_front(remaining) {
                Some(fill) => fill,
                None => break,
            };
            remaining -= fill.quantity;

            let realized = RealizedMatch::new(
                sell.instrument.as_str(),
                fill.quantity,
                fill.price,
                sell.price,
                fill.timestamp,
                sell.timestamp,
            )?
            .with_order_ids(fill.order_id, sell.order_id.clone());

            trace!(
                instrument = %sell.instrument,
                quantity = realized.quantity(),
                buy_price = %realized.buy_price(),
                sell_price = %realized.sell_price(),
                pnl = %realized.pnl(),
                "lot matched"
            );
            outcome.matches.push(realized);
        }

        if remaining > 0 {
            warn!(
                instrument = %sell.instrument,
                quantity = remaining,
                sold = sell.quantity,
                timestamp = %sell.timestamp,
                "sell exceeds open lots, remainder excluded from realized P&L"
            );
            outcome.unmatched_sells.push(UnmatchedSell {
                instrument: sell.instrument.clone(),
                quantity: remaining,
                timestamp: sell.timestamp,
                order_id: sell.order_id.clone(),
            });
        }

        Ok(())
    }
}

impl LotMatcher for FifoLotMatcher {
    fn match_instrument(
        &self,
        instrument: &str,
        executions: &[Execution],
    ) -> PnlResult<InstrumentOutcome> {
        let mut outcome = InstrumentOutcome::new(instrument);
        let mut previous = None;

        for execution in executions {
            Self::check_contract(instrument, execution, previous)?;
            previous = Some(execution.timestamp);

            match execution.side {
                Side::Buy => outcome.open_lots.push_buy(execution),
                Side::Sell => Self::match_sell(execution, &mut outcome)?,
            }
        }

        debug!(
            instrument,
            executions = executions.len(),
            matches = outcome.matches.len(),
            open_lots = outcome.open_lots.len(),
            unmatched_sells = outcome.unmatched_sells.len(),
            "instrument matched"
        );

        Ok(outcome)
    }

    fn name(&self) -> &str {
        "FIFO"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Pnl, Price};
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn px(value: i64) -> Price {
        Price::from_integer(value).unwrap()
    }

    fn buy(instrument: &str, secs: i64, qty: u64, price: i64) -> Execution {
        Execution::buy(instrument, qty, px(price), at(secs)).unwrap()
    }

    fn sell(instrument: &str, secs: i64, qty: u64, price: i64) -> Execution {
        Execution::sell(instrument, qty, px(price), at(secs)).unwrap()
    }

    #[test]
    fn test_fifo_consumes_oldest_lot_first() {
        let executions = vec![
            buy("X", 1, 10, 100),
            buy("X", 2, 10, 110),
            sell("X", 3, 15, 120),
        ];

        let outcome = FifoLotMatcher::new()
            .match_instrument("X", &executions)
            .unwrap();

        assert_eq!(outcome.matches.len(), 2);

        let first = &outcome.matches[0];
        assert_eq!(first.quantity(), 10);
        assert_eq!(first.buy_price(), px(100));
        assert_eq!(first.buy_timestamp(), at(1));
        assert_eq!(first.pnl(), Pnl::from_integer(200).unwrap());

        let second = &outcome.matches[1];
        assert_eq!(second.quantity(), 5);
        assert_eq!(second.buy_price(), px(110));
        assert_eq!(second.sell_timestamp(), at(3));
        assert_eq!(second.pnl(), Pnl::from_integer(50).unwrap());

        let left = outcome.open_lots.front().unwrap();
        assert_eq!(left.remaining_quantity(), 5);
        assert_eq!(left.price(), px(110));
    }

    #[test]
    fn test_partial_exit_then_full_exit() {
        let executions = vec![
            buy("X", 1, 100, 50),
            sell("X", 2, 40, 60),
            sell("X", 3, 60, 55),
        ];

        let outcome = FifoLotMatcher::new()
            .match_instrument("X", &executions)
            .unwrap();

        let pnls: Vec<_> = outcome.matches.iter().map(|m| m.pnl()).collect();
        assert_eq!(
            pnls,
            vec![Pnl::from_integer(400).unwrap(), Pnl::from_integer(300).unwrap()]
        );
        assert_eq!(outcome.matches[0].quantity(), 40);
        assert_eq!(outcome.matches[1].quantity(), 60);
        assert!(outcome.open_lots.is_empty());
        assert!(outcome.unmatched_sells.is_empty());
    }

    #[test]
    fn test_sell_without_buy_realizes_nothing() {
        let executions = vec![sell("X", 1, 5, 100)];

        let outcome = FifoLotMatcher::new()
            .match_instrument("X", &executions)
            .unwrap();

        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.unmatched_sell_quantity(), Ok(5));
        assert_eq!(outcome.unmatched_sells[0].timestamp, at(1));
    }

    #[test]
    fn test_sell_larger_than_open_lots() {
        let executions = vec![buy("X", 1, 3, 100), sell("X", 2, 8, 90)];

        let outcome = FifoLotMatcher::new()
            .match_instrument("X", &executions)
            .unwrap();

        assert_eq!(outcome.matched_quantity(), Ok(3));
        assert_eq!(outcome.matches[0].pnl(), Pnl::from_integer(-30).unwrap());
        assert_eq!(outcome.unmatched_sell_quantity(), Ok(5));
        assert!(outcome.open_lots.is_empty());
    }

    #[test]
    fn test_later_buy_does_not_cover_earlier_sell() {
        let executions = vec![sell("X", 1, 5, 100), buy("X", 2, 5, 90)];

        let outcome = FifoLotMatcher::new()
            .match_instrument("X", &executions)
            .unwrap();

        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.open_lots.open_quantity(), Ok(5));
        assert_eq!(outcome.unmatched_sell_quantity(), Ok(5));
    }

    #[test]
    fn test_only_buys() {
        let executions = vec![buy("X", 1, 5, 100), buy("X", 2, 5, 101)];

        let outcome = FifoLotMatcher::new()
            .match_instrument("X", &executions)
            .unwrap();

        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.open_lots.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let outcome = FifoLotMatcher::new().match_instrument("X", &[]).unwrap();
        assert!(outcome.matches.is_empty());
        assert!(outcome.open_lots.is_empty());
    }

    #[test]
    fn test_equal_timestamps_use_input_order() {
        let executions = vec![
            buy("X", 5, 1, 100),
            buy("X", 5, 1, 200),
            sell("X", 5, 1, 150),
        ];

        let outcome = FifoLotMatcher::new()
            .match_instrument("X", &executions)
            .unwrap();

        assert_eq!(outcome.matches[0].buy_price(), px(100));
        assert_eq!(outcome.open_lots.front().unwrap().price(), px(200));
    }

    #[test]
    fn test_order_ids_flow_into_matches() {
        let executions = vec![
            buy("X", 1, 2, 100).with_order_id("B-1"),
            sell("X", 2, 2, 101).with_order_id("S-1"),
        ];

        let outcome = FifoLotMatcher::new()
            .match_instrument("X", &executions)
            .unwrap();

        assert_eq!(outcome.matches[0].buy_order_id(), Some("B-1"));
        assert_eq!(outcome.matches[0].sell_order_id(), Some("S-1"));
    }

    #[test]
    fn test_rejects_foreign_instrument() {
        let executions = vec![buy("X", 1, 1, 100), sell("Y", 2, 1, 100)];

        let result = FifoLotMatcher::new().match_instrument("X", &executions);
        assert_eq!(
            result.unwrap_err(),
            PnlError::InstrumentMismatch {
                expected: "X".to_string(),
                found: "Y".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_out_of_order_input() {
        let executions = vec![buy("X", 2, 1, 100), sell("X", 1, 1, 100)];

        let result = FifoLotMatcher::new().match_instrument("X", &executions);
        assert!(matches!(result, Err(PnlError::OutOfOrder { .. })));
    }

    #[test]
    fn test_rejects_unvalidated_execution() {
        let mut bad = buy("X", 1, 1, 100);
        bad.quantity = 0;

        let result = FifoLotMatcher::new().match_instrument("X", &[bad]);
        assert!(matches!(result, Err(PnlError::InvalidExecution { .. })));
    }

    #[test]
    fn test_matcher_name() {
        assert_eq!(FifoLotMatcher::new().name(), "FIFO");
    }
}
