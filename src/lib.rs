// ============================================================================
// FIFO P&L Library
// Realized profit and loss from executed trades via FIFO lot matching
// ============================================================================

//! # FIFO P&L
//!
//! Realized profit-and-loss for a sequence of executed BUY and SELL trades.
//!
//! ## Features
//!
//! - **FIFO lot accounting**: each SELL closes the oldest open BUY lots first
//! - **Per-instrument isolation**: lots never match across instruments
//! - **Fixed-point arithmetic** with checked overflow for prices and P&L
//! - **Broker ingest** that filters incomplete and malformed order records
//! - **Parallel matching** of independent instruments on scoped threads
//! - **Event stream** of realized matches and unmatched sell quantity
//!
//! ## Example
//!
//! ```rust
//! use fifo_pnl::prelude::*;
//! use chrono::{TimeZone, Utc};
//! use std::sync::Arc;
//!
//! let at = |secs| Utc.timestamp_opt(secs, 0).unwrap();
//! let px = |value| Price::from_integer(value).unwrap();
//!
//! let executions = vec![
//!     Execution::buy("INFY", 10, px(100), at(1)).unwrap(),
//!     Execution::buy("INFY", 10, px(110), at(2)).unwrap(),
//!     Execution::sell("INFY", 15, px(120), at(3)).unwrap(),
//! ];
//!
//! let engine = PnlEngineBuilder::new()
//!     .build(Arc::new(NoOpEventHandler))
//!     .unwrap();
//! let report = engine.run(&executions).unwrap();
//!
//! assert_eq!(report.summary.total_matches, 2);
//! assert_eq!(report.summary.net_pnl, Pnl::from_integer(250).unwrap());
//! assert_eq!(report.instrument("INFY").unwrap().open_quantity, 5);
//! ```

pub mod domain;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod interfaces;
pub mod numeric;
pub mod report;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        Execution, InstrumentOutcome, InstrumentSummary, InvalidPolicy, LotQueue, MatchRecord,
        OpenLot, OrderingPolicy, Outcome, PnlConfig, RealizedMatch, Side, SummaryStatistics,
        UnmatchedSell,
    };
    pub use crate::engine::{
        create_from_config, summarize, FifoLotMatcher, PnlEngine, PnlEngineBuilder,
    };
    pub use crate::error::{PnlError, PnlResult};
    pub use crate::ingest::{ingest, OrderRecord, Rejection, RejectionReason};
    pub use crate::interfaces::{
        EventHandler, LoggingEventHandler, LotMatcher, NoOpEventHandler, PnlEvent,
        RecordingEventHandler,
    };
    pub use crate::numeric::{Pnl, Price};
    pub use crate::report::PnlReport;
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn px(value: &str) -> Price {
        value.parse().unwrap()
    }

    fn engine() -> PnlEngine {
        PnlEngineBuilder::new()
            .build(Arc::new(NoOpEventHandler))
            .unwrap()
    }

    fn order(id: &str, symbol: &str, kind: &str, secs: i64, qty: i64, price: &str) -> OrderRecord {
        OrderRecord {
            order_id: id.to_string(),
            tradingsymbol: symbol.to_string(),
            transaction_type: kind.to_string(),
            status: "COMPLETE".to_string(),
            quantity: qty,
            price: Decimal::from_str(price).unwrap(),
            order_timestamp: at(secs),
        }
    }

    #[test]
    fn test_end_to_end_fifo() {
        let executions = vec![
            Execution::buy("X", 10, px("100"), at(1)).unwrap(),
            Execution::buy("X", 10, px("110"), at(2)).unwrap(),
            Execution::sell("X", 15, px("120"), at(3)).unwrap(),
        ];

        let report = engine().run(&executions).unwrap();

        assert_eq!(report.matches.len(), 2);
        assert_eq!(report.matches[0].pnl(), Pnl::from_integer(200).unwrap());
        assert_eq!(report.matches[1].pnl(), Pnl::from_integer(50).unwrap());
        assert_eq!(report.summary.winning_matches, 2);
        assert_eq!(report.summary.win_rate, 100.0);
        assert_eq!(report.winners().len(), 2);
        assert!(report.losers().is_empty());
    }

    #[test]
    fn test_end_to_end_trading_day() {
        let records = vec![
            order("1", "INFY", "BUY", 9 * 3600, 10, "1500.25"),
            order("2", "TCS", "BUY", 9 * 3600 + 60, 5, "3400"),
            order("3", "INFY", "SELL", 10 * 3600, 4, "1510.75"),
            order("4", "TCS", "SELL", 11 * 3600, 5, "3390.5"),
            order("5", "INFY", "SELL", 12 * 3600, 6, "1495"),
            OrderRecord {
                status: "REJECTED".to_string(),
                ..order("6", "INFY", "BUY", 13 * 3600, 1, "1")
            },
        ];

        let report = engine().run_orders(&records).unwrap();

        let pnls: Vec<_> = report.matches.iter().map(|m| m.pnl()).collect();
        assert_eq!(pnls, vec![px("42"), px("-31.5"), px("-47.5")]);

        assert_eq!(report.matches[0].instrument(), "INFY");
        assert_eq!(report.matches[1].instrument(), "INFY");
        assert_eq!(report.matches[2].instrument(), "TCS");

        assert_eq!(report.summary.total_matches, 3);
        assert_eq!(report.summary.total_profit, px("42"));
        assert_eq!(report.summary.total_loss, px("-79"));
        assert_eq!(report.summary.net_pnl, px("-37"));
        assert!((report.summary.win_rate - 100.0 / 3.0).abs() < 1e-9);

        assert_eq!(report.rejections.len(), 1);
        assert!(report.instruments.iter().all(|s| s.is_fully_realized()));
        assert_eq!(report.records[1].pnl, px("-31.5"));
    }

    #[test]
    fn test_display_rounding() {
        let executions = vec![
            Execution::buy("X", 3, px("10.001"), at(1)).unwrap(),
            Execution::sell("X", 3, px("10.0035"), at(2)).unwrap(),
        ];

        let report = engine().run(&executions).unwrap();

        assert_eq!(report.matches[0].pnl(), px("0.0075"));
        assert_eq!(report.records[0].pnl, px("0.01"));
    }

    #[test]
    fn test_unsorted_cross_instrument_input() {
        let executions = vec![
            Execution::sell("B", 10, px("20"), at(4)).unwrap(),
            Execution::sell("A", 10, px("9"), at(3)).unwrap(),
            Execution::buy("B", 10, px("15"), at(2)).unwrap(),
            Execution::buy("A", 10, px("10"), at(1)).unwrap(),
        ];

        let report = engine().run(&executions).unwrap();

        let names: Vec<_> = report.instruments.iter().map(|s| s.instrument.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(report.instrument("A").unwrap().statistics.net_pnl, px("-10"));
        assert_eq!(report.instrument("B").unwrap().statistics.net_pnl, px("50"));
        assert_eq!(report.summary.net_pnl, px("40"));
    }

    #[test]
    fn test_logging_handler_accepts_events() {
        let engine = PnlEngineBuilder::new()
            .build(Arc::new(LoggingEventHandler))
            .unwrap();
        let executions = vec![Execution::sell("X", 1, px("1"), at(1)).unwrap()];

        let report = engine.run(&executions).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.total_unmatched_sell_quantity(), Ok(1));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_report_to_json() {
        let executions = vec![
            Execution::buy("X", 1, px("100"), at(1)).unwrap(),
            Execution::sell("X", 1, px("101.5"), at(2)).unwrap(),
        ];

        let json = engine().run(&executions).unwrap().to_json().unwrap();
        assert!(json.contains("\"net_pnl\": \"1.500000\""));
        assert!(json.contains("\"instrument\": \"X\""));
    }
}

#[cfg(test)]
mod property_tests {
    use super::prelude::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use std::sync::Arc;

    const INSTRUMENTS: [&str; 3] = ["AAA", "BBB", "CCC"];

    /// (instrument index, is buy, seconds, quantity, price)
    fn arb_execution() -> impl Strategy<Value = (usize, bool, i64, u64, i64)> {
        (0..INSTRUMENTS.len(), any::<bool>(), 0i64..50, 1u64..100, 1i64..1_000)
    }

    fn build(raw: &[(usize, bool, i64, u64, i64)]) -> Vec<Execution> {
        raw.iter()
            .map(|&(instrument, is_buy, secs, qty, price)| {
                let side = if is_buy { Side::Buy } else { Side::Sell };
                Execution::new(
                    INSTRUMENTS[instrument],
                    side,
                    qty,
                    Price::from_integer(price).unwrap(),
                    Utc.timestamp_opt(secs, 0).unwrap(),
                )
                .unwrap()
            })
            .collect()
    }

    fn side_total(executions: &[Execution], instrument: &str, side: Side) -> u64 {
        executions
            .iter()
            .filter(|e| e.instrument == instrument && e.side == side)
            .map(|e| e.quantity)
            .sum()
    }

    fn engine(parallel: bool) -> PnlEngine {
        let builder = PnlEngineBuilder::new();
        let builder = if parallel { builder.parallel(1) } else { builder };
        builder.build(Arc::new(NoOpEventHandler)).unwrap()
    }

    proptest! {
        #[test]
        fn prop_quantity_is_conserved(raw in prop::collection::vec(arb_execution(), 0..60)) {
            let executions = build(&raw);
            let report = engine(false).run(&executions).unwrap();

            for summary in &report.instruments {
                let matched: u64 = report
                    .matches
                    .iter()
                    .filter(|m| m.instrument() == summary.instrument)
                    .map(|m| m.quantity())
                    .sum();
                let bought = side_total(&executions, &summary.instrument, Side::Buy);
                let sold = side_total(&executions, &summary.instrument, Side::Sell);

                prop_assert_eq!(matched + summary.unmatched_sell_quantity, sold);
                prop_assert_eq!(matched + summary.open_quantity, bought);
            }
        }

        #[test]
        fn prop_matches_never_cross_instruments(raw in prop::collection::vec(arb_execution(), 0..60)) {
            let executions = build(&raw);
            let report = engine(false).run(&executions).unwrap();

            for realized in &report.matches {
                prop_assert!(realized.buy_timestamp() <= realized.sell_timestamp());
                let from_own_buy = executions.iter().any(|e| {
                    e.side == Side::Buy
                        && e.instrument == realized.instrument()
                        && e.timestamp == realized.buy_timestamp()
                        && e.price == realized.buy_price()
                });
                prop_assert!(from_own_buy);
            }
        }

        #[test]
        fn prop_runs_are_idempotent(raw in prop::collection::vec(arb_execution(), 0..60)) {
            let executions = build(&raw);
            let engine = engine(false);

            let first = engine.run(&executions).unwrap();
            let second = engine.run(&executions).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_parallel_equals_serial(raw in prop::collection::vec(arb_execution(), 0..60)) {
            let executions = build(&raw);

            let serial = engine(false).run(&executions).unwrap();
            let parallel = engine(true).run(&executions).unwrap();
            prop_assert_eq!(serial, parallel);
        }
    }
}
