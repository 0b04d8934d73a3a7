// ============================================================================
// Trade Tracker Example
// ============================================================================
//
// Run with: RUST_LOG=fifo_pnl=debug cargo run --example trade_tracker --features logging

use chrono::{DateTime, TimeZone, Utc};
use fifo_pnl::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn order(
    id: &str,
    symbol: &str,
    kind: &str,
    status: &str,
    quantity: i64,
    price: Decimal,
    time: DateTime<Utc>,
) -> OrderRecord {
    OrderRecord {
        order_id: id.to_string(),
        tradingsymbol: symbol.to_string(),
        transaction_type: kind.to_string(),
        status: status.to_string(),
        quantity,
        price,
        order_timestamp: time,
    }
}

/// A day of broker orders, out of order and with a cancelled one mixed in
fn todays_orders() -> Vec<OrderRecord> {
    vec![
        order("240304001", "INFY", "BUY", "COMPLETE", 10, Decimal::new(150025, 2), at(9, 20)),
        order("240304002", "TATAMOTORS", "BUY", "COMPLETE", 50, Decimal::new(95075, 2), at(9, 25)),
        order("240304006", "INFY", "SELL", "COMPLETE", 6, Decimal::new(149500, 2), at(14, 5)),
        order("240304003", "INFY", "BUY", "COMPLETE", 5, Decimal::new(149810, 2), at(10, 0)),
        order("240304004", "INFY", "SELL", "COMPLETE", 4, Decimal::new(151075, 2), at(11, 30)),
        order("240304005", "TATAMOTORS", "SELL", "CANCELLED", 50, Decimal::new(96000, 2), at(12, 0)),
        order("240304007", "TATAMOTORS", "SELL", "COMPLETE", 30, Decimal::new(95810, 2), at(15, 10)),
        order("240304008", "HDFCBANK", "SELL", "COMPLETE", 8, Decimal::new(143240, 2), at(15, 15)),
    ]
}

fn main() -> Result<(), PnlError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fifo_pnl=info")),
        )
        .init();

    println!("=== Trade Tracker ===\n");

    let engine = PnlEngineBuilder::broker_export().build(Arc::new(LoggingEventHandler))?;
    let report = engine.run_orders(&todays_orders())?;

    let summary = &report.summary;
    println!("Total trades : {}", summary.total_matches);
    println!("Winning      : {}", summary.winning_matches);
    println!("Losing       : {}", summary.losing_matches);
    println!("Win rate     : {:.1}%", summary.win_rate);
    println!("Total profit : {:.2}", summary.total_profit.to_decimal());
    println!("Total loss   : {:.2}", summary.total_loss.to_decimal());
    println!("Net P&L      : {:.2}", summary.net_pnl.to_decimal());

    println!("\n=== Matched Trades ===");
    println!(
        "{:<12} {:<17} {:>10} {:<17} {:>10} {:>6} {:>10}",
        "Symbol", "Buy Time", "Buy Price", "Sell Time", "Sell Price", "Qty", "P&L"
    );
    for record in &report.records {
        println!(
            "{:<12} {:<17} {:>10.2} {:<17} {:>10.2} {:>6} {:>10.2}",
            record.instrument,
            record.buy_time.format("%Y-%m-%d %H:%M"),
            record.buy_price.to_decimal(),
            record.sell_time.format("%Y-%m-%d %H:%M"),
            record.sell_price.to_decimal(),
            record.quantity,
            record.pnl.to_decimal(),
        );
    }

    println!("\n=== Per Instrument ===");
    for instrument in &report.instruments {
        println!(
            "{:<12} net {:>10.2}  open {:>4}  unmatched sells {:>4}",
            instrument.instrument,
            instrument.statistics.net_pnl.to_decimal(),
            instrument.open_quantity,
            instrument.unmatched_sell_quantity,
        );
    }

    if !report.rejections.is_empty() {
        println!("\n=== Skipped Orders ===");
        for rejection in &report.rejections {
            println!("{} {}: {}", rejection.order_id, rejection.instrument, rejection.reason);
        }
    }

    Ok(())
}
