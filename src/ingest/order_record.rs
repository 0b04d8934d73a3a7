// ============================================================================
// Broker Order Record
// Raw order rows as returned by a brokerage order-book endpoint
// ============================================================================

use crate::domain::{Execution, Side};
use crate::numeric::Price;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Status a broker reports for a fully executed order
pub const COMPLETE_STATUS: &str = "COMPLETE";

/// One row of a broker's order book.
///
/// Fields follow the broker's naming so a JSON order list deserializes
/// directly (with the `serde` feature). `order_timestamp` accepts RFC 3339
/// or the broker's naive `YYYY-MM-DD HH:MM:SS`, which is read as exchange
/// time (IST, UTC+05:30).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderRecord {
    pub order_id: String,
    pub tradingsymbol: String,
    pub transaction_type: String,
    pub status: String,
    pub quantity: i64,
    pub price: Decimal,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "broker_time::deserialize"))]
    pub order_timestamp: DateTime<Utc>,
}

/// Order timestamps as brokers actually send them
#[cfg(feature = "serde")]
pub(crate) mod broker_time {
    use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer};

    /// Offset of naive exchange timestamps (IST)
    const EXCHANGE_UTC_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognized order timestamp {:?}", text))
        })
    }

    pub(crate) fn parse(text: &str) -> Option<DateTime<Utc>> {
        let trimmed = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(dt.with_timezone(&Utc));
        }

        let exchange = FixedOffset::east_opt(EXCHANGE_UTC_OFFSET_SECS)?;
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .and_then(|naive| exchange.from_local_datetime(&naive).single())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Why an order record did not become an execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum RejectionReason {
    #[error("order status {status:?} is not COMPLETE")]
    Incomplete { status: String },

    #[error("transaction type {transaction_type:?} is neither BUY nor SELL")]
    UnsupportedSide { transaction_type: String },

    #[error("quantity {quantity} is not positive")]
    NonPositiveQuantity { quantity: i64 },

    #[error("price {price} is not a valid execution price: {detail}")]
    InvalidPrice { price: Decimal, detail: String },

    #[error("trading symbol is empty")]
    MissingInstrument,
}

impl RejectionReason {
    /// Incomplete orders are routine in a daily order book, not bad data
    pub fn is_data_error(&self) -> bool {
        !matches!(self, RejectionReason::Incomplete { .. })
    }
}

impl OrderRecord {
    pub fn is_complete(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case(COMPLETE_STATUS)
    }

    /// Convert a completed BUY/SELL row into a validated execution.
    pub fn to_execution(&self) -> Result<Execution, RejectionReason> {
        if !self.is_complete() {
            return Err(RejectionReason::Incomplete {
                status: self.status.clone(),
            });
        }

        let side: Side =
            self.transaction_type
                .parse()
                .map_err(|_| RejectionReason::UnsupportedSide {
                    transaction_type: self.transaction_type.clone(),
                })?;

        let instrument = self.tradingsymbol.trim();
        if instrument.is_empty() {
            return Err(RejectionReason::MissingInstrument);
        }

        let quantity = u64::try_from(self.quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or(RejectionReason::NonPositiveQuantity {
                quantity: self.quantity,
            })?;

        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(RejectionReason::InvalidPrice {
                price: self.price,
                detail: "price is negative".to_string(),
            });
        }
        let price = Price::from_decimal(self.price).map_err(|e| RejectionReason::InvalidPrice {
            price: self.price,
            detail: e.to_string(),
        })?;

        let execution = Execution {
            instrument: instrument.to_string(),
            side,
            quantity,
            price,
            timestamp: self.order_timestamp,
            order_id: Some(self.order_id.clone()),
        };
        Ok(execution)
    }
}
