// ============================================================================
// Realized Match Domain Model
// ============================================================================

use crate::error::{PnlError, PnlResult};
use crate::numeric::{Pnl, Price};
use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Classification of a realized match by the sign of its P&L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Outcome {
    Win,
    Loss,
    Breakeven,
}

impl Outcome {
    pub fn of(pnl: Pnl) -> Self {
        if pnl.is_positive() {
            Outcome::Win
        } else if pnl.is_negative() {
            Outcome::Loss
        } else {
            Outcome::Breakeven
        }
    }
}

/// SELL quantity resolved against one open BUY lot (or part of one).
///
/// Immutable once created. `pnl` is always
/// `(sell_price - buy_price) * quantity`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RealizedMatch {
    instrument: String,
    quantity: u64,
    buy_price: Price,
    sell_price: Price,
    buy_timestamp: DateTime<Utc>,
    sell_timestamp: DateTime<Utc>,
    pnl: Pnl,
    buy_order_id: Option<String>,
    sell_order_id: Option<String>,
}

impl RealizedMatch {
    /// Create a match and compute its P&L.
    ///
    /// # Errors
    /// `InvalidExecution` for a zero quantity, `Numeric` if the P&L does not
    /// fit the fixed-point range.
    pub fn new(
        instrument: impl Into<String>,
        quantity: u64,
        buy_price: Price,
        sell_price: Price,
        buy_timestamp: DateTime<Utc>,
        sell_timestamp: DateTime<Utc>,
    ) -> PnlResult<Self> {
        if quantity == 0 {
            return Err(PnlError::invalid("matched quantity must be positive"));
        }
        let pnl = sell_price.checked_sub(buy_price)?.checked_mul_qty(quantity)?;

        Ok(Self {
            instrument: instrument.into(),
            quantity,
            buy_price,
            sell_price,
            buy_timestamp,
            sell_timestamp,
            pnl,
            buy_order_id: None,
            sell_order_id: None,
        })
    }

    pub fn with_order_ids(mut self, buy: Option<String>, sell: Option<String>) -> Self {
        self.buy_order_id = buy;
        self.sell_order_id = sell;
        self
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn buy_price(&self) -> Price {
        self.buy_price
    }

    pub fn sell_price(&self) -> Price {
        self.sell_price
    }

    pub fn buy_timestamp(&self) -> DateTime<Utc> {
        self.buy_timestamp
    }

    pub fn sell_timestamp(&self) -> DateTime<Utc> {
        self.sell_timestamp
    }

    pub fn pnl(&self) -> Pnl {
        self.pnl
    }

    pub fn buy_order_id(&self) -> Option<&str> {
        self.buy_order_id.as_deref()
    }

    pub fn sell_order_id(&self) -> Option<&str> {
        self.sell_order_id.as_deref()
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::of(self.pnl)
    }
}
