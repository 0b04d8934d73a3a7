// ============================================================================
// Execution Domain Model
// ============================================================================

use crate::error::{PnlError, PnlResult};
use crate::numeric::Price;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = PnlError;

    /// Accepts broker transaction types (`BUY`, `sell`, ...); anything else is
    /// an invalid execution.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(PnlError::invalid(format!(
                "unsupported transaction type {other:?}"
            ))),
        }
    }
}

/// One completed trade fill.
///
/// Executions of the same `instrument` are matched against each other and
/// nothing else. `order_id` is carried through to the realized matches for
/// display only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Execution {
    pub instrument: String,
    pub side: Side,
    /// Units transacted, always > 0 once validated
    pub quantity: u64,
    pub price: Price,
    pub timestamp: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub order_id: Option<String>,
}

impl Execution {
    /// Create a validated execution.
    ///
    /// # Errors
    /// `InvalidExecution` for an empty instrument, zero quantity or a
    /// negative price.
    pub fn new(
        instrument: impl Into<String>,
        side: Side,
        quantity: u64,
        price: Price,
        timestamp: DateTime<Utc>,
    ) -> PnlResult<Self> {
        let execution = Self {
            instrument: instrument.into(),
            side,
            quantity,
            price,
            timestamp,
            order_id: None,
        };
        execution.validate()?;
        Ok(execution)
    }

    pub fn buy(
        instrument: impl Into<String>,
        quantity: u64,
        price: Price,
        timestamp: DateTime<Utc>,
    ) -> PnlResult<Self> {
        Self::new(instrument, Side::Buy, quantity, price, timestamp)
    }

    pub fn sell(
        instrument: impl Into<String>,
        quantity: u64,
        price: Price,
        timestamp: DateTime<Utc>,
    ) -> PnlResult<Self> {
        Self::new(instrument, Side::Sell, quantity, price, timestamp)
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    /// Check the execution invariants.
    ///
    /// Fields are public, so the matcher re-checks every execution it is
    /// handed rather than trusting construction.
    pub fn validate(&self) -> PnlResult<()> {
        if self.instrument.trim().is_empty() {
            return Err(PnlError::invalid("instrument cannot be empty"));
        }
        if self.quantity == 0 {
            return Err(PnlError::invalid(format!(
                "{} {} quantity must be positive",
                self.instrument, self.side
            )));
        }
        if self.price.is_negative() {
            return Err(PnlError::invalid(format!(
                "{} {} price {} is negative",
                self.instrument, self.side, self.price
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }
}
