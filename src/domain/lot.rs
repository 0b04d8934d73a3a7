// ============================================================================
// Open Lot Queue
// FIFO queue of unconsumed BUY quantity for a single instrument
// ============================================================================

use super::Execution;
use crate::numeric::{checked_quantity_sum, NumericResult, Price};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A BUY execution, or the part of it not yet matched against a SELL.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OpenLot {
    remaining_quantity: u64,
    original_quantity: u64,
    price: Price,
    timestamp: DateTime<Utc>,
    order_id: Option<String>,
}

impl OpenLot {
    fn from_buy(execution: &Execution) -> Self {
        Self {
            remaining_quantity: execution.quantity,
            original_quantity: execution.quantity,
            price: execution.price,
            timestamp: execution.timestamp,
            order_id: execution.order_id.clone(),
        }
    }

    pub fn remaining_quantity(&self) -> u64 {
        self.remaining_quantity
    }

    pub fn original_quantity(&self) -> u64 {
        self.original_quantity
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }
}

/// The slice of an open lot consumed by one step of a SELL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotFill {
    pub quantity: u64,
    pub price: Price,
    pub timestamp: DateTime<Utc>,
    pub order_id: Option<String>,
    /// The lot reached zero and left the queue
    pub exhausted: bool,
}

/// Per-instrument FIFO of open lots, oldest BUY at the front.
///
/// Lots only ever enter at the back and leave from the front, so equal
/// timestamps keep their input order.
#[derive(Debug, Default, Clone)]
pub struct LotQueue {
    lots: VecDeque<OpenLot>,
}

impl LotQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new lot at the back of the queue.
    pub fn push_buy(&mut self, execution: &Execution) {
        debug_assert!(execution.is_buy());
        self.lots.push_back(OpenLot::from_buy(execution));
    }

    pub fn front(&self) -> Option<&OpenLot> {
        self.lots.front()
    }

    /// Take up to `wanted` units from the oldest lot.
    ///
    /// Returns `None` when the queue is empty. The front lot is popped once
    /// its remaining quantity reaches zero.
    pub fn consume_front(&mut self, wanted: u64) -> Option<LotFill> {
        let front = self.lots.front_mut()?;
        let quantity = wanted.min(front.remaining_quantity);
        front.remaining_quantity -= quantity;

        let fill = LotFill {
            quantity,
            price: front.price,
            timestamp: front.timestamp,
            order_id: front.order_id.clone(),
            exhausted: front.remaining_quantity == 0,
        };
        if fill.exhausted {
            self.lots.pop_front();
        }
        Some(fill)
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    /// Total BUY quantity still open.
    pub fn open_quantity(&self) -> NumericResult<u64> {
        checked_quantity_sum(self.lots.iter().map(|lot| lot.remaining_quantity))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OpenLot> {
        self.lots.iter()
    }

    pub fn into_lots(self) -> Vec<OpenLot> {
        self.lots.into()
    }
}
