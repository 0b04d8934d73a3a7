// ============================================================================
// Event Handler Interface
// Defines the contract for observing the realized P&L pipeline
// ============================================================================

use crate::domain::{RealizedMatch, UnmatchedSell};
use crate::ingest::Rejection;
use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Events emitted by the P&L engine
///
/// Ingest rejections come first. Each instrument then reports its matches
/// and unmatched remainders before its `InstrumentCompleted`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum PnlEvent {
    /// Ingest dropped an order record
    RecordRejected { rejection: Rejection },

    /// SELL quantity resolved against an open lot
    MatchRealized { realized: RealizedMatch },

    /// SELL quantity with no open lot left to match
    SellRemainderUnmatched { unmatched: UnmatchedSell },

    /// All executions for an instrument have been matched
    InstrumentCompleted {
        instrument: String,
        matches: usize,
        open_quantity: u64,
        unmatched_sell_quantity: u64,
    },
}

/// Event handler trait for processing engine events
/// Implementations can handle logging, metrics, notifications, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a single event
    fn on_event(&self, event: PnlEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<PnlEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: PnlEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: PnlEvent) {
        match &event {
            PnlEvent::SellRemainderUnmatched { unmatched } => tracing::info!(
                instrument = %unmatched.instrument,
                quantity = unmatched.quantity,
                "sell quantity excluded from realized P&L"
            ),
            _ => tracing::debug!("P&L engine event: {:?}", event),
        }
    }
}

/// Buffers every event it receives, for tests and deferred reporting
#[derive(Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<PnlEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events received so far
    pub fn events(&self) -> Vec<PnlEvent> {
        self.events.lock().clone()
    }

    /// Drain the buffer
    pub fn take(&self) -> Vec<PnlEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventHandler for RecordingEventHandler {
    fn on_event(&self, event: PnlEvent) {
        self.events.lock().push(event);
    }

    fn on_events(&self, events: Vec<PnlEvent>) {
        self.events.lock().extend(events);
    }
}
