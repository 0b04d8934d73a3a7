// ============================================================================
// P&L Errors
// Failures raised at the input boundary or as matcher contract violations
// ============================================================================

use crate::numeric::NumericError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors produced while validating executions or computing realized P&L.
///
/// An unmatched sell remainder is not an error. It is counted on the
/// per-instrument outcome instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PnlError {
    /// Quantity, price or side outside the accepted domain
    #[error("invalid execution: {reason}")]
    InvalidExecution { reason: String },

    /// An execution arrived with a timestamp earlier than its predecessor
    #[error("execution for {instrument} at {current} precedes previous execution at {previous}")]
    OutOfOrder {
        instrument: String,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    /// An execution was routed to another instrument's matcher
    #[error("execution for {found} passed to matcher for {expected}")]
    InstrumentMismatch { expected: String, found: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Numeric(#[from] NumericError),

    /// A parallel matching worker panicked
    #[error("matching worker for {instruments:?} panicked")]
    WorkerPanicked { instruments: Vec<String> },
}

impl PnlError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        PnlError::InvalidExecution {
            reason: reason.into(),
        }
    }
}

/// Result type alias for P&L operations
pub type PnlResult<T> = Result<T, PnlError>;
