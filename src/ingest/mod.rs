// ============================================================================
// Ingest Module
// Boundary validation between broker order data and the matcher
// ============================================================================
//
// The matcher assumes clean input. Everything that is not a completed BUY or
// SELL with a positive quantity and a non-negative price stops here.

mod order_record;

pub use order_record::{OrderRecord, RejectionReason, COMPLETE_STATUS};

use crate::domain::{Execution, InvalidPolicy};
use crate::error::{PnlError, PnlResult};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::Serialize;

/// An order record that did not become an execution
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Rejection {
    pub order_id: String,
    pub instrument: String,
    pub reason: RejectionReason,
}

/// Executions accepted at the boundary, plus what was dropped
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub executions: Vec<Execution>,
    pub rejections: Vec<Rejection>,
}

/// Filter and convert broker order records into executions.
///
/// Incomplete orders are always skipped. Data errors (unsupported side,
/// non-positive quantity, bad price, missing symbol) are skipped under
/// `InvalidPolicy::Skip` and fail the call under `InvalidPolicy::Reject`.
/// Record order is preserved.
pub fn ingest<'a, I>(records: I, policy: InvalidPolicy) -> PnlResult<IngestOutcome>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut outcome = IngestOutcome::default();

    for record in records {
        match record.to_execution() {
            Ok(execution) => outcome.executions.push(execution),
            Err(reason) => {
                if policy == InvalidPolicy::Reject && reason.is_data_error() {
                    return Err(PnlError::invalid(format!(
                        "order {}: {}",
                        record.order_id, reason
                    )));
                }

                debug!(
                    order_id = %record.order_id,
                    instrument = %record.tradingsymbol,
                    %reason,
                    "order record skipped"
                );
                outcome.rejections.push(Rejection {
                    order_id: record.order_id.clone(),
                    instrument: record.tradingsymbol.clone(),
                    reason,
                });
            }
        }
    }

    Ok(outcome)
}
