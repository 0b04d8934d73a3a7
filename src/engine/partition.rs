// ============================================================================
// Sequencing and Instrument Partitioning
// Prepares matcher input: chronological order, one list per instrument
// ============================================================================

use crate::domain::{Execution, OrderingPolicy};
use std::collections::HashMap;

/// One instrument's executions, in the order the matcher must see them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentPartition {
    pub instrument: String,
    pub executions: Vec<Execution>,
}

/// Put executions into matching order.
///
/// `StableSort` sorts by timestamp and keeps input order among equal
/// timestamps. `Strict` leaves the input untouched; the matcher rejects any
/// instrument whose timestamps go backwards.
pub fn sequence(mut executions: Vec<Execution>, ordering: OrderingPolicy) -> Vec<Execution> {
    if ordering == OrderingPolicy::StableSort {
        executions.sort_by_key(|execution| execution.timestamp);
    }
    executions
}

/// Group executions by instrument.
///
/// Partitions appear in order of each instrument's first execution and keep
/// their executions in input order, so the concatenated output is
/// instrument-then-chronological.
pub fn partition_by_instrument(executions: Vec<Execution>) -> Vec<InstrumentPartition> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut partitions: Vec<InstrumentPartition> = Vec::new();

    for execution in executions {
        let slot = match index.get(&execution.instrument) {
            Some(&slot) => slot,
            None => {
                index.insert(execution.instrument.clone(), partitions.len());
                partitions.push(InstrumentPartition {
                    instrument: execution.instrument.clone(),
                    executions: Vec::new(),
                });
                partitions.len() - 1
            }
        };
        partitions[slot].executions.push(execution);
    }

    partitions
}
