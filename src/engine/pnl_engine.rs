// ============================================================================
// P&L Engine
// Sequences, partitions, matches and aggregates trade executions
// ============================================================================

use crate::domain::{Execution, InstrumentOutcome, InstrumentSummary, PnlConfig};
use crate::engine::aggregator;
use crate::engine::partition::{partition_by_instrument, sequence, InstrumentPartition};
use crate::error::{PnlError, PnlResult};
use crate::ingest::{self, OrderRecord};
use crate::interfaces::{EventHandler, LotMatcher, PnlEvent};
use crate::report::PnlReport;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use tracing::info;

/// Realized P&L pipeline with a pluggable lot matcher
pub struct PnlEngine {
    config: PnlConfig,

    /// Pluggable lot matcher, shared read-only by all workers
    matcher: Box<dyn LotMatcher>,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,
}

impl PnlEngine {
    /// Create a new engine
    pub fn new(
        config: PnlConfig,
        matcher: Box<dyn LotMatcher>,
        event_handler: Arc<dyn EventHandler>,
    ) -> Self {
        Self {
            config,
            matcher,
            event_handler,
        }
    }

    pub fn config(&self) -> &PnlConfig {
        &self.config
    }

    pub fn matcher_name(&self) -> &str {
        self.matcher.name()
    }

    /// Compute realized P&L for already-validated executions.
    ///
    /// Executions may cover any number of instruments in any interleaving.
    /// The input is not modified; running twice on the same input yields the
    /// same report.
    pub fn run(&self, executions: &[Execution]) -> PnlResult<PnlReport> {
        self.config.validate()?;

        let ordered = sequence(executions.to_vec(), self.config.ordering);
        let partitions = partition_by_instrument(ordered);
        let outcomes = if self.config.use_workers(partitions.len()) {
            self.match_on_workers(&partitions)?
        } else {
            self.match_serial(&partitions)?
        };

        let mut events = Vec::new();
        let mut matches = Vec::new();
        let mut instruments = Vec::with_capacity(outcomes.len());

        for outcome in outcomes {
            let summary = InstrumentSummary {
                instrument: outcome.instrument.clone(),
                statistics: aggregator::summarize(&outcome.matches)?,
                unmatched_sell_quantity: outcome.unmatched_sell_quantity()?,
                open_quantity: outcome.open_lots.open_quantity()?,
            };

            events.extend(
                outcome
                    .matches
                    .iter()
                    .cloned()
                    .map(|realized| PnlEvent::MatchRealized { realized }),
            );
            events.extend(
                outcome
                    .unmatched_sells
                    .into_iter()
                    .map(|unmatched| PnlEvent::SellRemainderUnmatched { unmatched }),
            );
            events.push(PnlEvent::InstrumentCompleted {
                instrument: summary.instrument.clone(),
                matches: outcome.matches.len(),
                open_quantity: summary.open_quantity,
                unmatched_sell_quantity: summary.unmatched_sell_quantity,
            });

            matches.extend(outcome.matches);
            instruments.push(summary);
        }

        let summary = aggregator::summarize(&matches)?;
        let records = aggregator::match_records(&matches, self.config.display_decimals)?;

        info!(
            matcher = self.matcher.name(),
            instruments = instruments.len(),
            matches = summary.total_matches,
            net_pnl = %summary.net_pnl,
            win_rate = summary.win_rate,
            "realized P&L computed"
        );
        self.event_handler.on_events(events);

        Ok(PnlReport {
            matches,
            records,
            summary,
            instruments,
            rejections: Vec::new(),
        })
    }

    /// Ingest broker order records, then compute realized P&L.
    ///
    /// Dropped records are reported as `RecordRejected` events and listed on
    /// the report.
    pub fn run_orders(&self, records: &[OrderRecord]) -> PnlResult<PnlReport> {
        let ingested = ingest::ingest(records, self.config.invalid_policy)?;

        self.event_handler.on_events(
            ingested
                .rejections
                .iter()
                .cloned()
                .map(|rejection| PnlEvent::RecordRejected { rejection })
                .collect(),
        );

        let mut report = self.run(&ingested.executions)?;
        report.rejections = ingested.rejections;
        Ok(report)
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn match_serial(&self, partitions: &[InstrumentPartition]) -> PnlResult<Vec<InstrumentOutcome>> {
        partitions
            .iter()
            .map(|p| self.matcher.match_instrument(&p.instrument, &p.executions))
            .collect()
    }

    /// Match partitions on scoped worker threads.
    ///
    /// Each worker takes a contiguous chunk of partitions and results are
    /// joined in chunk order, so the output equals the serial path.
    fn match_on_workers(
        &self,
        partitions: &[InstrumentPartition],
    ) -> PnlResult<Vec<InstrumentOutcome>> {
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(4);
        let chunk_size = partitions.len().div_ceil(workers).max(1);
        let matcher = self.matcher.as_ref();

        let joined = crossbeam::scope(|scope| -> PnlResult<Vec<InstrumentOutcome>> {
            let handles: Vec<_> = partitions
                .chunks(chunk_size)
                .map(|chunk| {
                    let handle = scope.spawn(move |_| {
                        chunk
                            .iter()
                            .map(|p| matcher.match_instrument(&p.instrument, &p.executions))
                            .collect::<PnlResult<Vec<_>>>()
                    });
                    (chunk, handle)
                })
                .collect();

            let mut outcomes = Vec::with_capacity(partitions.len());
            for (chunk, handle) in handles {
                let batch = handle
                    .join()
                    .map_err(|_| PnlError::WorkerPanicked {
                        instruments: instrument_names(chunk),
                    })??;
                outcomes.extend(batch);
            }
            Ok(outcomes)
        });

        joined.map_err(|_| PnlError::WorkerPanicked {
            instruments: instrument_names(partitions),
        })?
    }
}

fn instrument_names(partitions: &[InstrumentPartition]) -> Vec<String> {
    partitions.iter().map(|p| p.instrument.clone()).collect()
}
