// ============================================================================
// Engine Module
// Contains the lot matching and aggregation business logic
// ============================================================================

mod fifo;
mod pnl_engine;

pub mod aggregator;
pub mod factory;
pub mod partition;

pub use aggregator::{match_records, partition_matches, summarize, MatchPartition};
pub use factory::{create_from_config, PnlEngineBuilder};
pub use fifo::FifoLotMatcher;
pub use partition::{partition_by_instrument, sequence, InstrumentPartition};
pub use pnl_engine::PnlEngine;
