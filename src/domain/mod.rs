// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod config;
pub mod execution;
pub mod lot;
pub mod outcome;
pub mod realized;
pub mod summary;

pub use config::{InvalidPolicy, OrderingPolicy, PnlConfig};
pub use execution::{Execution, Side};
pub use lot::{LotFill, LotQueue, OpenLot};
pub use outcome::{InstrumentOutcome, UnmatchedSell};
pub use realized::{Outcome, RealizedMatch};
pub use summary::{InstrumentSummary, MatchRecord, SummaryStatistics};
