// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod event_handler;
mod lot_matcher;

pub use event_handler::{
    EventHandler, LoggingEventHandler, NoOpEventHandler, PnlEvent, RecordingEventHandler,
};
pub use lot_matcher::LotMatcher;
