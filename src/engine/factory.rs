// ============================================================================
// P&L Engine Factory
// Creates P&L engines with proper configuration
// ============================================================================

use crate::domain::{InvalidPolicy, OrderingPolicy, PnlConfig};
use crate::engine::{FifoLotMatcher, PnlEngine};
use crate::error::PnlResult;
use crate::interfaces::{EventHandler, LotMatcher};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a FIFO P&L engine from configuration
///
/// # Arguments
/// * `config` - Pipeline configuration
/// * `event_handler` - Event handler for match and rejection events
///
/// # Example
/// ```
/// use fifo_pnl::prelude::*;
/// use std::sync::Arc;
///
/// let engine = create_from_config(PnlConfig::broker_export(), Arc::new(NoOpEventHandler)).unwrap();
/// assert_eq!(engine.matcher_name(), "FIFO");
/// ```
pub fn create_from_config(
    config: PnlConfig,
    event_handler: Arc<dyn EventHandler>,
) -> PnlResult<PnlEngine> {
    config.validate()?;
    Ok(PnlEngine::new(
        config,
        Box::new(FifoLotMatcher::new()),
        event_handler,
    ))
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating P&L engines with fluent API
///
/// # Example
/// ```
/// use fifo_pnl::prelude::*;
/// use std::sync::Arc;
///
/// let engine = PnlEngineBuilder::new()
///     .strict_ordering()
///     .reject_invalid()
///     .parallel(4)
///     .build(Arc::new(NoOpEventHandler))
///     .unwrap();
///
/// assert!(engine.config().parallel);
/// ```
pub struct PnlEngineBuilder {
    config: PnlConfig,
    matcher: Option<Box<dyn LotMatcher>>,
}

impl PnlEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: PnlConfig::default(),
            matcher: None,
        }
    }

    /// Start from an existing configuration
    pub fn with_config(config: PnlConfig) -> Self {
        Self {
            config,
            matcher: None,
        }
    }

    // ========================================================================
    // Pipeline Configuration
    // ========================================================================

    /// Require executions already in chronological order
    pub fn strict_ordering(mut self) -> Self {
        self.config.ordering = OrderingPolicy::Strict;
        self
    }

    /// Fail the run on the first malformed order record
    pub fn reject_invalid(mut self) -> Self {
        self.config.invalid_policy = InvalidPolicy::Reject;
        self
    }

    /// Match instruments on worker threads once there are at least
    /// `threshold` of them
    pub fn parallel(mut self, threshold: usize) -> Self {
        self.config = self.config.with_parallel(threshold);
        self
    }

    /// Decimal places of the P&L column in display records
    pub fn display_decimals(mut self, decimals: u32) -> Self {
        self.config.display_decimals = decimals;
        self
    }

    /// Replace the default FIFO matcher
    pub fn matcher(mut self, matcher: Box<dyn LotMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Broker order export defaults
    pub fn broker_export() -> Self {
        Self::with_config(PnlConfig::broker_export())
    }

    /// Strict ordering, strict ingest, full precision display
    pub fn strict() -> Self {
        Self::with_config(PnlConfig::strict())
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the P&L engine
    pub fn build(self, event_handler: Arc<dyn EventHandler>) -> PnlResult<PnlEngine> {
        self.config.validate()?;
        let matcher = self
            .matcher
            .unwrap_or_else(|| Box::new(FifoLotMatcher::new()));
        Ok(PnlEngine::new(self.config, matcher, event_handler))
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &PnlConfig {
        &self.config
    }
}

impl Default for PnlEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
