// ============================================================================
// P&L Engine Configuration
// Ordering, validation and execution behaviour of the realized P&L pipeline
// ============================================================================

use crate::error::{PnlError, PnlResult};
use crate::numeric::Pnl;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Ordering Policy
// ============================================================================

/// How the engine treats execution order before matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderingPolicy {
    /// Stable sort by timestamp; equal timestamps keep input order
    /// - Use case: broker order books, which list newest first or unordered
    #[default]
    StableSort,

    /// Input must already be non-decreasing per instrument
    /// - Use case: replaying an audited, sequenced execution log
    Strict,
}

// ============================================================================
// Invalid Record Policy
// ============================================================================

/// What ingest does with records that are not valid executions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InvalidPolicy {
    /// Drop the record and list it in the report's rejections
    #[default]
    Skip,

    /// Fail the whole run on the first invalid record
    Reject,
}

// ============================================================================
// Complete Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PnlConfig {
    pub ordering: OrderingPolicy,

    pub invalid_policy: InvalidPolicy,

    /// Match instruments on scoped worker threads
    pub parallel: bool,

    /// Minimum number of instruments before worker threads are used
    pub parallel_threshold: usize,

    /// Decimal places of P&L in display records (0..=6)
    pub display_decimals: u32,
}

impl Default for PnlConfig {
    fn default() -> Self {
        Self {
            ordering: OrderingPolicy::StableSort,
            invalid_policy: InvalidPolicy::Skip,
            parallel: false,
            parallel_threshold: 8,
            display_decimals: 2,
        }
    }
}

/// Largest display precision, the native scale of `Pnl`
const MAX_DISPLAY_DECIMALS: u32 = 6;

impl PnlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set ordering policy
    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Builder method: Set invalid record policy
    pub fn with_invalid_policy(mut self, policy: InvalidPolicy) -> Self {
        self.invalid_policy = policy;
        self
    }

    /// Builder method: Enable parallel matching above `threshold` instruments
    pub fn with_parallel(mut self, threshold: usize) -> Self {
        self.parallel = true;
        self.parallel_threshold = threshold;
        self
    }

    /// Builder method: Set display precision
    pub fn with_display_decimals(mut self, decimals: u32) -> Self {
        self.display_decimals = decimals;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> PnlResult<()> {
        if self.display_decimals > MAX_DISPLAY_DECIMALS {
            return Err(PnlError::InvalidConfig(format!(
                "display decimals {} exceed the {} supported by P&L values",
                self.display_decimals, MAX_DISPLAY_DECIMALS
            )));
        }

        if self.parallel && self.parallel_threshold == 0 {
            return Err(PnlError::InvalidConfig(
                "parallel threshold must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether a run over `partitions` instruments should use worker threads
    pub(crate) fn use_workers(&self, partitions: usize) -> bool {
        self.parallel && partitions >= self.parallel_threshold.max(2)
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl PnlConfig {
    /// Daily broker order export
    /// - Sorts by order timestamp
    /// - Skips cancelled/rejected/unsupported records
    /// - Rupee/dollar display (2 decimals)
    pub fn broker_export() -> Self {
        Self::default()
    }

    /// Audited execution log
    /// - Input must already be sequenced
    /// - Any invalid record fails the run
    /// - Full P&L precision in display records
    pub fn strict() -> Self {
        Self::new()
            .with_ordering(OrderingPolicy::Strict)
            .with_invalid_policy(InvalidPolicy::Reject)
            .with_display_decimals(Pnl::SCALE.ilog10())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PnlConfig::default();
        assert_eq!(config.ordering, OrderingPolicy::StableSort);
        assert_eq!(config.invalid_policy, InvalidPolicy::Skip);
        assert!(!config.parallel);
        assert_eq!(config.display_decimals, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = PnlConfig::new()
            .with_parallel(4)
            .with_display_decimals(4)
            .with_invalid_policy(InvalidPolicy::Reject);

        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 4);
        assert_eq!(config.display_decimals, 4);
        assert_eq!(config.invalid_policy, InvalidPolicy::Reject);
    }

    #[test]
    fn test_validation() {
        let too_precise = PnlConfig::new().with_display_decimals(7);
        assert!(matches!(
            too_precise.validate(),
            Err(PnlError::InvalidConfig(_))
        ));

        let no_threshold = PnlConfig::new().with_parallel(0);
        assert!(no_threshold.validate().is_err());
    }

    #[test]
    fn test_preset_configs() {
        let strict = PnlConfig::strict();
        assert_eq!(strict.ordering, OrderingPolicy::Strict);
        assert_eq!(strict.invalid_policy, InvalidPolicy::Reject);
        assert_eq!(strict.display_decimals, 6);
        assert!(strict.validate().is_ok());

        assert_eq!(PnlConfig::broker_export(), PnlConfig::default());
    }

    #[test]
    fn test_use_workers() {
        let config = PnlConfig::new().with_parallel(3);
        assert!(!config.use_workers(2));
        assert!(config.use_workers(3));

        // A single instrument never needs a worker
        assert!(!PnlConfig::new().with_parallel(1).use_workers(1));
        assert!(!PnlConfig::new().use_workers(100));
    }
}
