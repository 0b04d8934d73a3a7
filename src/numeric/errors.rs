// ============================================================================
// Numeric Errors
// Error types for fixed-point price and P&L arithmetic
// ============================================================================

use thiserror::Error;

/// Errors that can occur during fixed-point arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum NumericError {
    /// Result exceeded i64::MAX
    #[error("arithmetic overflow: result exceeded maximum value")]
    Overflow,
    /// Result below i64::MIN
    #[error("arithmetic underflow: result below minimum value")]
    Underflow,
    /// Value carries more decimal places than the fixed scale holds
    #[error("precision loss: value has more decimal places than supported")]
    PrecisionLoss,
    /// Input string or value is invalid
    #[error("invalid input: could not parse value")]
    InvalidInput,
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: result exceeded maximum value"
        );
        assert_eq!(
            NumericError::PrecisionLoss.to_string(),
            "precision loss: value has more decimal places than supported"
        );
    }
}
