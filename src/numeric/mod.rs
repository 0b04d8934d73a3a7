// ============================================================================
// Numeric Module
// Fixed-point arithmetic for prices and realized P&L
// ============================================================================
//
// This module provides:
// - FixedDecimal<D>: Fixed-point decimal with compile-time precision
// - NumericError: Error types for arithmetic operations
// - Price/Pnl type aliases (micro-unit precision)
// - checked_quantity_sum: overflow-checked totals of u64 quantities
//
// Design principles:
// - No floating-point operations on money
// - All arithmetic returns Result (no panics)
// - i64 storage, i128 intermediates for products
// - rust_decimal::Decimal only at API boundaries

mod errors;
mod fixed_decimal;
mod quantity;

pub use errors::{NumericError, NumericResult};
pub use fixed_decimal::{FixedDecimal, Pnl, Price};
pub use quantity::checked_quantity_sum;
