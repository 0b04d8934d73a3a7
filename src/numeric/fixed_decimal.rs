// ============================================================================
// Fixed-Point Decimal
// Exact money arithmetic with compile-time precision
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// Fixed-point decimal number with compile-time precision.
///
/// Internally stores `value × 10^DECIMALS` as an i64, so `(sell - buy) * qty`
/// never drifts the way binary floating point does.
///
/// # Type Parameter
/// - `DECIMALS`: Number of decimal places (0-18). Default is 6.
///
/// # Value Range
/// With DECIMALS=6 (default):
/// - Minimum: -9,223,372,036,854.775808
/// - Maximum: +9,223,372,036,854.775807
/// - Precision: 0.000001 (one micro-unit)
///
/// # Example
/// ```
/// use fifo_pnl::numeric::Price;
///
/// let buy: Price = "100.25".parse().unwrap();
/// let sell: Price = "101.75".parse().unwrap();
/// let pnl = sell.checked_sub(buy).unwrap().checked_mul_qty(10).unwrap();
/// assert_eq!(pnl.to_string(), "15.000000");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FixedDecimal<const DECIMALS: u8 = 6>(i64);

/// Compute 10^n at compile time
const fn pow10(n: u8) -> i64 {
    let mut result: i64 = 1;
    let mut i = 0;
    while i < n {
        result *= 10;
        i += 1;
    }
    result
}

impl<const D: u8> FixedDecimal<D> {
    /// The scale factor (10^DECIMALS)
    pub const SCALE: i64 = pow10(D);

    /// Zero value
    pub const ZERO: Self = Self(0);

    /// One (1.0)
    pub const ONE: Self = Self(pow10(D));

    /// Largest representable value
    pub const MAX: Self = Self(i64::MAX);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from the scaled internal representation.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Create from a whole number.
    ///
    /// # Errors
    /// Returns `Overflow` if the value is too large to represent.
    #[inline]
    pub fn from_integer(value: i64) -> NumericResult<Self> {
        value
            .checked_mul(Self::SCALE)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Create from integer and fractional parts, e.g. `(123, 450_000)` is
    /// 123.45 at six decimals. The fraction takes the sign of the integer.
    pub fn from_parts(integer: i64, fraction: u64) -> NumericResult<Self> {
        if fraction >= Self::SCALE as u64 {
            return Err(NumericError::InvalidInput);
        }

        let int_scaled = integer
            .checked_mul(Self::SCALE)
            .ok_or(NumericError::Overflow)?;
        let frac = fraction as i64;
        let raw = if integer < 0 {
            int_scaled.checked_sub(frac)
        } else {
            int_scaled.checked_add(frac)
        };

        raw.map(Self).ok_or(NumericError::Overflow)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub const fn raw_value(self) -> i64 {
        self.0
    }

    /// Integer part, truncated toward zero.
    #[inline]
    pub const fn integer_part(self) -> i64 {
        self.0 / Self::SCALE
    }

    /// Fractional part as a positive scaled value.
    #[inline]
    pub const fn fractional_part(self) -> u64 {
        (self.0 % Self::SCALE).unsigned_abs()
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Checked addition.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_add(rhs.0).map(Self).ok_or(if rhs.0 > 0 {
            NumericError::Overflow
        } else {
            NumericError::Underflow
        })
    }

    /// Checked subtraction.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_sub(rhs.0).map(Self).ok_or(if rhs.0 < 0 {
            NumericError::Overflow
        } else {
            NumericError::Underflow
        })
    }

    /// Checked negation; only the raw value `i64::MIN` has no positive
    /// counterpart.
    #[inline]
    pub fn checked_neg(self) -> NumericResult<Self> {
        self.0.checked_neg().map(Self).ok_or(NumericError::Overflow)
    }

    /// Multiply by a whole unit quantity.
    ///
    /// The product is formed in i128 so only a result that genuinely does not
    /// fit reports an error.
    #[inline]
    pub fn checked_mul_qty(self, quantity: u64) -> NumericResult<Self> {
        let product = (self.0 as i128) * (quantity as i128);
        if product > i64::MAX as i128 {
            Err(NumericError::Overflow)
        } else if product < i64::MIN as i128 {
            Err(NumericError::Underflow)
        } else {
            Ok(Self(product as i64))
        }
    }

    /// Sum an iterator of values, failing on the first overflow.
    pub fn checked_sum<I>(values: I) -> NumericResult<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        values
            .into_iter()
            .try_fold(Self::ZERO, |acc, value| acc.checked_add(value))
    }

    /// Round to `decimals` places, half away from zero.
    ///
    /// Requests at or beyond the native precision return the value unchanged.
    pub fn round_dp(self, decimals: u32) -> NumericResult<Self> {
        if decimals >= D as u32 {
            return Ok(self);
        }

        let step = pow10(D - decimals as u8);
        let mut units = self.0 / step;
        let rest = (self.0 % step).unsigned_abs();
        if rest * 2 >= step.unsigned_abs() {
            units += self.0.signum();
        }

        units
            .checked_mul(step)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    // ========================================================================
    // Boundary conversions
    // ========================================================================

    /// Convert from `rust_decimal::Decimal`.
    ///
    /// # Errors
    /// - `PrecisionLoss` if the value has more than `DECIMALS` places
    /// - `Overflow` if the value is too large
    pub fn from_decimal(value: Decimal) -> NumericResult<Self> {
        if value.scale() > D as u32 && value.round_dp(D as u32) != value {
            return Err(NumericError::PrecisionLoss);
        }

        value
            .checked_mul(Decimal::from(Self::SCALE))
            .and_then(|scaled| scaled.trunc().to_i64())
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Convert to `rust_decimal::Decimal` at exactly `DECIMALS` places.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, D as u32)
    }
}

/// Unchecked negation, for literals and test fixtures.
///
/// Panics in debug builds on the raw value `i64::MIN`; use `checked_neg`
/// for values that come from input.
impl<const D: u8> Neg for FixedDecimal<D> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl<const D: u8> fmt::Debug for FixedDecimal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedDecimal<{}>({})", D, self)
    }
}

impl<const D: u8> fmt::Display for FixedDecimal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let int_part = self.integer_part().unsigned_abs();

        if D == 0 {
            write!(f, "{}{}", sign, int_part)
        } else {
            write!(
                f,
                "{}{}.{:0>width$}",
                sign,
                int_part,
                self.fractional_part(),
                width = D as usize
            )
        }
    }
}

impl<const D: u8> FromStr for FixedDecimal<D> {
    type Err = NumericError;

    /// Parse a plain decimal string such as `"2450.5"`, `"-0.05"` or `"+3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            Some(_) => (false, s),
            None => return Err(NumericError::InvalidInput),
        };

        let (int_str, frac_str) = digits.split_once('.').unwrap_or((digits, ""));
        if int_str.is_empty() && frac_str.is_empty() {
            return Err(NumericError::InvalidInput);
        }
        if !int_str.bytes().chain(frac_str.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(NumericError::InvalidInput);
        }
        if frac_str.len() > D as usize {
            return Err(NumericError::PrecisionLoss);
        }

        let integer: i64 = if int_str.is_empty() {
            0
        } else {
            int_str.parse().map_err(|_| NumericError::Overflow)?
        };
        let fraction: u64 = if frac_str.is_empty() {
            0
        } else {
            format!("{:0<width$}", frac_str, width = D as usize)
                .parse()
                .map_err(|_| NumericError::InvalidInput)?
        };

        let magnitude = Self::from_parts(integer, fraction)?;
        if negative {
            magnitude.checked_neg()
        } else {
            Ok(magnitude)
        }
    }
}

#[cfg(feature = "serde")]
impl<const D: u8> serde::Serialize for FixedDecimal<D> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de, const D: u8> serde::Deserialize<'de> for FixedDecimal<D> {
    fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let value = <Decimal as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_decimal(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Type Aliases
// ============================================================================

/// Execution price with micro-unit precision
pub type Price = FixedDecimal<6>;

/// Realized profit or loss, same scale as `Price`
pub type Pnl = FixedDecimal<6>;
