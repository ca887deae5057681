//! Sub-pixel layout coordinates using saturating fixed-point arithmetic.
//!
//! Every geometric quantity in layout is a 26.6 fixed-point number: 26 integer
//! bits and 6 fractional bits (1/64px precision), stored in an `i32`. All
//! arithmetic saturates at the representable range instead of wrapping, so a
//! pathological subtree (huge margins, `1e9px` widths) degrades to clamped
//! geometry rather than overflowing into negative sizes.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// Fixed-point coordinate in 1/64px units.
///
/// Conversions from floating point truncate toward zero unless
/// `from_float_round` is used. Serialized as CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct LayoutUnit(i32);

impl LayoutUnit {
    /// Number of fractional bits (6 bits = 1/64px precision)
    pub const FRACTIONAL_BITS: u32 = 6;

    /// Scale factor (2^6 = 64)
    pub const SCALE: i32 = 1 << Self::FRACTIONAL_BITS;

    const INT_MAX: i32 = i32::MAX / Self::SCALE;
    const INT_MIN: i32 = i32::MIN / Self::SCALE;

    /// Create from raw 1/64px units
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Create from whole pixels, saturating outside the 26-bit integer range.
    #[inline]
    pub const fn from_int(pixels: i32) -> Self {
        if pixels > Self::INT_MAX {
            Self(i32::MAX)
        } else if pixels < Self::INT_MIN {
            Self(i32::MIN)
        } else {
            Self(pixels * Self::SCALE)
        }
    }

    /// Create from pixels, truncating toward zero. NaN maps to zero.
    #[inline]
    pub fn from_f32(pixels: f32) -> Self {
        Self((pixels * Self::SCALE as f32) as i32)
    }

    /// Create from pixels, truncating toward zero. NaN maps to zero.
    #[inline]
    pub fn from_f64(pixels: f64) -> Self {
        Self((pixels * f64::from(Self::SCALE)) as i32)
    }

    /// Create from pixels, rounding half away from zero to the nearest 1/64.
    #[inline]
    pub fn from_float_round(pixels: f32) -> Self {
        let half_epsilon = Self::epsilon_f32() / 2.0;
        if pixels >= 0.0 {
            Self::from_f64(f64::from(pixels + half_epsilon))
        } else {
            Self::from_f64(f64::from(pixels - half_epsilon))
        }
    }

    /// Convert to pixels (f32)
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::SCALE as f32
    }

    /// Convert to pixels (f64)
    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(Self::SCALE)
    }

    /// Whole pixels, truncating toward zero.
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 / Self::SCALE
    }

    /// Whole pixels, rounding toward negative infinity.
    #[inline]
    pub const fn floor(self) -> i32 {
        if self.0 <= i32::MIN + Self::SCALE - 1 {
            return Self::INT_MIN;
        }
        self.0 >> Self::FRACTIONAL_BITS
    }

    /// Whole pixels, rounding toward positive infinity.
    #[inline]
    pub const fn ceil(self) -> i32 {
        if self.0 >= i32::MAX - Self::SCALE + 1 {
            return Self::INT_MAX;
        }
        if self.0 >= 0 {
            return (self.0 + Self::SCALE - 1) / Self::SCALE;
        }
        self.to_int()
    }

    /// Whole pixels, rounding half away from zero.
    #[inline]
    pub const fn round(self) -> i32 {
        if self.0 > 0 {
            return self.0.saturating_add(Self::SCALE / 2) / Self::SCALE;
        }
        self.0.saturating_sub(Self::SCALE / 2 - 1) / Self::SCALE
    }

    /// Get the raw 1/64px value
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Zero value
    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Largest representable value; doubles as the "infinite" sentinel.
    #[inline]
    pub const fn max_value() -> Self {
        Self(i32::MAX)
    }

    /// Smallest representable value.
    #[inline]
    pub const fn min_value() -> Self {
        Self(i32::MIN)
    }

    /// The smallest positive value, 1/64px.
    #[inline]
    pub const fn epsilon() -> Self {
        Self(1)
    }

    #[inline]
    fn epsilon_f32() -> f32 {
        1.0 / Self::SCALE as f32
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Absolute value
    #[inline]
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Negative values become zero.
    #[inline]
    #[must_use]
    pub const fn clamp_negative_to_zero(self) -> Self {
        if self.0 < 0 { Self(0) } else { self }
    }
}

impl From<f32> for LayoutUnit {
    #[inline]
    fn from(pixels: f32) -> Self {
        Self::from_f32(pixels)
    }
}

impl From<LayoutUnit> for f32 {
    #[inline]
    fn from(unit: LayoutUnit) -> Self {
        unit.to_f32()
    }
}

impl fmt::Display for LayoutUnit {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}px", self.to_f32())
    }
}

// Arithmetic operations saturate at the representable range.
impl Add for LayoutUnit {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for LayoutUnit {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for LayoutUnit {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for LayoutUnit {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for LayoutUnit {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Mul for LayoutUnit {
    type Output = Self;

    /// Fixed-point product, saturating toward the sign of the true result.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let product = i64::from(self.0) * i64::from(rhs.0) / i64::from(Self::SCALE);
        let saturated = if (self.0 ^ rhs.0) < 0 {
            i32::MIN
        } else {
            i32::MAX
        };
        Self(i32::try_from(product).unwrap_or(saturated))
    }
}

impl Mul<i32> for LayoutUnit {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        self * Self::from_int(rhs)
    }
}

impl Div for LayoutUnit {
    type Output = Self;

    /// Fixed-point quotient. Division by zero saturates toward the dividend's
    /// sign (and yields zero for `0 / 0`).
    #[inline]
    fn div(self, rhs: Self) -> Self {
        if rhs.0 == 0 {
            return match self.0.signum() {
                1 => Self::max_value(),
                -1 => Self::min_value(),
                _ => Self::zero(),
            };
        }
        let quotient = i64::from(self.0) * i64::from(Self::SCALE) / i64::from(rhs.0);
        let clamped = quotient.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        Self(i32::try_from(clamped).unwrap_or_default())
    }
}

impl Div<i32> for LayoutUnit {
    type Output = Self;

    #[inline]
    fn div(self, rhs: i32) -> Self {
        self / Self::from_int(rhs)
    }
}

impl Sum for LayoutUnit {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, value| acc + value)
    }
}

impl<'unit> Sum<&'unit Self> for LayoutUnit {
    fn sum<I: Iterator<Item = &'unit Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test basic conversions between pixels and layout units.
    ///
    /// # Panics
    /// Panics if conversions do not match expected values.
    #[test]
    fn test_conversions() {
        assert_eq!(LayoutUnit::from_f32(10.0).raw(), 640);
        assert_eq!(LayoutUnit::from_int(5).raw(), 320);
        assert!((LayoutUnit::from_f32(8.328_125).to_f32() - 8.328_125).abs() < f32::EPSILON);
        // Truncation toward zero, not rounding.
        assert_eq!(LayoutUnit::from_f32(0.999).raw(), 63);
        assert_eq!(LayoutUnit::from_f32(-0.999).raw(), -63);
        assert_eq!(LayoutUnit::from_f32(f32::NAN), LayoutUnit::zero());
    }

    /// Test sub-pixel precision with 1/64px units.
    ///
    /// # Panics
    /// Panics if sub-pixel precision is not maintained.
    #[test]
    fn test_subpixel_precision() {
        let value = LayoutUnit::from_f32(8.328_125);
        assert_eq!(value.raw(), 533);
        assert_eq!(value.to_int(), 8);
        assert_eq!(value.floor(), 8);
        assert_eq!(value.ceil(), 9);
        assert_eq!(value.round(), 8);
        assert_eq!(LayoutUnit::from_f32(-2.5).floor(), -3);
        assert_eq!(LayoutUnit::from_f32(-2.5).ceil(), -2);
        assert_eq!(LayoutUnit::from_f32(-2.5).round(), -3);
    }

    /// # Panics
    /// Panics if rounding to the nearest 1/64 goes the wrong way.
    #[test]
    fn test_round_to_nearest() {
        // 1/128 rounds up to one epsilon; just below it truncates to zero.
        assert_eq!(LayoutUnit::from_float_round(1.0 / 128.0).raw(), 1);
        assert_eq!(LayoutUnit::from_float_round(0.007).raw(), 0);
        assert_eq!(LayoutUnit::from_float_round(-1.0 / 128.0).raw(), -1);
    }

    /// Test arithmetic operations on layout units.
    ///
    /// # Panics
    /// Panics if arithmetic results do not match expected values.
    #[test]
    fn test_arithmetic() {
        let ten = LayoutUnit::from_int(10);
        let five = LayoutUnit::from_int(5);

        assert_eq!(ten + five, LayoutUnit::from_int(15));
        assert_eq!(ten - five, five);
        assert_eq!(ten * 2, LayoutUnit::from_int(20));
        assert_eq!(ten / 2, five);
        assert_eq!(ten * five, LayoutUnit::from_int(50));
        assert_eq!(ten / LayoutUnit::from_int(4), LayoutUnit::from_f32(2.5));
        assert_eq!(LayoutUnit::from_int(100) / 3, LayoutUnit::from_raw(2133));
        let total: LayoutUnit = [ten, five, five].iter().sum();
        assert_eq!(total, LayoutUnit::from_int(20));
    }

    /// # Panics
    /// Panics if any operator wraps instead of saturating.
    #[test]
    fn test_saturation() {
        let max = LayoutUnit::max_value();
        let min = LayoutUnit::min_value();
        assert_eq!(max + LayoutUnit::from_int(1), max);
        assert_eq!(min - LayoutUnit::from_int(1), min);
        assert_eq!(-min, max);
        assert_eq!(min.abs(), max);
        assert_eq!(max * 2, max);
        assert_eq!(max * -2, min);
        assert_eq!(min * LayoutUnit::from_int(3), min);
        assert_eq!(LayoutUnit::from_int(i32::MAX), max);
        assert_eq!(LayoutUnit::from_int(i32::MIN), min);
        assert_eq!(LayoutUnit::from_f32(1.0e12), max);
        assert_eq!(LayoutUnit::from_f32(-1.0e12), min);
    }

    /// # Panics
    /// Panics if division by zero does not saturate toward the dividend's sign.
    #[test]
    fn test_division_by_zero() {
        let zero = LayoutUnit::zero();
        assert_eq!(LayoutUnit::from_int(3) / zero, LayoutUnit::max_value());
        assert_eq!(LayoutUnit::from_int(-3) / zero, LayoutUnit::min_value());
        assert_eq!(zero / zero, zero);
        assert_eq!(LayoutUnit::from_int(3) / 0, LayoutUnit::max_value());
        assert_eq!(LayoutUnit::max_value() / LayoutUnit::epsilon(), LayoutUnit::max_value());
    }

    /// # Panics
    /// Panics if serialization does not go through CSS pixels.
    #[test]
    fn test_serde_as_pixels() {
        let json = serde_json::to_string(&LayoutUnit::from_f32(12.5)).unwrap_or_default();
        assert_eq!(json, "12.5");
        let parsed: Option<LayoutUnit> = serde_json::from_str("7.25").ok();
        assert_eq!(parsed, Some(LayoutUnit::from_raw(464)));
    }
}
