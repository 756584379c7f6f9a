//! 128-bit packed decimal value type.
//!
//! A [`DecimalValue`] is an immutable (sign, coefficient, exponent) triple
//! packed into a single `u128`. The coefficient carries up to 34 decimal
//! digits; the exponent covers −6176..+6111 and is stored with a +6176 bias.
//!
//! The packing uses the density trick of IEEE 128-bit decimal formats: when
//! the top three bits of the 113-bit coefficient field are at most 7, the
//! coefficient is stored directly and the exponent sits in bits 126..113;
//! otherwise a marker is set, the coefficient's top bit is implied, and the
//! exponent shifts down to make room. Callers never see the shapes — only
//! the logical triple.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// Powers of ten up to `10^38`, the largest that fits a `u128` comfortably.
pub(crate) const POW10: [u128; 39] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
    100_000_000_000_000_000_000,
    1_000_000_000_000_000_000_000,
    10_000_000_000_000_000_000_000,
    100_000_000_000_000_000_000_000,
    1_000_000_000_000_000_000_000_000,
    10_000_000_000_000_000_000_000_000,
    100_000_000_000_000_000_000_000_000,
    1_000_000_000_000_000_000_000_000_000,
    10_000_000_000_000_000_000_000_000_000,
    100_000_000_000_000_000_000_000_000_000,
    1_000_000_000_000_000_000_000_000_000_000,
    10_000_000_000_000_000_000_000_000_000_000,
    100_000_000_000_000_000_000_000_000_000_000,
    1_000_000_000_000_000_000_000_000_000_000_000,
    10_000_000_000_000_000_000_000_000_000_000_000,
    100_000_000_000_000_000_000_000_000_000_000_000,
    1_000_000_000_000_000_000_000_000_000_000_000_000,
    10_000_000_000_000_000_000_000_000_000_000_000_000,
    100_000_000_000_000_000_000_000_000_000_000_000_000,
];

/// `10^n` for `n <= 38`, `None` beyond the table.
pub(crate) fn pow10(n: u32) -> Option<u128> {
    POW10.get(n as usize).copied()
}

/// Number of decimal digits in `value` (1 for zero).
pub(crate) fn digit_count(value: u128) -> u32 {
    match POW10.iter().position(|&p| value < p) {
        Some(n) => (n as u32).max(1),
        None => 39,
    }
}

const SIGN_BIT: u128 = 1 << 127;
const SHAPE_B_MARKER: u128 = 0b11 << 125;
const EXPONENT_MASK: u128 = 0x3FFF; // 14 bits
const COEFF_A_MASK: u128 = (1 << 113) - 1;
const COEFF_B_MASK: u128 = (1 << 111) - 1;
const COEFF_B_IMPLIED: u128 = 1 << 113;

/// A 128-bit packed decimal number.
///
/// Construction goes through [`DecimalValue::pack`], the numeric `From`
/// conversions, or [`DecimalValue::parse`]; all of them normalize and
/// validate, so every held value is inside the 34-digit / −6176..+6111
/// envelope.
#[derive(Clone, Copy)]
pub struct DecimalValue {
    bits: u128,
}

impl DecimalValue {
    /// Largest representable coefficient: 34 nines.
    pub const MAX_COEFFICIENT: u128 = 9_999_999_999_999_999_999_999_999_999_999_999;

    /// Smallest representable exponent.
    pub const MIN_EXPONENT: i32 = -6176;

    /// Largest representable exponent.
    pub const MAX_EXPONENT: i32 = 6111;

    /// Exponent storage bias.
    const EXPONENT_BIAS: i32 = 6176;

    /// Positive zero with exponent 0.
    pub const ZERO: DecimalValue = DecimalValue { bits: 6176 << 113 };

    /// Pack a logical (sign, coefficient, exponent) triple.
    ///
    /// The coefficient is normalized to at most 34 digits by dividing
    /// trailing zero digits off into the exponent. Significant digits are
    /// never dropped: if the coefficient still exceeds 34 digits after
    /// normalization, or the normalized exponent leaves its range, the
    /// result is [`Error::Overflow`].
    pub fn pack(negative: bool, coefficient: u128, exponent: i32) -> Result<Self> {
        let mut coefficient = coefficient;
        let mut exponent = exponent;
        while coefficient > Self::MAX_COEFFICIENT && coefficient % 10 == 0 {
            coefficient /= 10;
            exponent += 1;
        }
        if coefficient > Self::MAX_COEFFICIENT {
            return Err(Error::Overflow);
        }
        if exponent < Self::MIN_EXPONENT || exponent > Self::MAX_EXPONENT {
            return Err(Error::Overflow);
        }
        Ok(Self::encode(negative, coefficient, exponent))
    }

    /// Encode an in-range triple, selecting the storage shape from the
    /// coefficient's top bits.
    fn encode(negative: bool, coefficient: u128, exponent: i32) -> Self {
        let sign = if negative { SIGN_BIT } else { 0 };
        let biased = (exponent + Self::EXPONENT_BIAS) as u128;
        let bits = if coefficient >> 110 <= 0b111 {
            sign | (biased << 113) | coefficient
        } else {
            sign | SHAPE_B_MARKER | (biased << 111) | (coefficient & COEFF_B_MASK)
        };
        DecimalValue { bits }
    }

    /// Reinterpret raw bits as a value, accepting both storage shapes.
    pub(crate) fn from_bits(bits: u128) -> Self {
        DecimalValue { bits }
    }

    /// The raw 128-bit encoding.
    pub(crate) fn to_bits(self) -> u128 {
        self.bits
    }

    /// Decode to the logical (negative, coefficient, exponent) triple.
    pub(crate) fn unpack(&self) -> (bool, u128, i32) {
        let negative = self.bits & SIGN_BIT != 0;
        let (coefficient, biased) = if self.bits & SHAPE_B_MARKER == SHAPE_B_MARKER {
            (
                COEFF_B_IMPLIED | (self.bits & COEFF_B_MASK),
                (self.bits >> 111) & EXPONENT_MASK,
            )
        } else {
            (self.bits & COEFF_A_MASK, (self.bits >> 113) & EXPONENT_MASK)
        };
        (negative, coefficient, biased as i32 - Self::EXPONENT_BIAS)
    }

    /// Whether the sign bit is set.
    pub fn is_negative(&self) -> bool {
        self.bits & SIGN_BIT != 0
    }

    /// The unsigned coefficient (up to 34 digits).
    pub fn coefficient(&self) -> u128 {
        self.unpack().1
    }

    /// The power-of-ten exponent, bias removed.
    pub fn exponent(&self) -> i32 {
        self.unpack().2
    }

    /// Whether the value is exactly zero (any sign, any exponent).
    pub fn is_zero(&self) -> bool {
        self.coefficient() == 0
    }

    /// Whether the value has no fractional part.
    pub fn is_integer(&self) -> bool {
        let (_, coefficient, exponent) = self.unpack();
        if coefficient == 0 || exponent >= 0 {
            return true;
        }
        match pow10(exponent.unsigned_abs()) {
            Some(p) => coefficient % p == 0,
            None => false,
        }
    }

    /// Whether the value fits in `digits` significant digits once trailing
    /// zeros are stripped from the coefficient.
    pub fn has_precision(&self, digits: u32) -> bool {
        let mut coefficient = self.coefficient();
        if coefficient == 0 {
            return true;
        }
        while coefficient % 10 == 0 {
            coefficient /= 10;
        }
        digit_count(coefficient) <= digits
    }

    /// The value as an unsigned magnitude with the exponent applied.
    ///
    /// Requires an exact result: a fractional remainder or a magnitude
    /// beyond `u128` is [`Error::Overflow`].
    fn integral_magnitude(&self) -> Result<u128> {
        let (_, coefficient, exponent) = self.unpack();
        if coefficient == 0 {
            return Ok(0);
        }
        if exponent >= 0 {
            let scale = pow10(exponent as u32).ok_or(Error::Overflow)?;
            coefficient.checked_mul(scale).ok_or(Error::Overflow)
        } else {
            let scale = pow10(exponent.unsigned_abs()).ok_or(Error::Overflow)?;
            if coefficient % scale != 0 {
                return Err(Error::Overflow);
            }
            Ok(coefficient / scale)
        }
    }

    /// Convert through decimal text to the nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        let text = self.format(&crate::decimal::NumberFormat::EXPONENTIAL);
        text.parse().unwrap_or(f64::NAN)
    }

    /// Convert through decimal text to the nearest `f32`.
    pub fn to_f32(&self) -> f32 {
        self.to_f64() as f32
    }
}

impl fmt::Debug for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (negative, coefficient, exponent) = self.unpack();
        f.debug_struct("DecimalValue")
            .field("negative", &negative)
            .field("coefficient", &coefficient)
            .field("exponent", &exponent)
            .finish()
    }
}

impl Default for DecimalValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for DecimalValue {
    fn eq(&self, other: &Self) -> bool {
        // All zeros are one value regardless of sign and exponent; anything
        // else must match bit for bit.
        if self.coefficient() == 0 && other.coefficient() == 0 {
            return true;
        }
        self.bits == other.bits
    }
}

impl Eq for DecimalValue {}

impl PartialOrd for DecimalValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DecimalValue {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a_neg, a_coeff, a_exp) = self.unpack();
        let (b_neg, b_coeff, b_exp) = other.unpack();

        // Zeros bypass the sign/exponent path entirely, so that +0, -0 and
        // 0e5 stay mutually equal and order consistently against everything.
        match (a_coeff == 0, b_coeff == 0) {
            (true, true) => return Ordering::Equal,
            (true, false) => {
                return if b_neg {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (false, true) => {
                return if a_neg {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, false) => {}
        }

        if a_neg != b_neg {
            return if a_neg {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        let magnitude = a_exp.cmp(&b_exp).then(a_coeff.cmp(&b_coeff));
        if a_neg {
            magnitude.reverse()
        } else {
            magnitude
        }
    }
}

// Widening constructions: every value of these types fits 34 digits.

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {$(
        impl From<$ty> for DecimalValue {
            fn from(value: $ty) -> Self {
                DecimalValue::encode(false, value as u128, 0)
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {$(
        impl From<$ty> for DecimalValue {
            fn from(value: $ty) -> Self {
                DecimalValue::encode(value < 0, value.unsigned_abs() as u128, 0)
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64);
impl_from_signed!(i8, i16, i32, i64);

impl TryFrom<u128> for DecimalValue {
    type Error = Error;

    fn try_from(value: u128) -> Result<Self> {
        DecimalValue::pack(false, value, 0)
    }
}

impl TryFrom<i128> for DecimalValue {
    type Error = Error;

    fn try_from(value: i128) -> Result<Self> {
        DecimalValue::pack(value < 0, value.unsigned_abs(), 0)
    }
}

impl TryFrom<f64> for DecimalValue {
    type Error = Error;

    /// Converts through the shortest round-trip decimal rendering of the
    /// float, so `0.1f64` becomes the literal `1e-1`, not the exact binary
    /// expansion. Non-finite inputs have no decimal representation.
    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::Format(format!(
                "no decimal representation for {value}"
            )));
        }
        let (parsed, _) = DecimalValue::parse(&format!("{value:e}"))?;
        Ok(parsed)
    }
}

impl TryFrom<f32> for DecimalValue {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::Format(format!(
                "no decimal representation for {value}"
            )));
        }
        let (parsed, _) = DecimalValue::parse(&format!("{value:e}"))?;
        Ok(parsed)
    }
}

macro_rules! impl_try_into_signed {
    ($($ty:ty),*) => {$(
        impl TryFrom<DecimalValue> for $ty {
            type Error = Error;

            fn try_from(value: DecimalValue) -> Result<Self> {
                let magnitude = value.integral_magnitude()?;
                if value.is_negative() && magnitude != 0 {
                    let limit = <$ty>::MIN.unsigned_abs() as u128;
                    if magnitude > limit {
                        return Err(Error::Overflow);
                    }
                    Ok((magnitude as $ty).wrapping_neg())
                } else {
                    <$ty>::try_from(magnitude).map_err(|_| Error::Overflow)
                }
            }
        }
    )*};
}

macro_rules! impl_try_into_unsigned {
    ($($ty:ty),*) => {$(
        impl TryFrom<DecimalValue> for $ty {
            type Error = Error;

            fn try_from(value: DecimalValue) -> Result<Self> {
                let magnitude = value.integral_magnitude()?;
                if value.is_negative() && magnitude != 0 {
                    return Err(Error::Overflow);
                }
                <$ty>::try_from(magnitude).map_err(|_| Error::Overflow)
            }
        }
    )*};
}

impl_try_into_signed!(i32, i64, i128);
impl_try_into_unsigned!(u32, u64, u128);
