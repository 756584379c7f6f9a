//! Compact descriptors for the textual shape of a number.
//!
//! A [`NumberFormat`] records how a numeric literal was (or should be)
//! spelled: minimum digit-group widths, exponential notation and its
//! letter case, sign display, and the decimal point's offset within an
//! exponential mantissa. [`DecimalValue::parse`](super::DecimalValue::parse)
//! derives one while parsing so that formatting with it reproduces the
//! original literal byte for byte.
//!
//! Descriptors have their own spelling, a mini-grammar:
//!
//! ```text
//! ['-'] [integral-digits] ['.' fractional-digits]
//!       [('e'|'E') ['+'] [exponent-digits] [',' ['-'] point-position]]
//! ```
//!
//! `""` is the plain decimal default, `"e"` plain exponential, `"-"`
//! requests a sign on zero, `"3.2"` pads to three integral and two
//! fractional digits, `"e2,4"` a two-digit exponent field with the point
//! after the fourth mantissa digit. [`FromStr`](std::str::FromStr) and
//! [`Display`](std::fmt::Display) are exact mutual inverses.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const FRACTIONAL_SHIFT: u32 = 8;
const EXPONENT_DIGITS_SHIFT: u32 = 16;
const FLAG_EXPONENTIAL: u32 = 1 << 20;
const FLAG_UPPERCASE: u32 = 1 << 21;
const FLAG_PLUS_SIGN: u32 = 1 << 22;
const FLAG_MINUS_ZERO: u32 = 1 << 23;
const POINT_SHIFT: u32 = 24;

/// A 32-bit packed description of a number's printed layout.
#[derive(Clone, Copy)]
pub struct NumberFormat {
    bits: u32,
}

impl NumberFormat {
    /// Minimum width of the integer part, in digits (1..=255).
    pub fn integral_digits(&self) -> u8 {
        self.bits as u8
    }

    /// Minimum width of the fraction part, in digits (0 = no point).
    pub fn fractional_digits(&self) -> u8 {
        (self.bits >> FRACTIONAL_SHIFT) as u8
    }

    /// Minimum width of the exponent field, in digits (1..=15).
    pub fn exponent_digits(&self) -> u8 {
        ((self.bits >> EXPONENT_DIGITS_SHIFT) & 0xF) as u8
    }

    /// Decimal-point offset within the mantissa digits; only meaningful in
    /// exponential notation. 1 is the scientific-notation default.
    pub fn point_position(&self) -> i8 {
        (self.bits >> POINT_SHIFT) as u8 as i8
    }

    /// Whether the value prints with an exponent suffix.
    pub fn exponential_notation(&self) -> bool {
        self.bits & FLAG_EXPONENTIAL != 0
    }

    /// Whether the exponent letter prints as `E` instead of `e`.
    pub fn uppercase_exponent(&self) -> bool {
        self.bits & FLAG_UPPERCASE != 0
    }

    /// Whether a non-negative exponent prints a leading `+`.
    pub fn print_plus_exponent_sign(&self) -> bool {
        self.bits & FLAG_PLUS_SIGN != 0
    }

    /// Whether a zero value prints a leading `-`.
    pub fn print_minus_zero(&self) -> bool {
        self.bits & FLAG_MINUS_ZERO != 0
    }

    /// Plain decimal notation, single-digit minimum widths.
    pub const DECIMAL: NumberFormat = NumberFormat {
        bits: 1 | (1 << EXPONENT_DIGITS_SHIFT) | (1 << POINT_SHIFT),
    };

    /// Scientific notation: one mantissa digit before the point.
    pub const EXPONENTIAL: NumberFormat = NumberFormat {
        bits: NumberFormat::DECIMAL.bits | FLAG_EXPONENTIAL,
    };

    /// Set the minimum integer-part width. Zero is not a legal width.
    pub fn with_integral_digits(self, digits: u8) -> Result<Self> {
        if digits == 0 {
            return Err(Error::Format(
                "integral width must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            bits: (self.bits & !0xFF) | u32::from(digits),
        })
    }

    /// Set the minimum fraction-part width.
    pub fn with_fractional_digits(self, digits: u8) -> Self {
        Self {
            bits: (self.bits & !(0xFF << FRACTIONAL_SHIFT))
                | (u32::from(digits) << FRACTIONAL_SHIFT),
        }
    }

    /// Set the minimum exponent-field width (1..=15).
    pub fn with_exponent_digits(self, digits: u8) -> Result<Self> {
        if !(1..=15).contains(&digits) {
            return Err(Error::Format(format!(
                "exponent width {digits} outside 1..=15"
            )));
        }
        Ok(Self {
            bits: (self.bits & !(0xF << EXPONENT_DIGITS_SHIFT))
                | (u32::from(digits) << EXPONENT_DIGITS_SHIFT),
        })
    }

    /// Set the decimal-point offset for exponential notation (−127..=127).
    pub fn with_point_position(self, position: i8) -> Result<Self> {
        if position == i8::MIN {
            return Err(Error::Format(format!(
                "point position {position} outside -127..=127"
            )));
        }
        Ok(Self {
            bits: (self.bits & !(0xFF << POINT_SHIFT))
                | (u32::from(position as u8) << POINT_SHIFT),
        })
    }

    /// Turn exponential notation on or off.
    pub fn with_exponential_notation(self, on: bool) -> Self {
        self.with_flag(FLAG_EXPONENTIAL, on)
    }

    /// Choose `E` or `e` for the exponent letter.
    pub fn with_uppercase_exponent(self, on: bool) -> Self {
        self.with_flag(FLAG_UPPERCASE, on)
    }

    /// Print `+` before non-negative exponents.
    pub fn with_plus_exponent_sign(self, on: bool) -> Self {
        self.with_flag(FLAG_PLUS_SIGN, on)
    }

    /// Print `-` before zero values.
    pub fn with_minus_zero(self, on: bool) -> Self {
        self.with_flag(FLAG_MINUS_ZERO, on)
    }

    fn with_flag(self, flag: u32, on: bool) -> Self {
        Self {
            bits: if on { self.bits | flag } else { self.bits & !flag },
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::DECIMAL
    }
}

impl PartialEq for NumberFormat {
    fn eq(&self, other: &Self) -> bool {
        if self.integral_digits() != other.integral_digits()
            || self.fractional_digits() != other.fractional_digits()
            || self.print_minus_zero() != other.print_minus_zero()
            || self.exponential_notation() != other.exponential_notation()
        {
            return false;
        }
        // The exponential-only fields carry no meaning in decimal notation.
        if !self.exponential_notation() {
            return true;
        }
        self.exponent_digits() == other.exponent_digits()
            && self.point_position() == other.point_position()
            && self.uppercase_exponent() == other.uppercase_exponent()
            && self.print_plus_exponent_sign() == other.print_plus_exponent_sign()
    }
}

impl Eq for NumberFormat {}

impl fmt::Debug for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NumberFormat({self})")
    }
}

/// Scanner over a format-descriptor spelling.
struct SpecScanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SpecScanner<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a digit run and return its value, or `None` when the next
    /// character is not a digit. Values above `limit` are a format error.
    fn digit_run(&mut self, limit: u32, field: &str) -> Result<Option<u32>> {
        if !matches!(self.peek(), Some(b'0'..=b'9')) {
            return Ok(None);
        }
        let mut value: u32 = 0;
        while let Some(b @ b'0'..=b'9') = self.peek() {
            self.pos += 1;
            value = value * 10 + u32::from(b - b'0');
            if value > limit {
                return Err(Error::Format(format!("{field} field exceeds {limit}")));
            }
        }
        Ok(Some(value))
    }
}

impl FromStr for NumberFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut scanner = SpecScanner {
            bytes: s.as_bytes(),
            pos: 0,
        };
        let mut format = NumberFormat::DECIMAL;

        if scanner.eat(b'-') {
            format = format.with_minus_zero(true);
        }
        if let Some(width) = scanner.digit_run(255, "integral")? {
            format = format.with_integral_digits(width as u8)?;
        }
        if scanner.eat(b'.') {
            match scanner.digit_run(255, "fractional")? {
                Some(width) => format = format.with_fractional_digits(width as u8),
                None => {
                    return Err(Error::Format(
                        "expected fractional width after '.'".to_string(),
                    ))
                }
            }
        }
        match scanner.peek() {
            Some(letter @ (b'e' | b'E')) => {
                scanner.pos += 1;
                format = format
                    .with_exponential_notation(true)
                    .with_uppercase_exponent(letter == b'E');
                if scanner.eat(b'+') {
                    format = format.with_plus_exponent_sign(true);
                }
                if let Some(width) = scanner.digit_run(15, "exponent")? {
                    format = format.with_exponent_digits(width as u8)?;
                }
                if scanner.eat(b',') {
                    let negative = scanner.eat(b'-');
                    match scanner.digit_run(127, "point position")? {
                        Some(magnitude) => {
                            let position = if negative {
                                -(magnitude as i8)
                            } else {
                                magnitude as i8
                            };
                            format = format.with_point_position(position)?;
                        }
                        None => {
                            return Err(Error::Format(
                                "expected point position after ','".to_string(),
                            ))
                        }
                    }
                }
            }
            _ => {}
        }

        if scanner.pos != scanner.bytes.len() {
            return Err(Error::Format(format!(
                "unexpected trailing input in format spec {s:?}"
            )));
        }
        Ok(format)
    }
}

impl fmt::Display for NumberFormat {
    /// Prints the spelling that parses back to this descriptor: only the
    /// fields that differ from their defaults, in grammar order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.print_minus_zero() {
            f.write_str("-")?;
        }
        if self.integral_digits() != 1 {
            write!(f, "{}", self.integral_digits())?;
        }
        if self.fractional_digits() != 0 {
            write!(f, ".{}", self.fractional_digits())?;
        }
        if self.exponential_notation() {
            f.write_str(if self.uppercase_exponent() { "E" } else { "e" })?;
            if self.print_plus_exponent_sign() {
                f.write_str("+")?;
            }
            if self.exponent_digits() != 1 {
                write!(f, "{}", self.exponent_digits())?;
            }
            if self.point_position() != 1 {
                write!(f, ",{}", self.point_position())?;
            }
        }
        Ok(())
    }
}
