//! Text conversions for [`DecimalValue`]: literal parsing that derives a
//! [`NumberFormat`], and formatting that consumes one.
//!
//! The two directions are inverses: for any literal `s` inside the value
//! envelope, `format(parse(s).0, &parse(s).1)` reproduces `s` exactly —
//! leading and trailing zero counts, exponent letter case, sign style and
//! point position included.

use crate::decimal::format::NumberFormat;
use crate::decimal::value::{digit_count, pow10, DecimalValue};
use crate::error::{Error, Result};

/// Significant-digit capacity of the coefficient.
const MAX_DIGITS: u32 = 34;

impl DecimalValue {
    /// Parse a numeric literal into a value and the format that respells it.
    ///
    /// One left-to-right scan. Runs of zeros after the last significant
    /// digit are deferred and folded into the exponent rather than the
    /// coefficient, so `1500` packs as `15e2` while `1501` keeps four
    /// digits. Leading zeros, fraction width, exponent letter case, sign
    /// style and exponent-field width are captured in the returned
    /// [`NumberFormat`].
    ///
    /// Syntax problems and format-field excesses (integral width or
    /// fraction width past 255, exponent field past 15 digits, point
    /// position past ±127) are [`Error::Format`]; more than 34 significant
    /// digits or an exponent outside −6176..+6111 is [`Error::Overflow`].
    pub fn parse(text: &str) -> Result<(Self, NumberFormat)> {
        let bytes = text.as_bytes();
        let mut pos = 0;

        let negative = bytes.first() == Some(&b'-');
        if negative {
            pos += 1;
        }

        let mut coefficient: u128 = 0;
        let mut sig_digits: u32 = 0;
        let mut pending_zeros: u32 = 0;
        let mut sig_started = false;

        // Fold a significant digit into the coefficient, flushing any
        // deferred zero run in one multiply.
        fn accumulate(
            digit: u8,
            coefficient: &mut u128,
            sig_digits: &mut u32,
            pending_zeros: &mut u32,
        ) -> Result<()> {
            if digit == 0 {
                *pending_zeros += 1;
                return Ok(());
            }
            let run = *pending_zeros + 1;
            if *sig_digits + run > MAX_DIGITS {
                return Err(Error::Overflow);
            }
            let scale = pow10(run).ok_or(Error::Overflow)?;
            *coefficient = *coefficient * scale + u128::from(digit);
            *sig_digits += run;
            *pending_zeros = 0;
            Ok(())
        }

        // Integer part: at least one digit, leading zeros counted apart.
        let mut int_total: u32 = 0;
        let mut int_leading_zeros: u32 = 0;
        while let Some(b @ b'0'..=b'9') = bytes.get(pos) {
            pos += 1;
            int_total += 1;
            let digit = b - b'0';
            if !sig_started && digit == 0 {
                int_leading_zeros += 1;
            } else {
                sig_started = true;
                accumulate(digit, &mut coefficient, &mut sig_digits, &mut pending_zeros)?;
            }
        }
        if int_total == 0 {
            return Err(Error::Format(format!(
                "expected a digit in numeric literal {text:?}"
            )));
        }

        // Fraction part.
        let mut frac_total: u32 = 0;
        let mut frac_leading_zeros: u32 = 0;
        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            while let Some(b @ b'0'..=b'9') = bytes.get(pos) {
                pos += 1;
                frac_total += 1;
                let digit = b - b'0';
                if !sig_started && digit == 0 {
                    frac_leading_zeros += 1;
                } else {
                    sig_started = true;
                    accumulate(digit, &mut coefficient, &mut sig_digits, &mut pending_zeros)?;
                }
            }
            if frac_total == 0 {
                return Err(Error::Format(format!(
                    "expected a digit after the decimal point in {text:?}"
                )));
            }
            if frac_total > 255 {
                return Err(Error::Format(format!(
                    "fraction of {frac_total} digits exceeds the format limit of 255"
                )));
            }
        }

        // Exponent suffix.
        let mut exponential = false;
        let mut uppercase = false;
        let mut plus_sign = false;
        let mut exponent_width: u32 = 0;
        let mut suffix_exponent: i64 = 0;
        if let Some(letter @ (b'e' | b'E')) = bytes.get(pos) {
            exponential = true;
            uppercase = *letter == b'E';
            pos += 1;
            let mut exponent_negative = false;
            if bytes.get(pos) == Some(&b'+') {
                plus_sign = true;
                pos += 1;
            } else if bytes.get(pos) == Some(&b'-') {
                exponent_negative = true;
                pos += 1;
            }
            let mut magnitude: i64 = 0;
            while let Some(b @ b'0'..=b'9') = bytes.get(pos) {
                pos += 1;
                exponent_width += 1;
                if exponent_width > 15 {
                    return Err(Error::Format(
                        "exponent field exceeds 15 digits".to_string(),
                    ));
                }
                magnitude = magnitude * 10 + i64::from(b - b'0');
            }
            if exponent_width == 0 {
                return Err(Error::Format(format!(
                    "expected a digit in the exponent of {text:?}"
                )));
            }
            suffix_exponent = if exponent_negative {
                -magnitude
            } else {
                magnitude
            };
        }

        if pos != bytes.len() {
            return Err(Error::Format(format!(
                "unexpected trailing input in numeric literal {text:?}"
            )));
        }

        // The deferred trailing zeros belong to the exponent, not the
        // coefficient. A zero value keeps the suffix exponent verbatim.
        let exponent = if sig_started {
            suffix_exponent + i64::from(pending_zeros) - i64::from(frac_total)
        } else {
            suffix_exponent
        };
        if exponent < i64::from(Self::MIN_EXPONENT) || exponent > i64::from(Self::MAX_EXPONENT) {
            return Err(Error::Overflow);
        }
        let value = Self::pack(negative, coefficient, exponent as i32)?;

        // Derive the format that prints this literal back.
        let mut format = NumberFormat::DECIMAL;
        if negative && !sig_started {
            format = format.with_minus_zero(true);
        }
        if int_leading_zeros > 0 {
            if int_total > 255 {
                return Err(Error::Format(format!(
                    "integer part of {int_total} digits exceeds the format limit of 255"
                )));
            }
            format = format.with_integral_digits(int_total as u8)?;
        }
        if frac_total > 0 {
            format = format.with_fractional_digits(frac_total as u8);
        }
        if exponential {
            format = format
                .with_exponential_notation(true)
                .with_uppercase_exponent(uppercase)
                .with_plus_exponent_sign(plus_sign)
                .with_exponent_digits(exponent_width as u8)?;
            if sig_started {
                let sig_int = i64::from(int_total) - i64::from(int_leading_zeros);
                let point = if sig_int > 0 {
                    sig_int
                } else {
                    -i64::from(frac_leading_zeros)
                };
                if !(-127..=127).contains(&point) {
                    return Err(Error::Format(format!(
                        "point position {point} outside -127..=127"
                    )));
                }
                format = format.with_point_position(point as i8)?;
            }
        }

        Ok((value, format))
    }

    /// Format the value according to `format`.
    pub fn format(&self, format: &NumberFormat) -> String {
        let mut out = String::new();
        self.format_into(format, &mut out);
        out
    }

    /// Format the value according to `format`, appending to `out`.
    ///
    /// Two phases: derive the printing parameters (fraction scale, zero
    /// padding, printed exponent), then peel coefficient digits off
    /// least-significant-first into a scratch buffer that is reversed into
    /// the output before the exponent suffix goes on.
    pub fn format_into(&self, format: &NumberFormat, out: &mut String) {
        let (negative, coefficient, exponent) = self.unpack();

        // The sign prints for truly negative values; zeros only on request.
        if coefficient != 0 {
            if negative {
                out.push('-');
            }
        } else if format.print_minus_zero() {
            out.push('-');
        }

        if format.exponential_notation() {
            let printed_exponent = self.render_exponential(format, out, coefficient, exponent);
            render_exponent_suffix(format, out, printed_exponent);
        } else {
            self.render_decimal(format, out, coefficient, exponent);
        }
    }

    /// Plain decimal notation: a positive exponent becomes trailing zeros,
    /// a negative one becomes the fraction scale.
    fn render_decimal(&self, format: &NumberFormat, out: &mut String, coefficient: u128, exponent: i32) {
        let scale = exponent.min(0).unsigned_abs();
        let integral_low_zeros = exponent.max(0) as u32;
        let fraction_width = scale.max(u32::from(format.fractional_digits()));
        render_mantissa(
            out,
            coefficient,
            MantissaLayout {
                fraction_trailing_zeros: fraction_width - scale,
                fraction_digits: scale,
                fraction_leading_zeros: 0,
                integral_low_zeros,
                integral_digits: None,
                integral_min_width: u32::from(format.integral_digits()),
            },
        );
    }

    /// Exponential notation: split the coefficient digits around the
    /// format's point position and return the exponent to print.
    fn render_exponential(
        &self,
        format: &NumberFormat,
        out: &mut String,
        coefficient: u128,
        exponent: i32,
    ) -> i64 {
        if coefficient == 0 {
            // A zero mantissa is all padding; the stored exponent prints.
            render_mantissa(
                out,
                0,
                MantissaLayout {
                    fraction_trailing_zeros: u32::from(format.fractional_digits()),
                    fraction_digits: 0,
                    fraction_leading_zeros: 0,
                    integral_low_zeros: 0,
                    integral_digits: Some(0),
                    integral_min_width: u32::from(format.integral_digits()),
                },
            );
            return i64::from(exponent);
        }

        let digits = digit_count(coefficient) as i64;
        let point = i64::from(format.point_position());
        let fraction_digits = (digits - point.max(0)).max(0);
        let fraction_leading_zeros = point.min(0).unsigned_abs() as u32;
        let fraction_natural = fraction_leading_zeros + fraction_digits as u32;
        let fraction_width = fraction_natural.max(u32::from(format.fractional_digits()));
        render_mantissa(
            out,
            coefficient,
            MantissaLayout {
                fraction_trailing_zeros: fraction_width - fraction_natural,
                fraction_digits: fraction_digits as u32,
                fraction_leading_zeros,
                integral_low_zeros: (point - digits).max(0) as u32,
                integral_digits: Some((digits - fraction_digits) as u32),
                integral_min_width: u32::from(format.integral_digits()),
            },
        );
        i64::from(exponent) + digits - point
    }
}

/// Digit-peeling plan for one mantissa.
struct MantissaLayout {
    fraction_trailing_zeros: u32,
    fraction_digits: u32,
    fraction_leading_zeros: u32,
    integral_low_zeros: u32,
    /// Count of coefficient digits in the integer part; `None` means
    /// "whatever the fraction left over".
    integral_digits: Option<u32>,
    integral_min_width: u32,
}

/// Peel digits least-significant-first into a scratch buffer, then reverse
/// it into `out`. The point is pushed in reverse order too, so the layout
/// reads back-to-front here.
fn render_mantissa(out: &mut String, coefficient: u128, layout: MantissaLayout) {
    let mut coefficient = coefficient;
    let mut reversed: Vec<u8> = Vec::with_capacity(40);

    for _ in 0..layout.fraction_trailing_zeros {
        reversed.push(b'0');
    }
    for _ in 0..layout.fraction_digits {
        reversed.push(b'0' + (coefficient % 10) as u8);
        coefficient /= 10;
    }
    for _ in 0..layout.fraction_leading_zeros {
        reversed.push(b'0');
    }
    if layout.fraction_trailing_zeros + layout.fraction_digits + layout.fraction_leading_zeros > 0 {
        reversed.push(b'.');
    }

    let mut integral_width = 0u32;
    for _ in 0..layout.integral_low_zeros {
        reversed.push(b'0');
        integral_width += 1;
    }
    match layout.integral_digits {
        None => {
            while coefficient > 0 {
                reversed.push(b'0' + (coefficient % 10) as u8);
                coefficient /= 10;
                integral_width += 1;
            }
        }
        Some(count) => {
            for _ in 0..count {
                reversed.push(b'0' + (coefficient % 10) as u8);
                coefficient /= 10;
                integral_width += 1;
            }
        }
    }
    while integral_width < layout.integral_min_width.max(1) {
        reversed.push(b'0');
        integral_width += 1;
    }

    out.extend(reversed.iter().rev().map(|&b| char::from(b)));
}

/// Append the exponent suffix: letter, sign per flags, digits padded to the
/// minimum field width.
fn render_exponent_suffix(format: &NumberFormat, out: &mut String, exponent: i64) {
    out.push(if format.uppercase_exponent() { 'E' } else { 'e' });
    if exponent < 0 {
        out.push('-');
    } else if format.print_plus_exponent_sign() {
        out.push('+');
    }
    let mut reversed: Vec<u8> = Vec::with_capacity(8);
    let mut magnitude = exponent.unsigned_abs();
    loop {
        reversed.push(b'0' + (magnitude % 10) as u8);
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }
    while reversed.len() < usize::from(format.exponent_digits()) {
        reversed.push(b'0');
    }
    out.extend(reversed.iter().rev().map(|&b| char::from(b)));
}

impl std::str::FromStr for DecimalValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).map(|(value, _)| value)
    }
}

impl std::fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format(&NumberFormat::DECIMAL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(text: &str) -> String {
        let (value, format) = DecimalValue::parse(text).unwrap();
        value.format(&format)
    }

    #[test]
    fn test_roundtrip_plain_integers() {
        for text in ["0", "7", "42", "100", "1000000", "-1", "-100"] {
            assert_eq!(roundtrip(text), text);
        }
    }

    #[test]
    fn test_roundtrip_leading_zeros() {
        for text in ["00", "007", "0100", "-042"] {
            assert_eq!(roundtrip(text), text);
        }
    }

    #[test]
    fn test_roundtrip_fractions() {
        for text in [
            "0.5", "1.5", "1.50", "100.5", "100.500", "0.05", "0.00100", "-0.25", "10.00",
            "3.14159",
        ] {
            assert_eq!(roundtrip(text), text);
        }
    }

    #[test]
    fn test_roundtrip_exponentials() {
        for text in [
            "1e0", "1e1", "1E1", "1e+1", "1e-1", "1e05", "1.5e3", "15e2", "150e1", "1500e2",
            "0.15e4", "0.0015e3", "00.15e4", "1.500e2", "150.00e2", "9.109383701528e-31",
        ] {
            assert_eq!(roundtrip(text), text);
        }
    }

    #[test]
    fn test_roundtrip_zeros() {
        for text in ["-0", "0.0", "0.00", "-0.000", "0e0", "0e5", "0.0e5", "-0E+3", "00e1"] {
            assert_eq!(roundtrip(text), text);
        }
    }

    #[test]
    fn test_roundtrip_full_width() {
        let nines = "9".repeat(34);
        assert_eq!(roundtrip(&nines), nines);
        let long = format!("1{}", "0".repeat(40));
        assert_eq!(roundtrip(&long), long);
    }

    #[test]
    fn test_parse_values() {
        let (value, _) = DecimalValue::parse("1500").unwrap();
        assert_eq!(value.unpack(), (false, 15, 2));

        let (value, _) = DecimalValue::parse("100.5").unwrap();
        assert_eq!(value.unpack(), (false, 1005, -1));

        let (value, _) = DecimalValue::parse("0.0015e3").unwrap();
        assert_eq!(value.unpack(), (false, 15, -1));

        let (value, _) = DecimalValue::parse("-12.34e-2").unwrap();
        assert_eq!(value.unpack(), (true, 1234, -4));
    }

    #[test]
    fn test_parse_derives_format() {
        let (_, format) = DecimalValue::parse("42").unwrap();
        assert_eq!(format, NumberFormat::DECIMAL);

        let (_, format) = DecimalValue::parse("0100.50").unwrap();
        assert_eq!(format.integral_digits(), 4);
        assert_eq!(format.fractional_digits(), 2);

        let (_, format) = DecimalValue::parse("1.5E+03").unwrap();
        assert!(format.exponential_notation());
        assert!(format.uppercase_exponent());
        assert!(format.print_plus_exponent_sign());
        assert_eq!(format.exponent_digits(), 2);
        assert_eq!(format.point_position(), 1);

        let (_, format) = DecimalValue::parse("-0").unwrap();
        assert!(format.print_minus_zero());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in [
            "", "-", "+1", ".5", "5.", "1e", "1e+", "1e-", "1.2.3", "1x", "1 ", " 1", "e5",
            "--1", "1..2",
        ] {
            assert!(
                matches!(DecimalValue::parse(text), Err(Error::Format(_))),
                "literal {text:?} should be a format error"
            );
        }
    }

    #[test]
    fn test_parse_overflow_boundaries() {
        // 34 significant digits parse; 35 overflow.
        assert!(DecimalValue::parse(&"9".repeat(34)).is_ok());
        assert!(matches!(
            DecimalValue::parse(&"9".repeat(35)),
            Err(Error::Overflow)
        ));

        // Exponent bounds, one inside and one past each edge.
        assert!(DecimalValue::parse("1e6111").is_ok());
        assert!(matches!(
            DecimalValue::parse("1e6112"),
            Err(Error::Overflow)
        ));
        assert!(DecimalValue::parse("1e-6176").is_ok());
        assert!(matches!(
            DecimalValue::parse("1e-6177"),
            Err(Error::Overflow)
        ));
    }

    #[test]
    fn test_parse_format_field_excesses() {
        // 16-digit exponent field is a format error, not overflow.
        assert!(matches!(
            DecimalValue::parse("1e0000000000000001"),
            Err(Error::Format(_))
        ));
        // A 256-character fraction exceeds the fraction-width field.
        let wide = format!("0.{}1", "0".repeat(255));
        assert!(matches!(DecimalValue::parse(&wide), Err(Error::Format(_))));
    }

    #[test]
    fn test_format_with_explicit_formats() {
        let (value, _) = DecimalValue::parse("1500").unwrap();
        assert_eq!(value.format(&NumberFormat::DECIMAL), "1500");
        assert_eq!(value.format(&NumberFormat::EXPONENTIAL), "1.5e3");

        let padded: NumberFormat = "6.2".parse().unwrap();
        assert_eq!(value.format(&padded), "001500.00");

        let engineering: NumberFormat = "e+,2".parse().unwrap();
        assert_eq!(value.format(&engineering), "15e+2");

        let padded_exponent: NumberFormat = "e3".parse().unwrap();
        assert_eq!(value.format(&padded_exponent), "1.5e003");
    }

    #[test]
    fn test_format_zero_styles() {
        assert_eq!(DecimalValue::ZERO.format(&NumberFormat::DECIMAL), "0");
        let minus: NumberFormat = "-".parse().unwrap();
        assert_eq!(DecimalValue::ZERO.format(&minus), "-0");
        assert_eq!(DecimalValue::ZERO.format(&NumberFormat::EXPONENTIAL), "0e0");
        let padded: NumberFormat = "2.1e3".parse().unwrap();
        assert_eq!(DecimalValue::ZERO.format(&padded), "00.0e000");
    }

    #[test]
    fn test_display_uses_decimal_default() {
        assert_eq!("1.5e3".parse::<DecimalValue>().unwrap().to_string(), "1500");
        assert_eq!("25e-1".parse::<DecimalValue>().unwrap().to_string(), "2.5");
        assert_eq!("100".parse::<DecimalValue>().unwrap().to_string(), "100");
    }
}
