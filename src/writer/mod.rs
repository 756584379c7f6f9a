//! Streaming JSON writing.
//!
//! [`JsonWriter`] is the emitting counterpart of the reader: one call per
//! token kind, validated against the same container-stack grammar, so an
//! out-of-order call fails with an invalid-state error instead of
//! producing broken JSON. Numeric output goes through
//! [`DecimalValue::format_into`] with a caller-supplied [`NumberFormat`],
//! which is what makes read-then-write round trips byte-exact.
//!
//! ```
//! use decjson::{JsonWriter, WriteOptions};
//!
//! let mut writer = JsonWriter::new(Vec::new());
//! writer.write_start_object().unwrap();
//! writer.write_property("answer").unwrap();
//! writer.write_i64(42).unwrap();
//! writer.write_end_object().unwrap();
//! let out = writer.finish().unwrap();
//! assert_eq!(out, br#"{"answer":42}"#);
//! ```

use std::io::Write;

use crate::decimal::{DecimalValue, NumberFormat};
use crate::error::{Error, Result};
use crate::reader::token::Container;

/// Output shaping knobs for [`JsonWriter`].
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Newline-and-indent array elements and space property values.
    pub pretty: bool,
    /// One indentation step, used in pretty mode.
    pub indent: String,
    /// Separator emitted between root-level values.
    pub root_separator: String,
    /// Escape `/` as `\/`.
    pub escape_solidus: bool,
    /// Escape every character above U+007F as `\uXXXX`.
    pub escape_non_ascii: bool,
    /// Emit `\uXXXX` hex digits in upper case.
    pub uppercase_hex: bool,
}

impl WriteOptions {
    /// Dense output: no decoration beyond the grammar's separators.
    pub fn compact() -> Self {
        WriteOptions {
            pretty: false,
            indent: "  ".to_string(),
            root_separator: "\n".to_string(),
            escape_solidus: false,
            escape_non_ascii: false,
            uppercase_hex: false,
        }
    }

    /// Readable output: array elements on their own lines, a space after
    /// each property colon.
    pub fn pretty() -> Self {
        WriteOptions {
            pretty: true,
            ..Self::compact()
        }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::compact()
    }
}

/// Streaming JSON writer over any [`Write`] sink.
pub struct JsonWriter<W: Write> {
    out: W,
    options: WriteOptions,
    /// Open containers, each with a "has at least one member" flag.
    stack: Vec<(Container, bool)>,
    root_has_items: bool,
    after_property: bool,
}

impl<W: Write> JsonWriter<W> {
    /// Write compact JSON to `out`.
    pub fn new(out: W) -> Self {
        Self::with_options(out, WriteOptions::compact())
    }

    /// Write JSON to `out` with explicit options.
    pub fn with_options(out: W, options: WriteOptions) -> Self {
        JsonWriter {
            out,
            options,
            stack: Vec::new(),
            root_has_items: false,
            after_property: false,
        }
    }

    /// Emit `null`.
    pub fn write_null(&mut self) -> Result<()> {
        self.begin_value()?;
        self.out.write_all(b"null")?;
        Ok(())
    }

    /// Emit `true` or `false`.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.begin_value()?;
        let literal: &[u8] = if value { b"true" } else { b"false" };
        self.out.write_all(literal)?;
        Ok(())
    }

    /// Emit a number in the spelling the format describes.
    pub fn write_number(&mut self, value: &DecimalValue, format: &NumberFormat) -> Result<()> {
        self.begin_value()?;
        let mut literal = String::new();
        value.format_into(format, &mut literal);
        self.out.write_all(literal.as_bytes())?;
        Ok(())
    }

    /// Emit an integer in plain decimal notation.
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_number(&DecimalValue::from(value), &NumberFormat::DECIMAL)
    }

    /// Emit an unsigned integer in plain decimal notation.
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_number(&DecimalValue::from(value), &NumberFormat::DECIMAL)
    }

    /// Emit a float using its shortest round-trip decimal text, falling
    /// back to exponential notation when the plain spelling would not fit
    /// a format descriptor.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::Format(format!(
                "no JSON representation for {value}"
            )));
        }
        let (value, format) = DecimalValue::parse(&format!("{value}"))
            .or_else(|_| DecimalValue::parse(&format!("{value:e}")))?;
        self.write_number(&value, &format)
    }

    /// Emit a string value with escaping per the options.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.begin_value()?;
        self.write_escaped(value)
    }

    /// Emit a property name inside an object.
    pub fn write_property(&mut self, name: &str) -> Result<()> {
        match self.stack.last().copied() {
            Some((Container::Object, has_items)) => {
                if self.after_property {
                    return Err(Error::InvalidState(
                        "expected a value after the property name",
                    ));
                }
                if has_items {
                    self.out.write_all(b",")?;
                }
                self.write_escaped(name)?;
                self.out.write_all(b":")?;
                if self.options.pretty {
                    self.out.write_all(b" ")?;
                }
                if let Some(top) = self.stack.last_mut() {
                    top.1 = true;
                }
                self.after_property = true;
                Ok(())
            }
            _ => Err(Error::InvalidState(
                "property names are only valid directly inside an object",
            )),
        }
    }

    /// Open an array.
    pub fn write_start_array(&mut self) -> Result<()> {
        self.begin_value()?;
        self.out.write_all(b"[")?;
        self.stack.push((Container::Array, false));
        Ok(())
    }

    /// Close the innermost array.
    pub fn write_end_array(&mut self) -> Result<()> {
        match self.stack.last().copied() {
            Some((Container::Array, has_items)) => {
                self.stack.pop();
                if self.options.pretty && has_items {
                    self.write_newline_indent()?;
                }
                self.out.write_all(b"]")?;
                Ok(())
            }
            _ => Err(Error::InvalidState("no open array to end")),
        }
    }

    /// Open an object.
    pub fn write_start_object(&mut self) -> Result<()> {
        self.begin_value()?;
        self.out.write_all(b"{")?;
        self.stack.push((Container::Object, false));
        Ok(())
    }

    /// Close the innermost object.
    pub fn write_end_object(&mut self) -> Result<()> {
        if self.after_property {
            return Err(Error::InvalidState(
                "cannot end an object after a property name",
            ));
        }
        match self.stack.last() {
            Some((Container::Object, _)) => {
                self.stack.pop();
                self.out.write_all(b"}")?;
                Ok(())
            }
            _ => Err(Error::InvalidState("no open object to end")),
        }
    }

    /// Validate that the document is complete, flush, and return the sink.
    pub fn finish(mut self) -> Result<W> {
        if !self.stack.is_empty() || self.after_property {
            return Err(Error::InvalidState(
                "document has unclosed containers",
            ));
        }
        self.out.flush()?;
        Ok(self.out)
    }

    /// Return the sink unconditionally, leaving it positioned past what
    /// was written.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Separator and state bookkeeping before any value token.
    fn begin_value(&mut self) -> Result<()> {
        if self.after_property {
            self.after_property = false;
            return Ok(());
        }
        match self.stack.last().copied() {
            Some((Container::Object, _)) => Err(Error::InvalidState(
                "expected a property name before a value in an object",
            )),
            Some((Container::Array, has_items)) => {
                if has_items {
                    self.out.write_all(b",")?;
                }
                if self.options.pretty {
                    self.write_newline_indent()?;
                }
                if let Some(top) = self.stack.last_mut() {
                    top.1 = true;
                }
                Ok(())
            }
            None => {
                if self.root_has_items {
                    self.out.write_all(self.options.root_separator.as_bytes())?;
                }
                self.root_has_items = true;
                Ok(())
            }
        }
    }

    /// Newline plus one indent step per open container.
    fn write_newline_indent(&mut self) -> Result<()> {
        self.out.write_all(b"\n")?;
        for _ in 0..self.stack.len() {
            self.out.write_all(self.options.indent.as_bytes())?;
        }
        Ok(())
    }

    /// Quote and escape a string, mirroring the reader's decode table.
    fn write_escaped(&mut self, value: &str) -> Result<()> {
        let mut buf = String::with_capacity(value.len() + 2);
        buf.push('"');
        for ch in value.chars() {
            match ch {
                '"' => buf.push_str("\\\""),
                '\\' => buf.push_str("\\\\"),
                '\u{0008}' => buf.push_str("\\b"),
                '\u{000C}' => buf.push_str("\\f"),
                '\n' => buf.push_str("\\n"),
                '\r' => buf.push_str("\\r"),
                '\t' => buf.push_str("\\t"),
                '/' if self.options.escape_solidus => buf.push_str("\\/"),
                c if (c as u32) < 0x20 => {
                    push_unicode_escape(&mut buf, c as u16, self.options.uppercase_hex);
                }
                c if self.options.escape_non_ascii && (c as u32) > 0x7F => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        push_unicode_escape(&mut buf, *unit, self.options.uppercase_hex);
                    }
                }
                c => buf.push(c),
            }
        }
        buf.push('"');
        self.out.write_all(buf.as_bytes())?;
        Ok(())
    }
}

/// Append `\uXXXX` for one UTF-16 code unit.
fn push_unicode_escape(buf: &mut String, unit: u16, uppercase: bool) {
    let digits: &[u8; 16] = if uppercase {
        b"0123456789ABCDEF"
    } else {
        b"0123456789abcdef"
    };
    buf.push('\\');
    buf.push('u');
    for shift in [12u32, 8, 4, 0] {
        buf.push(char::from(digits[((unit >> shift) & 0xF) as usize]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(build: impl FnOnce(&mut JsonWriter<Vec<u8>>) -> Result<()>) -> String {
        let mut writer = JsonWriter::new(Vec::new());
        build(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_scalars_and_containers() {
        let out = written(|w| {
            w.write_start_array()?;
            w.write_i64(1)?;
            w.write_string("a")?;
            w.write_null()?;
            w.write_bool(true)?;
            w.write_start_object()?;
            w.write_end_object()?;
            w.write_start_array()?;
            w.write_end_array()?;
            w.write_end_array()
        });
        assert_eq!(out, r#"[1,"a",null,true,{},[]]"#);
    }

    #[test]
    fn test_object_members() {
        let out = written(|w| {
            w.write_start_object()?;
            w.write_property("a")?;
            w.write_i64(1)?;
            w.write_property("b")?;
            w.write_bool(false)?;
            w.write_end_object()
        });
        assert_eq!(out, r#"{"a":1,"b":false}"#);
    }

    #[test]
    fn test_number_format_controls_spelling() {
        let (value, format) = DecimalValue::parse("1.50e+03").unwrap();
        let out = written(|w| {
            w.write_start_array()?;
            w.write_number(&value, &format)?;
            w.write_number(&value, &NumberFormat::DECIMAL)?;
            w.write_end_array()
        });
        assert_eq!(out, "[1.50e+03,1500]");
    }

    #[test]
    fn test_float_writing() {
        let out = written(|w| {
            w.write_start_array()?;
            w.write_f64(1.5)?;
            w.write_f64(0.1)?;
            w.write_f64(1e-300)?;
            w.write_end_array()
        });
        assert_eq!(out, "[1.5,0.1,1e-300]");

        let mut writer = JsonWriter::new(Vec::new());
        assert!(matches!(
            writer.write_f64(f64::INFINITY),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_root_values_separated() {
        let out = written(|w| {
            w.write_i64(1)?;
            w.write_i64(2)?;
            w.write_i64(3)
        });
        assert_eq!(out, "1\n2\n3");

        let mut options = WriteOptions::compact();
        options.root_separator = " ".to_string();
        let mut writer = JsonWriter::with_options(Vec::new(), options);
        writer.write_i64(1).unwrap();
        writer.write_i64(2).unwrap();
        assert_eq!(writer.into_inner(), b"1 2");
    }

    #[test]
    fn test_pretty_arrays_and_objects() {
        let mut writer = JsonWriter::with_options(Vec::new(), WriteOptions::pretty());
        writer.write_start_object().unwrap();
        writer.write_property("xs").unwrap();
        writer.write_start_array().unwrap();
        writer.write_i64(1).unwrap();
        writer.write_i64(2).unwrap();
        writer.write_end_array().unwrap();
        writer.write_end_object().unwrap();
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(out, "{\"xs\": [\n    1,\n    2\n  ]}");
    }

    #[test]
    fn test_pretty_empty_array_stays_inline() {
        let mut writer = JsonWriter::with_options(Vec::new(), WriteOptions::pretty());
        writer.write_start_array().unwrap();
        writer.write_end_array().unwrap();
        assert_eq!(writer.into_inner(), b"[]");
    }

    #[test]
    fn test_escaping_mirrors_reader() {
        let out = written(|w| w.write_string("a\n\t\"\\\u{0001}/\u{0008}\u{000C}\r"));
        assert_eq!(out, "\"a\\n\\t\\\"\\\\\\u0001/\\b\\f\\r\"");
    }

    #[test]
    fn test_escape_options() {
        let mut options = WriteOptions::compact();
        options.escape_solidus = true;
        options.escape_non_ascii = true;
        options.uppercase_hex = true;
        let mut writer = JsonWriter::with_options(Vec::new(), options);
        writer.write_string("/é\u{1F600}\u{0001}").unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "\"\\/\\u00E9\\uD83D\\uDE00\\u0001\"");
    }

    #[test]
    fn test_state_machine_rejections() {
        // A value directly inside an object needs a property name first.
        let mut writer = JsonWriter::new(Vec::new());
        writer.write_start_object().unwrap();
        assert!(matches!(
            writer.write_i64(1),
            Err(Error::InvalidState(_))
        ));

        // Two property names in a row.
        let mut writer = JsonWriter::new(Vec::new());
        writer.write_start_object().unwrap();
        writer.write_property("a").unwrap();
        assert!(matches!(
            writer.write_property("b"),
            Err(Error::InvalidState(_))
        ));

        // Ending the wrong container kind.
        let mut writer = JsonWriter::new(Vec::new());
        writer.write_start_object().unwrap();
        assert!(matches!(
            writer.write_end_array(),
            Err(Error::InvalidState(_))
        ));

        // Ending an object while its last property has no value.
        let mut writer = JsonWriter::new(Vec::new());
        writer.write_start_object().unwrap();
        writer.write_property("a").unwrap();
        assert!(matches!(
            writer.write_end_object(),
            Err(Error::InvalidState(_))
        ));

        // A property name outside any object.
        let mut writer = JsonWriter::new(Vec::new());
        assert!(matches!(
            writer.write_property("a"),
            Err(Error::InvalidState(_))
        ));

        // Closing brackets with nothing open.
        let mut writer = JsonWriter::new(Vec::new());
        assert!(matches!(
            writer.write_end_object(),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_finish_requires_completeness() {
        let mut writer = JsonWriter::new(Vec::new());
        writer.write_start_array().unwrap();
        assert!(matches!(writer.finish(), Err(Error::InvalidState(_))));

        let mut writer = JsonWriter::new(Vec::new());
        writer.write_start_array().unwrap();
        writer.write_end_array().unwrap();
        assert!(writer.finish().is_ok());
    }
}
