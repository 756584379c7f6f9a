//! Pull tokenizer over JSON text.
//!
//! [`JsonReader`] drives any [`CharSource`] through the JSON grammar one
//! token at a time. The grammar is standard JSON with two tolerances: a
//! trailing comma before a closing bracket is accepted, and a stream may
//! hold multiple whitespace-separated root values.
//!
//! Numbers are scanned as a maximal run of `[0-9+\-.eE]` and handed to
//! [`DecimalValue::parse`], which yields both the value and the
//! [`NumberFormat`] that respells it; a bad run is a syntax error anchored
//! at the run's first character. Strings and property names share one
//! escape decoder. Truncated input is [`Error::EndOfStream`], never a
//! syntax error.
//!
//! On a seekable source, [`JsonReader::snapshot`] captures the cursor,
//! container stack and decoded current token; [`JsonReader::restore`]
//! rewinds so that every subsequent read repeats identically.

use std::io::Write;

use crate::decimal::{DecimalValue, NumberFormat};
use crate::error::{Error, Result};
use crate::reader::source::{ByteSource, CharIterSource, CharSource, StrSource};
use crate::reader::token::{Container, Token, TokenKind};
use crate::writer::JsonWriter;

/// Streaming JSON reader with line/column tracking.
pub struct JsonReader<S: CharSource> {
    source: S,
    line: u64,
    column: u64,
    stack: Vec<Container>,
    current: Option<Token>,
}

/// An immutable capture of a reader's cursor state.
///
/// Holds the raw stream position, the line/column counters, the open
/// container stack and the decoded current token, so restoring works even
/// on sources that discard raw text once it is decoded.
#[derive(Debug, Clone)]
pub struct Snapshot {
    position: u64,
    line: u64,
    column: u64,
    stack: Vec<Container>,
    current: Option<Token>,
}

impl<'a> JsonReader<StrSource<'a>> {
    /// Read from a borrowed string.
    pub fn from_str(text: &'a str) -> Self {
        Self::new(StrSource::new(text))
    }
}

impl<R: std::io::Read + std::io::Seek> JsonReader<ByteSource<R>> {
    /// Read from a seekable byte stream, decoding UTF-8 and skipping a
    /// leading byte-order mark.
    pub fn from_seekable(reader: R) -> Self {
        Self::new(ByteSource::new(reader))
    }
}

impl<I: Iterator<Item = char>> JsonReader<CharIterSource<I>> {
    /// Read from a character iterator. Snapshots are unavailable.
    pub fn from_chars(chars: I) -> Self {
        Self::new(CharIterSource::new(chars))
    }
}

impl<S: CharSource> JsonReader<S> {
    /// Read from any character source.
    pub fn new(source: S) -> Self {
        JsonReader {
            source,
            line: 1,
            column: 1,
            stack: Vec::new(),
            current: None,
        }
    }

    /// Advance to the next token. Returns `false` once the stream holds no
    /// further root value; inside an open container, truncation is
    /// [`Error::EndOfStream`] instead.
    pub fn read_next(&mut self) -> Result<bool> {
        let next = match self.kind() {
            TokenKind::None => self.read_root()?,
            TokenKind::StartArray => self.read_array_slot(true)?,
            TokenKind::StartObject => self.read_object_slot(true)?,
            TokenKind::PropertyName => {
                self.skip_whitespace()?;
                self.expect_char(':')?;
                self.skip_whitespace()?;
                Some(self.read_value()?)
            }
            _ => match self.stack.last().copied() {
                None => self.read_root()?,
                Some(Container::Array) => self.read_array_slot(false)?,
                Some(Container::Object) => self.read_object_slot(false)?,
            },
        };
        self.current = next;
        Ok(self.current.is_some())
    }

    /// Kind of the current token.
    pub fn kind(&self) -> TokenKind {
        self.current.as_ref().map_or(TokenKind::None, Token::kind)
    }

    /// The current boolean value.
    pub fn as_bool(&self) -> Result<bool> {
        match &self.current {
            Some(Token::Bool(value)) => Ok(*value),
            _ => Err(Error::InvalidState("current token is not a boolean")),
        }
    }

    /// The current string value or property name.
    pub fn as_str(&self) -> Result<&str> {
        match &self.current {
            Some(Token::String(value)) | Some(Token::PropertyName(value)) => Ok(value),
            _ => Err(Error::InvalidState("current token is not a string")),
        }
    }

    /// The current numeric value with the format that respells its literal.
    pub fn as_number(&self) -> Result<(DecimalValue, NumberFormat)> {
        match &self.current {
            Some(Token::Number(value, format)) => Ok((*value, *format)),
            _ => Err(Error::InvalidState("current token is not a number")),
        }
    }

    /// 1-based line of the next unconsumed character.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// 1-based column of the next unconsumed character.
    pub fn column(&self) -> u64 {
        self.column
    }

    /// Raw source position (meaningful for seeking when the source seeks).
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    /// Number of currently open containers.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Hand back the underlying source, positioned past what was consumed.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Capture the full cursor state for a later [`JsonReader::restore`].
    pub fn snapshot(&self) -> Result<Snapshot> {
        if !self.source.can_seek() {
            return Err(Error::Unsupported(
                "snapshots require a seekable source",
            ));
        }
        Ok(Snapshot {
            position: self.source.position(),
            line: self.line,
            column: self.column,
            stack: self.stack.clone(),
            current: self.current.clone(),
        })
    }

    /// Rewind to a previously captured snapshot.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        if !self.source.can_seek() {
            return Err(Error::Unsupported(
                "snapshots require a seekable source",
            ));
        }
        self.source.seek(snapshot.position)?;
        self.line = snapshot.line;
        self.column = snapshot.column;
        self.stack = snapshot.stack.clone();
        self.current = snapshot.current.clone();
        Ok(())
    }

    /// Skip the current value; for a start token this consumes through the
    /// matching end, for a property name it skips the member value too.
    pub fn skip_value(&mut self) -> Result<()> {
        match self.kind() {
            TokenKind::None => Err(Error::InvalidState("no current token to skip")),
            TokenKind::PropertyName => {
                if !self.read_next()? {
                    return Err(Error::EndOfStream);
                }
                self.skip_value()
            }
            TokenKind::StartArray | TokenKind::StartObject => {
                let mut depth = 1usize;
                while depth > 0 {
                    if !self.read_next()? {
                        return Err(Error::EndOfStream);
                    }
                    match self.kind() {
                        TokenKind::StartArray | TokenKind::StartObject => depth += 1,
                        TokenKind::EndArray | TokenKind::EndObject => depth -= 1,
                        _ => {}
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Copy the current value (or property and its value) to a writer,
    /// token by token, preserving every numeric literal's format.
    pub fn copy_value_to<W: Write>(&mut self, writer: &mut JsonWriter<W>) -> Result<()> {
        if self.kind() == TokenKind::None {
            return Err(Error::InvalidState("no current token to copy"));
        }
        let mut depth = 0usize;
        loop {
            let pending_name = self.kind() == TokenKind::PropertyName;
            self.write_current(writer)?;
            match self.kind() {
                TokenKind::StartArray | TokenKind::StartObject => depth += 1,
                TokenKind::EndArray | TokenKind::EndObject => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or(Error::InvalidState("cannot copy a closing token"))?;
                }
                _ => {}
            }
            if depth == 0 && !pending_name {
                return Ok(());
            }
            if !self.read_next()? {
                return Err(Error::EndOfStream);
            }
        }
    }

    fn write_current<W: Write>(&self, writer: &mut JsonWriter<W>) -> Result<()> {
        match &self.current {
            Some(Token::Null) => writer.write_null(),
            Some(Token::Bool(value)) => writer.write_bool(*value),
            Some(Token::Number(value, format)) => writer.write_number(value, format),
            Some(Token::String(value)) => writer.write_string(value),
            Some(Token::PropertyName(name)) => writer.write_property(name),
            Some(Token::StartArray) => writer.write_start_array(),
            Some(Token::EndArray) => writer.write_end_array(),
            Some(Token::StartObject) => writer.write_start_object(),
            Some(Token::EndObject) => writer.write_end_object(),
            None => Err(Error::InvalidState("no current token to copy")),
        }
    }

    // ---- character-level helpers -------------------------------------

    /// Consume one character, maintaining the line/column counters: a
    /// newline starts a new line, other control characters leave the
    /// column untouched.
    fn next_char(&mut self) -> Result<Option<char>> {
        let ch = self.source.read()?;
        match ch {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some(c) if !c.is_control() => self.column += 1,
            _ => {}
        }
        Ok(ch)
    }

    fn peek_char(&mut self) -> Result<Option<char>> {
        self.source.peek()
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek_char()? {
            self.next_char()?;
        }
        Ok(())
    }

    /// Syntax error at the not-yet-consumed offending character.
    fn unexpected(&self, found: char, expected: &str) -> Error {
        Error::syntax(
            self.line,
            self.column,
            format!("{expected}, found {found:?}"),
        )
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.peek_char()? {
            None => Err(Error::EndOfStream),
            Some(c) if c == expected => {
                self.next_char()?;
                Ok(())
            }
            Some(other) => Err(self.unexpected(other, &format!("expected {expected:?}"))),
        }
    }

    // ---- token-level state machine -----------------------------------

    fn read_root(&mut self) -> Result<Option<Token>> {
        self.skip_whitespace()?;
        match self.peek_char()? {
            None => Ok(None),
            Some(_) => Ok(Some(self.read_value()?)),
        }
    }

    fn read_array_slot(&mut self, first: bool) -> Result<Option<Token>> {
        self.skip_whitespace()?;
        if !first {
            match self.peek_char()? {
                None => return Err(Error::EndOfStream),
                Some(']') => {}
                Some(',') => {
                    self.next_char()?;
                    self.skip_whitespace()?;
                }
                Some(other) => {
                    return Err(self.unexpected(other, "expected ',' or ']' in array"))
                }
            }
        }
        match self.peek_char()? {
            None => Err(Error::EndOfStream),
            Some(']') => {
                self.next_char()?;
                self.stack.pop();
                Ok(Some(Token::EndArray))
            }
            Some(_) => Ok(Some(self.read_value()?)),
        }
    }

    fn read_object_slot(&mut self, first: bool) -> Result<Option<Token>> {
        self.skip_whitespace()?;
        if !first {
            match self.peek_char()? {
                None => return Err(Error::EndOfStream),
                Some('}') => {}
                Some(',') => {
                    self.next_char()?;
                    self.skip_whitespace()?;
                }
                Some(other) => {
                    return Err(self.unexpected(other, "expected ',' or '}' in object"))
                }
            }
        }
        match self.peek_char()? {
            None => Err(Error::EndOfStream),
            Some('}') => {
                self.next_char()?;
                self.stack.pop();
                Ok(Some(Token::EndObject))
            }
            Some('"') => Ok(Some(Token::PropertyName(self.read_string_body()?))),
            Some(other) => Err(self.unexpected(other, "expected a property name")),
        }
    }

    fn read_value(&mut self) -> Result<Token> {
        match self.peek_char()? {
            None => Err(Error::EndOfStream),
            Some('{') => {
                self.next_char()?;
                self.stack.push(Container::Object);
                Ok(Token::StartObject)
            }
            Some('[') => {
                self.next_char()?;
                self.stack.push(Container::Array);
                Ok(Token::StartArray)
            }
            Some('"') => Ok(Token::String(self.read_string_body()?)),
            Some('t') => {
                self.expect_literal("true")?;
                Ok(Token::Bool(true))
            }
            Some('f') => {
                self.expect_literal("false")?;
                Ok(Token::Bool(false))
            }
            Some('n') => {
                self.expect_literal("null")?;
                Ok(Token::Null)
            }
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.read_number(),
            Some(other) => Err(self.unexpected(other, "expected a value")),
        }
    }

    fn expect_literal(&mut self, literal: &str) -> Result<()> {
        for expected in literal.chars() {
            match self.peek_char()? {
                None => return Err(Error::EndOfStream),
                Some(c) if c == expected => {
                    self.next_char()?;
                }
                Some(other) => {
                    return Err(self.unexpected(other, &format!("expected {literal:?}")))
                }
            }
        }
        Ok(())
    }

    /// Scan a maximal number run and parse it. Errors anchor at the run's
    /// first character.
    fn read_number(&mut self) -> Result<Token> {
        let line = self.line;
        let column = self.column;
        let mut literal = String::new();
        while let Some(c) = self.peek_char()? {
            if c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E') {
                self.next_char()?;
                literal.push(c);
            } else {
                break;
            }
        }
        match DecimalValue::parse(&literal) {
            Ok((value, format)) => Ok(Token::Number(value, format)),
            Err(Error::Overflow) => Err(Error::Overflow),
            Err(_) => Err(Error::syntax(
                line,
                column,
                format!("invalid numeric literal {literal:?}"),
            )),
        }
    }

    /// Read a quoted string, opening quote included; shared by string
    /// values and property names.
    fn read_string_body(&mut self) -> Result<String> {
        self.next_char()?; // opening quote, already peeked by the caller
        let mut out = String::new();
        loop {
            let line = self.line;
            let column = self.column;
            match self.next_char()? {
                None => return Err(Error::EndOfStream),
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.read_escape()?),
                Some(c) if (c as u32) < 0x20 => {
                    return Err(Error::syntax(
                        line,
                        column,
                        format!("unescaped control character {:#04x} in string", c as u32),
                    ))
                }
                Some(c) => out.push(c),
            }
        }
    }

    /// Decode one escape sequence; the backslash is already consumed.
    fn read_escape(&mut self) -> Result<char> {
        let line = self.line;
        let column = self.column;
        match self.next_char()? {
            None => Err(Error::EndOfStream),
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('b') => Ok('\u{0008}'),
            Some('f') => Ok('\u{000C}'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => self.read_unicode_escape(),
            Some(other) => Err(Error::syntax(
                line,
                column,
                format!("invalid escape character {other:?}"),
            )),
        }
    }

    /// Decode `\uXXXX`, pairing surrogates into one character.
    fn read_unicode_escape(&mut self) -> Result<char> {
        let line = self.line;
        let column = self.column;
        let high = self.read_hex4()?;
        if (0xDC00..=0xDFFF).contains(&high) {
            return Err(Error::syntax(line, column, "unpaired low surrogate escape"));
        }
        if (0xD800..=0xDBFF).contains(&high) {
            for expected in ['\\', 'u'] {
                match self.next_char()? {
                    None => return Err(Error::EndOfStream),
                    Some(c) if c == expected => {}
                    Some(_) => {
                        return Err(Error::syntax(
                            line,
                            column,
                            "high surrogate escape without a low surrogate",
                        ))
                    }
                }
            }
            let low = self.read_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(Error::syntax(
                    line,
                    column,
                    "high surrogate escape without a low surrogate",
                ));
            }
            let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(code)
                .ok_or_else(|| Error::syntax(line, column, "invalid surrogate pair"));
        }
        char::from_u32(u32::from(high))
            .ok_or_else(|| Error::syntax(line, column, "invalid unicode escape"))
    }

    fn read_hex4(&mut self) -> Result<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let line = self.line;
            let column = self.column;
            let digit = match self.next_char()? {
                None => return Err(Error::EndOfStream),
                Some(c @ '0'..='9') => c as u16 - '0' as u16,
                Some(c @ 'a'..='f') => c as u16 - 'a' as u16 + 10,
                Some(c @ 'A'..='F') => c as u16 - 'A' as u16 + 10,
                Some(other) => {
                    return Err(Error::syntax(
                        line,
                        column,
                        format!("expected a hex digit, found {other:?}"),
                    ))
                }
            };
            value = (value << 4) | digit;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        let mut reader = JsonReader::from_str(text);
        let mut out = Vec::new();
        while reader.read_next().unwrap() {
            out.push(reader.kind());
        }
        out
    }

    #[test]
    fn test_token_sequence_is_deterministic() {
        use TokenKind::*;
        assert_eq!(
            kinds("[1,\"a\",null,true,{},[]]"),
            vec![
                StartArray,
                Number,
                String,
                Null,
                Bool,
                StartObject,
                EndObject,
                StartArray,
                EndArray,
                EndArray
            ]
        );
    }

    #[test]
    fn test_object_tokens_and_accessors() {
        let mut reader = JsonReader::from_str(r#"{"a": 1.50, "b": true}"#);
        assert!(reader.read_next().unwrap());
        assert_eq!(reader.kind(), TokenKind::StartObject);
        assert!(reader.read_next().unwrap());
        assert_eq!(reader.as_str().unwrap(), "a");
        assert!(reader.read_next().unwrap());
        let (value, format) = reader.as_number().unwrap();
        assert_eq!(value.format(&format), "1.50");
        assert!(reader.read_next().unwrap());
        assert_eq!(reader.as_str().unwrap(), "b");
        assert!(reader.read_next().unwrap());
        assert!(reader.as_bool().unwrap());
        assert!(reader.read_next().unwrap());
        assert_eq!(reader.kind(), TokenKind::EndObject);
        assert!(!reader.read_next().unwrap());
        assert_eq!(reader.kind(), TokenKind::None);
    }

    #[test]
    fn test_accessors_reject_wrong_kind() {
        let mut reader = JsonReader::from_str("true");
        assert!(matches!(reader.as_bool(), Err(Error::InvalidState(_))));
        reader.read_next().unwrap();
        assert!(reader.as_bool().is_ok());
        assert!(matches!(reader.as_str(), Err(Error::InvalidState(_))));
        assert!(matches!(reader.as_number(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_trailing_commas_tolerated() {
        use TokenKind::*;
        assert_eq!(
            kinds("[1,]"),
            vec![StartArray, Number, EndArray]
        );
        assert_eq!(
            kinds(r#"{"a":1,}"#),
            vec![StartObject, PropertyName, Number, EndObject]
        );
    }

    #[test]
    fn test_multiple_root_values() {
        use TokenKind::*;
        assert_eq!(kinds("1 true\nnull"), vec![Number, Bool, Null]);
        // A comma does not separate root values.
        let mut reader = JsonReader::from_str("1, 2");
        reader.read_next().unwrap();
        assert!(matches!(reader.read_next(), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_nested_containers() {
        use TokenKind::*;
        assert_eq!(
            kinds(r#"{"a":[{"b":[]}]}"#),
            vec![
                StartObject,
                PropertyName,
                StartArray,
                StartObject,
                PropertyName,
                StartArray,
                EndArray,
                EndObject,
                EndArray,
                EndObject
            ]
        );
    }

    #[test]
    fn test_string_escapes_decode() {
        let mut reader = JsonReader::from_str(r#""a\n\t\"\\\/\b\f\rA😀""#);
        reader.read_next().unwrap();
        assert_eq!(
            reader.as_str().unwrap(),
            "a\n\t\"\\/\u{0008}\u{000C}\rA\u{1F600}"
        );
    }

    #[test]
    fn test_bad_escapes_are_syntax_errors() {
        for text in [r#""\x""#, r#""\u12G4""#, r#""\uD800x""#, r#""\uD800A""#] {
            let mut reader = JsonReader::from_str(text);
            assert!(
                matches!(reader.read_next(), Err(Error::Syntax { .. })),
                "{text} should be a syntax error"
            );
        }
    }

    #[test]
    fn test_unescaped_control_character_position() {
        let mut reader = JsonReader::from_str("\"ab\u{0001}\"");
        match reader.read_next() {
            Err(Error::Syntax { line, column, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(column, 4);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_truncation_is_end_of_stream() {
        for text in ["\"abc", "[1,", "{\"a\":", "tru", "[", r#""\u00"#] {
            let mut reader = JsonReader::from_str(text);
            let mut result = Ok(true);
            while let Ok(true) = result {
                result = reader.read_next();
            }
            assert!(
                matches!(result, Err(Error::EndOfStream)),
                "{text:?} should end with EndOfStream, got {result:?}"
            );
        }
    }

    #[test]
    fn test_bad_number_anchors_at_run_start() {
        let mut reader = JsonReader::from_str("[ +1]");
        reader.read_next().unwrap();
        match reader.read_next() {
            Err(Error::Syntax { line, column, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(column, 3);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_number_overflow_propagates() {
        let wide = format!("[{}]", "9".repeat(35));
        let mut reader = JsonReader::from_str(&wide);
        reader.read_next().unwrap();
        assert!(matches!(reader.read_next(), Err(Error::Overflow)));
    }

    #[test]
    fn test_line_column_tracking() {
        let mut reader = JsonReader::from_str("{\n  \"a\": x}");
        reader.read_next().unwrap();
        reader.read_next().unwrap();
        match reader.read_next() {
            Err(Error::Syntax { line, column, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(column, 8);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_restore_repeats_reads() {
        let mut reader = JsonReader::from_str(r#"[1, {"a": 2.50}, 3]"#);
        reader.read_next().unwrap(); // [
        reader.read_next().unwrap(); // 1
        let snapshot = reader.snapshot().unwrap();

        let mut first = Vec::new();
        while reader.read_next().unwrap() {
            first.push((reader.kind(), reader.line(), reader.column()));
        }

        reader.restore(&snapshot).unwrap();
        assert_eq!(reader.kind(), TokenKind::Number);
        let mut second = Vec::new();
        while reader.read_next().unwrap() {
            second.push((reader.kind(), reader.line(), reader.column()));
        }
        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_restores_decoded_number() {
        let mut reader = JsonReader::from_str("[1.50e+2]");
        reader.read_next().unwrap();
        reader.read_next().unwrap();
        let snapshot = reader.snapshot().unwrap();
        reader.read_next().unwrap();
        reader.restore(&snapshot).unwrap();
        let (value, format) = reader.as_number().unwrap();
        assert_eq!(value.format(&format), "1.50e+2");
    }

    #[test]
    fn test_snapshot_unsupported_on_char_iterator() {
        let text = "[1]";
        let mut reader = JsonReader::from_chars(text.chars());
        reader.read_next().unwrap();
        assert!(matches!(reader.snapshot(), Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_skip_value() {
        let mut reader = JsonReader::from_str(r#"{"a": [1, [2, 3], {"b": 4}], "c": 5}"#);
        reader.read_next().unwrap(); // {
        reader.read_next().unwrap(); // "a"
        reader.skip_value().unwrap(); // name and the whole array
        reader.read_next().unwrap();
        assert_eq!(reader.as_str().unwrap(), "c");
        reader.read_next().unwrap();
        let (value, _) = reader.as_number().unwrap();
        assert_eq!(i64::try_from(value).unwrap(), 5);
    }

    #[test]
    fn test_byte_stream_reader_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(br#"{"k": 1e5}"#);
        let mut reader = JsonReader::from_seekable(std::io::Cursor::new(bytes));
        assert!(reader.read_next().unwrap());
        assert_eq!(reader.kind(), TokenKind::StartObject);
        assert!(reader.read_next().unwrap());
        assert_eq!(reader.as_str().unwrap(), "k");
        assert!(reader.read_next().unwrap());
        let (value, format) = reader.as_number().unwrap();
        assert_eq!(value.format(&format), "1e5");
        assert!(reader.read_next().unwrap());
        assert!(!reader.read_next().unwrap());
    }
}
